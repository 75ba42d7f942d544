/*!
 * HTTP-level tests for the provider clients
 */

use httpmock::prelude::*;
use serde_json::json;
use std::time::Duration;

use doclocalizer::app_config::{Config, TranslationProvider};
use doclocalizer::errors::ProviderError;
use doclocalizer::providers::anthropic::Anthropic;
use doclocalizer::providers::ollama::Ollama;
use doclocalizer::providers::openai::{OpenAI, OpenAIRequest};
use doclocalizer::providers::{create_provider, Provider, TranslationRequest};

fn request() -> TranslationRequest {
    TranslationRequest::new("Replace the tags.", "Hello<Insert-Japanese-translation>")
}

#[tokio::test]
async fn test_openai_complete_shouldSendSystemAndUserMessages() {
    let server = MockServer::start_async().await;
    let mock = server.mock_async(|when, then| {
        when.method(POST)
            .path("/v1/chat/completions")
            .header("authorization", "Bearer sk-test")
            .json_body_partial(r#"{
                "model": "gpt-4o",
                "messages": [
                    { "role": "system", "content": "Replace the tags." },
                    { "role": "user", "content": "Hello<Insert-Japanese-translation>" }
                ]
            }"#);
        then.status(200).json_body(json!({
            "choices": [{ "message": { "role": "assistant", "content": "Helloこんにちは" } }],
            "usage": { "prompt_tokens": 42, "completion_tokens": 7 }
        }));
    }).await;

    let provider = OpenAI::new("sk-test", server.url("/v1"), "gpt-4o", Duration::from_secs(5))
        .with_temperature(0.3);
    let response = provider.complete(request()).await.unwrap();

    mock.assert_async().await;
    assert_eq!(response.text, "Helloこんにちは");
    assert_eq!(response.prompt_tokens, Some(42));
    assert_eq!(response.completion_tokens, Some(7));
}

#[tokio::test]
async fn test_openai_complete_withUnauthorized_shouldReturnAuthenticationError() {
    let server = MockServer::start_async().await;
    server.mock_async(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(401).body(r#"{"error":{"message":"Incorrect API key provided"}}"#);
    }).await;

    let provider = OpenAI::new("sk-wrong", server.url("/v1"), "gpt-4o", Duration::from_secs(5));
    let result = provider.complete(request()).await;

    match result {
        Err(ProviderError::AuthenticationError(message)) => {
            assert!(message.contains("Incorrect API key"));
        }
        other => panic!("expected an authentication error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_openai_complete_withRateLimit_shouldNotRetry() {
    let server = MockServer::start_async().await;
    let mock = server.mock_async(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(429).body("quota exceeded");
    }).await;

    let provider = OpenAI::new("sk-test", server.url("/v1"), "gpt-4o", Duration::from_secs(5));
    let result = provider.complete(request()).await;

    assert!(matches!(result, Err(ProviderError::RateLimitExceeded(_))));
    mock.assert_hits_async(1).await;
}

#[tokio::test]
async fn test_openai_complete_withNullContent_shouldReturnParseError() {
    let server = MockServer::start_async().await;
    server.mock_async(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(200).json_body(json!({
            "choices": [{ "message": { "role": "assistant", "content": null } }]
        }));
    }).await;

    let provider = OpenAI::new("sk-test", server.url("/v1"), "gpt-4o", Duration::from_secs(5));
    let result = provider.complete(request()).await;

    assert!(matches!(result, Err(ProviderError::ParseError(_))));
}

#[tokio::test]
async fn test_openai_complete_withoutKey_shouldOmitAuthorization() {
    let server = MockServer::start_async().await;
    let mock = server.mock_async(|when, then| {
        when.method(POST)
            .path("/v1/chat/completions")
            .matches(|req| {
                req.headers.as_ref().map_or(true, |headers| {
                    headers.iter().all(|(name, _)| !name.eq_ignore_ascii_case("authorization"))
                })
            });
        then.status(200).json_body(json!({
            "choices": [{ "message": { "role": "assistant", "content": "ok" } }]
        }));
    }).await;

    let provider = OpenAI::new("", server.url("/v1/"), "local-model", Duration::from_secs(5))
        .with_name("LM Studio");
    let response = provider.complete(request()).await.unwrap();

    mock.assert_async().await;
    assert_eq!(response.text, "ok");
    assert_eq!(provider.name(), "LM Studio");
}

#[tokio::test]
async fn test_anthropic_complete_shouldUseSystemField() {
    let server = MockServer::start_async().await;
    let mock = server.mock_async(|when, then| {
        when.method(POST)
            .path("/v1/messages")
            .header("x-api-key", "sk-ant-test")
            .header("anthropic-version", "2023-06-01")
            .json_body_partial(r#"{
                "system": "Replace the tags.",
                "max_tokens": 1024,
                "messages": [{ "role": "user", "content": "Hello<Insert-Japanese-translation>" }]
            }"#);
        then.status(200).json_body(json!({
            "content": [
                { "type": "text", "text": "Hello" },
                { "type": "text", "text": "こんにちは" }
            ],
            "usage": { "input_tokens": 30, "output_tokens": 4 }
        }));
    }).await;

    let provider = Anthropic::new("sk-ant-test", server.base_url(), "claude-test", Duration::from_secs(5))
        .with_max_tokens(1024);
    let response = provider.complete(request()).await.unwrap();

    mock.assert_async().await;
    assert_eq!(response.text, "Helloこんにちは");
    assert_eq!(response.prompt_tokens, Some(30));
    assert_eq!(response.completion_tokens, Some(4));
}

#[tokio::test]
async fn test_ollama_complete_shouldRequestNonStreamingChat() {
    let server = MockServer::start_async().await;
    let mock = server.mock_async(|when, then| {
        when.method(POST)
            .path("/api/chat")
            .json_body_partial(r#"{ "model": "llama3.2", "stream": false }"#);
        then.status(200).json_body(json!({
            "model": "llama3.2",
            "message": { "role": "assistant", "content": "Helloこんにちは" },
            "done": true,
            "prompt_eval_count": 12,
            "eval_count": 3
        }));
    }).await;

    let provider = Ollama::new(server.base_url(), "llama3.2", Duration::from_secs(5));
    let response = provider.complete(request()).await.unwrap();

    mock.assert_async().await;
    assert_eq!(response.text, "Helloこんにちは");
    assert_eq!(response.prompt_tokens, Some(12));
}

#[tokio::test]
async fn test_ollama_complete_withServerError_shouldReturnApiError() {
    let server = MockServer::start_async().await;
    server.mock_async(|when, then| {
        when.method(POST).path("/api/chat");
        then.status(500).body("model not loaded");
    }).await;

    let provider = Ollama::new(server.base_url(), "llama3.2", Duration::from_secs(5));
    let result = provider.complete(request()).await;

    assert!(matches!(result, Err(ProviderError::ApiError { status_code: 500, .. })));
}

#[tokio::test]
async fn test_unreachableEndpoint_shouldReturnConnectionError() {
    // Port 9 (discard) is closed on test machines
    let provider = Ollama::new("http://127.0.0.1:9", "llama3.2", Duration::from_secs(5));
    let result = provider.complete(request()).await;

    assert!(matches!(result, Err(ProviderError::ConnectionError(_))));
}

#[test]
fn test_createProvider_shouldFollowConfiguredProvider() {
    let mut config = Config::default();
    assert_eq!(create_provider(&config.translation).name(), "OpenAI");

    config.translation.provider = TranslationProvider::LMStudio;
    assert_eq!(create_provider(&config.translation).name(), "LM Studio");

    config.translation.provider = TranslationProvider::Anthropic;
    assert_eq!(create_provider(&config.translation).name(), "Anthropic");

    config.translation.provider = TranslationProvider::Ollama;
    assert_eq!(create_provider(&config.translation).name(), "Ollama");
}

#[tokio::test]
async fn test_createProvider_withLmStudio_shouldSendConfiguredMaxTokens() {
    let server = MockServer::start_async().await;
    let mock = server.mock_async(|when, then| {
        when.method(POST)
            .path("/v1/chat/completions")
            .json_body_partial(r#"{ "model": "local-model", "max_tokens": 2048 }"#);
        then.status(200).json_body(json!({
            "choices": [{ "message": { "role": "assistant", "content": "ok" } }]
        }));
    }).await;

    let mut config = Config::default();
    config.translation.provider = TranslationProvider::LMStudio;
    config.translation.common.max_tokens = 2048;
    config.translation.active_provider_config_mut().endpoint = server.url("/v1");

    let response = create_provider(&config.translation).complete(request()).await.unwrap();

    mock.assert_async().await;
    assert_eq!(response.text, "ok");
}

#[test]
fn test_openaiRequest_builder_shouldKeepMessageOrder() {
    let request = OpenAIRequest::new("gpt-4o")
        .add_message("system", "Translate")
        .add_message("user", "Hello")
        .temperature(0.3)
        .max_tokens(500);

    let roles: Vec<&str> = request.messages().iter().map(|m| m.role.as_str()).collect();
    assert_eq!(roles, vec!["system", "user"]);
}
