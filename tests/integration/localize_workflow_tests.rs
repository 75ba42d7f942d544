/*!
 * End-to-end tests for the load, scan, request, normalize and write pipeline
 */

use anyhow::Result;
use std::fs;

use doclocalizer::app_config::Config;
use doclocalizer::errors::{LocalizeError, ProviderError};
use doclocalizer::providers::mock::MockProvider;
use doclocalizer::{Controller, RunOutcome};
use crate::common::{self, MARKER};

#[tokio::test]
async fn test_run_withGreetingExample_shouldInsertTranslationOnce() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "greeting.txt",
        &format!("Good morning.{} How are you?", MARKER),
    )?;
    let provider = MockProvider::translating("おはようございます。");

    let outcome = common::controller_with(&provider).run(&path).await?;

    assert_eq!(
        fs::read_to_string(&path)?,
        "Good morning.おはようございます。 How are you?"
    );
    assert!(matches!(
        outcome,
        RunOutcome::Localized { markers_found: 1, markers_remaining: 0, written: true, .. }
    ));
    Ok(())
}

#[tokio::test]
async fn test_run_withoutMarkers_shouldLeaveFileUntouchedAndSkipProvider() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let content = "# Notes\n\nNothing to translate here.\n";
    let path = common::create_test_file(temp_dir.path(), "notes.md", content)?;
    let provider = MockProvider::failing();

    let outcome = common::controller_with(&provider).run(&path).await?;

    assert_eq!(outcome, RunOutcome::NoMarkers);
    assert_eq!(fs::read(&path)?, content.as_bytes());
    assert_eq!(provider.request_count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_run_withoutMarkers_shouldNotNeedCredentials() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "notes.md", "plain")?;

    // Default config selects OpenAI without an API key
    let outcome = Controller::with_config(Config::default()).run(&path).await?;

    assert_eq!(outcome, RunOutcome::NoMarkers);
    Ok(())
}

#[tokio::test]
async fn test_run_withMarkersAndMissingCredentials_shouldFailBeforeWriting() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let content = format!("Hello {}", MARKER);
    let path = common::create_test_file(temp_dir.path(), "doc.md", &content)?;

    let result = Controller::with_config(Config::default()).run(&path).await;

    assert!(matches!(result, Err(LocalizeError::Config(_))));
    assert_eq!(fs::read_to_string(&path)?, content);
    Ok(())
}

#[tokio::test]
async fn test_run_withSeveralMarkers_shouldReplaceAllAndPreserveEverythingElse() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_document(temp_dir.path(), "slides.md")?;
    let original = fs::read_to_string(&path)?;
    let provider = MockProvider::translating("[JA]");

    common::controller_with(&provider).run(&path).await?;

    let localized = fs::read_to_string(&path)?;
    assert!(!localized.contains(MARKER));
    assert_eq!(localized, original.replace(MARKER, "[JA]"));
    assert_eq!(provider.request_count(), 1);
    Ok(())
}

#[tokio::test]
async fn test_run_withFencedAnswer_shouldWriteUnwrappedDocument() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "doc.md",
        &format!("Thank you{}\n", MARKER),
    )?;
    let provider = MockProvider::fenced("ありがとう", "markdown");

    common::controller_with(&provider).run(&path).await?;

    assert_eq!(fs::read_to_string(&path)?, "Thank youありがとう\n");
    Ok(())
}

#[tokio::test]
async fn test_run_withFailingProvider_shouldLeaveFileByteIdentical() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let content = format!("Hello {}", MARKER);
    let path = common::create_test_file(temp_dir.path(), "doc.md", &content)?;
    let before = fs::read(&path)?;
    let provider = MockProvider::failing();

    let result = common::controller_with(&provider).run(&path).await;

    assert!(matches!(
        result,
        Err(LocalizeError::TranslationService(ProviderError::ApiError { .. }))
    ));
    assert_eq!(fs::read(&path)?, before);
    assert_eq!(provider.request_count(), 1);
    Ok(())
}

#[tokio::test]
async fn test_run_withEmptyAnswer_shouldLeaveFileUnchanged() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let content = format!("Hello {}", MARKER);
    let path = common::create_test_file(temp_dir.path(), "doc.md", &content)?;

    let result = common::controller_with(&MockProvider::empty()).run(&path).await;

    assert!(matches!(
        result,
        Err(LocalizeError::TranslationService(ProviderError::EmptyResponse))
    ));
    assert_eq!(fs::read_to_string(&path)?, content);
    Ok(())
}

#[tokio::test]
async fn test_run_withMissingFile_shouldReportNotFoundAndCreateNothing() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("missing.md");
    let provider = MockProvider::translating("x");

    let result = common::controller_with(&provider).run(&path).await;

    assert!(matches!(result, Err(LocalizeError::NotFound { .. })));
    assert!(!path.exists());
    assert_eq!(provider.request_count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_run_withEchoingProvider_shouldReportRemainingMarkers() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let content = format!("One{m} Two{m}", m = MARKER);
    let path = common::create_test_file(temp_dir.path(), "doc.md", &content)?;

    let outcome = common::controller_with(&MockProvider::echo()).run(&path).await?;

    assert!(matches!(
        outcome,
        RunOutcome::Localized { markers_found: 2, markers_remaining: 2, written: true, .. }
    ));
    Ok(())
}

#[tokio::test]
async fn test_run_withTrailingNewline_shouldKeepLineEnding() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "crlf.txt",
        &format!("Hello{}\r\nBye\r\n", MARKER),
    )?;
    let provider = MockProvider::translating("こんにちは");

    common::controller_with(&provider).run(&path).await?;

    assert_eq!(fs::read_to_string(&path)?, "Helloこんにちは\r\nBye\r\n");
    Ok(())
}

#[tokio::test]
async fn test_run_withBoundaryWhitespace_shouldKeepLeadingAndTrailingBlankLines() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let content = format!("\n  # Title\nHello{}\n\n", MARKER);
    let path = common::create_test_file(temp_dir.path(), "doc.md", &content)?;
    let provider = MockProvider::translating("こんにちは");

    common::controller_with(&provider).run(&path).await?;

    assert_eq!(fs::read_to_string(&path)?, "\n  # Title\nHelloこんにちは\n\n");
    Ok(())
}

#[tokio::test]
async fn test_run_withDryRun_shouldReturnDocumentWithoutWriting() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let content = format!("Good night.{}", MARKER);
    let path = common::create_test_file(temp_dir.path(), "doc.md", &content)?;
    let provider = MockProvider::translating("おやすみなさい。");

    let outcome = common::controller_with(&provider).dry_run(true).run(&path).await?;

    match outcome {
        RunOutcome::Localized { document, written, .. } => {
            assert_eq!(document, "Good night.おやすみなさい。");
            assert!(!written);
        }
        other => panic!("expected a localized outcome, got {:?}", other),
    }
    assert_eq!(fs::read_to_string(&path)?, content);
    Ok(())
}

#[tokio::test]
async fn test_run_withSlowProviderAndSpinner_shouldComplete() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "doc.md", &format!("Hi{}", MARKER))?;
    let provider = MockProvider::slow(50, "やあ");

    common::controller_with(&provider).show_progress(true).run(&path).await?;

    assert_eq!(fs::read_to_string(&path)?, "Hiやあ");
    Ok(())
}
