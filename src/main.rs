// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{debug, error, info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use doclocalizer::app_config::{self, Config, TranslationProvider};
use doclocalizer::{Controller, LocalizeError, RunOutcome};

const BIN_NAME: &str = "doclocalizer";

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    #[value(name = "openai")]
    OpenAI,
    Anthropic,
    Ollama,
    #[value(name = "lmstudio")]
    LMStudio,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::OpenAI => TranslationProvider::OpenAI,
            CliTranslationProvider::Anthropic => TranslationProvider::Anthropic,
            CliTranslationProvider::Ollama => TranslationProvider::Ollama,
            CliTranslationProvider::LMStudio => TranslationProvider::LMStudio,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for doclocalizer
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// doclocalizer - fill translation tags in a document using AI
///
/// Every "<Insert-Japanese-translation>" tag in the file is replaced with a
/// Japanese translation of the text right before it. The file is overwritten
/// in place.
#[derive(Parser, Debug)]
#[command(name = "doclocalizer")]
#[command(version)]
#[command(about = "Replace translation tags in a document with AI translations")]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = "doclocalizer sends a document to an AI provider once and replaces every
<Insert-Japanese-translation> tag with a translation of the text preceding it.

EXAMPLES:
    doclocalizer slides.md                      # Translate using OpenAI (OPENAI_API_KEY)
    doclocalizer -p ollama -m llama3.2 notes.md # Use a local Ollama model
    doclocalizer --dry-run slides.md            # Print the result instead of writing it
    doclocalizer completions bash > doclocalizer.bash

CONFIGURATION:
    Settings are read from doclocalizer.json when present. Use --config to
    point at another file. API keys may come from the config file or from
    OPENAI_API_KEY / ANTHROPIC_API_KEY.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Document to localize in place
    #[arg(value_name = "FILENAME")]
    filename: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long = "config", value_name = "PATH", default_value = "doclocalizer.json")]
    config_path: PathBuf,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Model name to use for translation
    #[arg(short, long)]
    model: Option<String>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// OpenAI API key
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    openai_api_key: Option<String>,

    /// Anthropic API key
    #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true)]
    anthropic_api_key: Option<String>,

    /// Print the localized document instead of overwriting the file
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Hide the progress spinner
    #[arg(short, long)]
    quiet: bool,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }

    // @returns: ANSI color for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                Self::get_color_for_level(record.level()),
                now,
                Self::get_emoji_for_level(record.level()),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Level is adjusted once the configuration is known
    if let Err(e) = CustomLogger::init(LevelFilter::Info) {
        eprintln!("Failed to initialize logger: {}", e);
    }

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, BIN_NAME, &mut std::io::stdout());
        return ExitCode::SUCCESS;
    }

    match run_localize(cli).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run_localize(options: CommandLineOptions) -> Result<RunOutcome, LocalizeError> {
    let filename = options.filename.clone()
        .ok_or_else(|| LocalizeError::Usage(format!("{} <FILENAME>", BIN_NAME)))?;

    let config = build_config(&options)?;
    log::set_max_level(config.log_level.to_level_filter());
    debug!(
        "Using provider {} with model {}",
        config.translation.provider.display_name(),
        config.translation.get_model()
    );

    let controller = Controller::with_config(config)
        .dry_run(options.dry_run)
        .show_progress(!options.quiet);

    let outcome = controller.run(&filename).await?;
    report_outcome(&outcome, &filename);

    Ok(outcome)
}

// Outcome lines go to stderr whatever the log level; stdout only carries dry-run output
fn report_outcome(outcome: &RunOutcome, filename: &Path) {
    match outcome {
        RunOutcome::NoMarkers => eprintln!("No translation tags found. Exiting."),
        RunOutcome::Localized { written: true, .. } => eprintln!("Translation completed successfully!"),
        RunOutcome::Localized { document, written: false, .. } => {
            info!("Dry run, {:?} left unchanged", filename);
            print!("{}", document);
            let _ = std::io::stdout().flush();
        }
    }
}

// Load the config file, then apply environment and command line overrides
fn build_config(options: &CommandLineOptions) -> Result<Config> {
    let mut config = Config::load_or_default(&options.config_path)?;

    if let Some(provider) = &options.provider {
        config.translation.provider = provider.clone().into();
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    let api_key = match config.translation.provider {
        TranslationProvider::OpenAI => options.openai_api_key.clone(),
        TranslationProvider::Anthropic => options.anthropic_api_key.clone(),
        _ => None,
    };

    let active = config.translation.active_provider_config_mut();
    if let Some(api_key) = api_key.filter(|key| !key.is_empty()) {
        active.api_key = api_key;
    }
    if let Some(model) = &options.model {
        active.model = model.clone();
    }

    Ok(config)
}
