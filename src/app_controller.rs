use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use std::path::Path;
use std::time::Duration;

use crate::app_config::Config;
use crate::errors::LocalizeError;
use crate::file_utils::FileManager;
use crate::markers::{count_markers, MarkerScan, TRANSLATION_MARKER};
use crate::providers::{create_provider, Provider};
use crate::translation::normalizer::restore_boundary_whitespace;
use crate::translation::TranslationService;

// @module: Application controller for document localization

/// How a successful run ended
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// The document holds no markers; nothing was requested or written
    NoMarkers,

    /// The document was sent for translation
    Localized {
        /// Markers found before translation
        markers_found: usize,
        /// Markers still present in the localized document
        markers_remaining: usize,
        /// The localized document
        document: String,
        /// Whether the file was overwritten (false on dry runs)
        written: bool,
    },
}

/// Main application controller for document localization
///
/// Runs Load, Scan, Request, Normalize and Write in that order. The only
/// branches are the early exit when no marker is found and the abort when
/// the provider fails, which always happens before the file is touched.
#[derive(Debug)]
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Injected provider; built from config on demand when absent
    provider: Option<Box<dyn Provider>>,

    // @field: Skip the final write
    dry_run: bool,

    // @field: Show a spinner during the translation call
    show_progress: bool,
}

impl Controller {
    /// Create a controller that builds its provider from the configuration
    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            provider: None,
            dry_run: false,
            show_progress: false,
        }
    }

    /// Create a controller around an existing provider
    pub fn with_provider(config: Config, provider: Box<dyn Provider>) -> Self {
        Self {
            provider: Some(provider),
            ..Self::with_config(config)
        }
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn show_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Localize the document at `path`
    pub async fn run<P: AsRef<Path>>(&self, path: P) -> Result<RunOutcome, LocalizeError> {
        let path = path.as_ref();
        let document = FileManager::read_document(path)?;

        let scan = MarkerScan::scan(&document);
        if scan.is_empty() {
            debug!("No translation tags in {:?}", path);
            return Ok(RunOutcome::NoMarkers);
        }
        scan.log_occurrences();

        // Credentials are only needed once there is something to translate
        let built: Box<dyn Provider>;
        let provider: &dyn Provider = match &self.provider {
            Some(provider) => provider.as_ref(),
            None => {
                self.config.validate()?;
                built = create_provider(&self.config.translation);
                built.as_ref()
            }
        };

        info!(
            "Found {} translation tags. Sending document to {} for processing...",
            scan.count(),
            provider.name()
        );

        let mut service = TranslationService::new(provider);
        let spinner = self.start_spinner(provider.name());
        let translated = service.translate_document(&document).await;
        spinner.finish_and_clear();

        let localized = restore_boundary_whitespace(&document, translated?);

        let markers_remaining = count_markers(&localized, TRANSLATION_MARKER);
        if markers_remaining > 0 {
            warn!(
                "{} of {} translation tags were left in the response",
                markers_remaining,
                scan.count()
            );
        }

        if !self.dry_run {
            FileManager::write_document(path, &localized)?;
            debug!("Wrote {} bytes to {:?}", localized.len(), path);
        }

        Ok(RunOutcome::Localized {
            markers_found: scan.count(),
            markers_remaining,
            document: localized,
            written: !self.dry_run,
        })
    }

    fn start_spinner(&self, provider_name: &str) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        spinner.set_style(style);
        spinner.set_message(format!("Waiting for {}", provider_name));
        spinner.enable_steady_tick(Duration::from_millis(120));
        spinner
    }
}
