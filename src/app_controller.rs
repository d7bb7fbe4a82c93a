use anyhow::{Context, Result};
use chrono::Local;
use log::{debug, error, info};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::app_config::{Config, OutputConfig, SynthesisProvider};
use crate::audio::{AudioPlayer, RodioPlayer};
use crate::errors::{PipelineError, ProcessingError};
use crate::extraction::{Extractor, PageTextSource, PdfDocumentSource};
use crate::language_utils::LanguageCatalog;
use crate::file_utils::FileManager;
use crate::persistence::{Persister, TEXT_PREFIX};
use crate::providers::google::GoogleTts;
use crate::providers::mock::MockSpeechSynthesizer;
use crate::providers::SpeechSynthesizer;
use crate::stats::{compute_stats, TextStats};
use crate::synthesis::Synthesizer;
use crate::validation;

pub use crate::errors::Stage as PipelineStage;

// @module: Pipeline orchestrator

/// Callback notified on every stage transition
pub type StageObserver = Arc<dyn Fn(PipelineStage) + Send + Sync>;

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineResult {
    pub text_file_path: PathBuf,
    pub audio_file_path: PathBuf,
    pub stats: TextStats,
    /// Warnings for pages that produced no text
    pub page_warnings: Vec<String>,
}

/// Runs documents through validation, extraction, statistics, persistence
/// and synthesis
pub struct Controller {
    // @field: Output directories
    persister: Persister,
    // @field: Document opener
    source: Box<dyn PageTextSource>,
    // @field: Speech adapter
    synthesizer: Synthesizer,
    observer: Option<StageObserver>,
}

impl Controller {
    /// Create a controller writing into `output`
    pub fn new(
        output: &OutputConfig,
        source: Box<dyn PageTextSource>,
        engine: Arc<dyn SpeechSynthesizer>,
    ) -> Result<Self, ProcessingError> {
        let persister = Persister::new(output)?;
        let synthesizer = Synthesizer::new(engine, persister.audio_dir());
        Ok(Self {
            persister,
            source,
            synthesizer,
            observer: None,
        })
    }

    // @method: Build the controller described by the configuration
    pub fn with_config(config: &Config, playback: bool) -> Result<Self> {
        let engine: Arc<dyn SpeechSynthesizer> = match config.synthesis.provider {
            SynthesisProvider::Google => Arc::new(
                GoogleTts::from_config(&config.synthesis)
                    .context("Failed to create the Google TTS client")?,
            ),
            SynthesisProvider::Mock => Arc::new(MockSpeechSynthesizer::working()),
        };
        info!("Speech provider: {}", config.synthesis.provider.display_name());

        let controller = Self::new(&config.output, Box::new(PdfDocumentSource::new()), engine)
            .context("Failed to prepare the output directories")?;

        if playback && config.playback.enabled {
            Ok(controller.with_player(Arc::new(RodioPlayer::new())))
        } else {
            Ok(controller)
        }
    }

    /// Play every synthesized artifact with `player`
    pub fn with_player(mut self, player: Arc<dyn AudioPlayer>) -> Self {
        self.synthesizer = self.synthesizer.with_player(player);
        self
    }

    /// Report stage transitions to `observer`
    pub fn with_observer<F>(mut self, observer: F) -> Self
    where
        F: Fn(PipelineStage) + Send + Sync + 'static,
    {
        self.observer = Some(Arc::new(observer));
        self
    }

    pub fn text_dir(&self) -> &Path {
        self.persister.text_dir()
    }

    pub fn audio_dir(&self) -> &Path {
        self.persister.audio_dir()
    }

    /// Turn the document at `document_path` into a text artifact and an
    /// audio artifact spoken in `language_code`
    pub async fn process(
        &self,
        document_path: &str,
        language_code: &str,
    ) -> Result<PipelineResult, PipelineError> {
        let start_time = Instant::now();
        // Shared by both artifact names
        let timestamp = Local::now();

        self.enter(PipelineStage::ResolvingLanguage);
        let language = LanguageCatalog::get(language_code).ok_or_else(|| {
            self.fail(
                PipelineStage::ResolvingLanguage,
                ProcessingError::unsupported_language(language_code),
            )
        })?;

        self.enter(PipelineStage::Validating);
        let path = Path::new(document_path);
        validation::validate(path).map_err(|e| self.fail(PipelineStage::Validating, e.into()))?;

        self.enter(PipelineStage::Extracting);
        let extracted = Extractor::new(self.source.as_ref())
            .extract(path)
            .map_err(|e| self.fail(PipelineStage::Extracting, e))?;
        let page_warnings = extracted.warnings();

        self.enter(PipelineStage::ComputingStats);
        let text = extracted.combined_text.as_str();
        let stats = compute_stats(text, language.display_name);

        self.enter(PipelineStage::PersistingText);
        let text_file_path = self
            .persister
            .persist_text_at(text, &stats, language.code, &timestamp)
            .map_err(|e| self.fail(PipelineStage::PersistingText, e))?;

        self.enter(PipelineStage::Synthesizing);
        // Mirror any collision counter the text name received
        let suffix = FileManager::name_suffix(
            &text_file_path,
            &FileManager::artifact_file_name(TEXT_PREFIX, &timestamp, language.code, "txt"),
        );
        let artifact = self
            .synthesizer
            .synthesize_with_suffix(text, language.code, timestamp, suffix)
            .await
            .map_err(|e| {
                self.fail(PipelineStage::Synthesizing, e)
                    .with_text_file(text_file_path.clone())
            })?;

        self.enter(PipelineStage::PersistingAudio);
        let audio_file_path = self
            .persister
            .record_audio(&artifact.path)
            .map_err(|e| {
                self.fail(PipelineStage::PersistingAudio, e)
                    .with_text_file(text_file_path.clone())
            })?;

        self.enter(PipelineStage::Done);
        info!(
            "Processed {:?} in {}.",
            path,
            Self::format_duration(start_time.elapsed())
        );

        Ok(PipelineResult {
            text_file_path,
            audio_file_path,
            stats,
            page_warnings,
        })
    }

    fn enter(&self, stage: PipelineStage) {
        debug!("Pipeline stage: {:?}", stage);
        if let Some(observer) = &self.observer {
            observer(stage);
        }
    }

    fn fail(&self, stage: PipelineStage, source: ProcessingError) -> PipelineError {
        error!("Failed while {}: {}", stage, source);
        PipelineError::new(stage, source)
    }

    // Format duration in a human-readable format
    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
