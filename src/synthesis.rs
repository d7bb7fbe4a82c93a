/*!
 * Speech synthesis adapter.
 *
 * Wraps a [`SpeechSynthesizer`] so that only catalog languages reach it,
 * writes the returned audio next to the other artifacts and hands it to the
 * optional player.
 */

use chrono::{DateTime, Local};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::audio::AudioPlayer;
use crate::errors::{ProcessingError, ProviderError};
use crate::file_utils::FileManager;
use crate::language_utils::LanguageCatalog;
use crate::providers::SpeechSynthesizer;

/// File name prefix of audio artifacts
pub const AUDIO_PREFIX: &str = "audio";

/// An audio file written by the synthesizer
#[derive(Debug, Clone, PartialEq)]
pub struct AudioArtifact {
    pub path: PathBuf,
    pub language_code: String,
    pub created_at: DateTime<Local>,
    pub size_bytes: u64,
}

/// Catalog-enforcing adapter around a speech synthesizer
pub struct Synthesizer {
    engine: Arc<dyn SpeechSynthesizer>,
    audio_dir: PathBuf,
    player: Option<Arc<dyn AudioPlayer>>,
}

impl Synthesizer {
    /// Create an adapter writing into `audio_dir`
    pub fn new<P: Into<PathBuf>>(engine: Arc<dyn SpeechSynthesizer>, audio_dir: P) -> Self {
        Self {
            engine,
            audio_dir: audio_dir.into(),
            player: None,
        }
    }

    /// Play every synthesized artifact with `player`
    pub fn with_player(mut self, player: Arc<dyn AudioPlayer>) -> Self {
        self.player = Some(player);
        self
    }

    pub fn audio_dir(&self) -> &Path {
        &self.audio_dir
    }

    /// Synthesize `text`, naming the artifact after the current time
    pub async fn synthesize(&self, text: &str, language_code: &str) -> Result<AudioArtifact, ProcessingError> {
        self.synthesize_at(text, language_code, Local::now()).await
    }

    /// Synthesize `text`, naming the artifact after `created_at`
    pub async fn synthesize_at(
        &self,
        text: &str,
        language_code: &str,
        created_at: DateTime<Local>,
    ) -> Result<AudioArtifact, ProcessingError> {
        self.synthesize_with_suffix(text, language_code, created_at, 0).await
    }

    /// Synthesize `text`, naming the artifact after `created_at` with the
    /// collision counter `suffix` already applied (0 for none), so it can
    /// mirror the name of a text artifact written in the same second
    pub async fn synthesize_with_suffix(
        &self,
        text: &str,
        language_code: &str,
        created_at: DateTime<Local>,
        suffix: u32,
    ) -> Result<AudioArtifact, ProcessingError> {
        if !LanguageCatalog::contains(language_code) {
            return Err(ProcessingError::unsupported_language(language_code));
        }

        debug!("Requesting speech from {} in '{}'", self.engine.name(), language_code);
        let audio = self.engine.synthesize(text, language_code).await?;
        if audio.is_empty() {
            return Err(ProviderError::EncodingError(format!(
                "{} returned no audio",
                self.engine.name()
            ))
            .into());
        }

        FileManager::ensure_dir(&self.audio_dir)
            .map_err(|e| ProcessingError::persistence(&self.audio_dir, e))?;
        let file_name = FileManager::suffixed_name(
            &FileManager::artifact_file_name(
                AUDIO_PREFIX,
                &created_at,
                language_code,
                self.engine.audio_extension(),
            ),
            suffix,
        );
        let (file, path) = FileManager::create_unique_file(&self.audio_dir, &file_name)
            .map_err(|e| ProcessingError::persistence(self.audio_dir.join(&file_name), e))?;
        FileManager::write_with(file, |writer| std::io::Write::write_all(writer, &audio))
            .map_err(|e| ProcessingError::persistence(&path, e))?;
        info!("Audio written to {:?} ({} bytes)", path, audio.len());

        let artifact = AudioArtifact {
            path,
            language_code: language_code.to_string(),
            created_at,
            size_bytes: audio.len() as u64,
        };

        if let Some(player) = &self.player {
            // Playback lasts as long as the audio, keep it off the runtime
            let player = Arc::clone(player);
            match tokio::task::spawn_blocking(move || player.play(audio)).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => warn!("Could not play {:?}: {}", artifact.path, e),
                Err(e) => warn!("Playback of {:?} stopped unexpectedly: {}", artifact.path, e),
            }
        }

        Ok(artifact)
    }
}
