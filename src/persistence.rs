/*!
 * Artifact persistence.
 *
 * The persister owns the two output directories. It writes the processed
 * text together with its statistics block and records the path of the audio
 * artifact produced by the synthesizer.
 */

use chrono::{DateTime, Local};
use log::info;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::app_config::OutputConfig;
use crate::errors::ProcessingError;
use crate::file_utils::FileManager;
use crate::stats::TextStats;

/// File name prefix of processed text artifacts
pub const TEXT_PREFIX: &str = "texto";

/// Heading that precedes the original text
pub const ORIGINAL_TEXT_HEADING: &str = "Original Text:";

/// Writes text artifacts and records audio artifacts
#[derive(Debug, Clone)]
pub struct Persister {
    text_dir: PathBuf,
    audio_dir: PathBuf,
}

impl Persister {
    /// Create a persister for the configured directories, creating them if needed
    pub fn new(output: &OutputConfig) -> Result<Self, ProcessingError> {
        let persister = Self {
            text_dir: output.text_dir.clone(),
            audio_dir: output.audio_dir.clone(),
        };
        persister.ensure_output_dirs()?;
        Ok(persister)
    }

    /// Create both output directories; succeeds if they already exist
    pub fn ensure_output_dirs(&self) -> Result<(), ProcessingError> {
        for dir in [&self.text_dir, &self.audio_dir] {
            FileManager::ensure_dir(dir).map_err(|e| ProcessingError::persistence(dir, e))?;
        }
        Ok(())
    }

    pub fn text_dir(&self) -> &Path {
        &self.text_dir
    }

    pub fn audio_dir(&self) -> &Path {
        &self.audio_dir
    }

    /// Persist `text` and its statistics, named after the current time
    pub fn persist_text(
        &self,
        text: &str,
        stats: &TextStats,
        language_code: &str,
    ) -> Result<PathBuf, ProcessingError> {
        self.persist_text_at(text, stats, language_code, &Local::now())
    }

    /// Persist `text` and its statistics, named after `timestamp`
    pub fn persist_text_at(
        &self,
        text: &str,
        stats: &TextStats,
        language_code: &str,
        timestamp: &DateTime<Local>,
    ) -> Result<PathBuf, ProcessingError> {
        self.ensure_output_dirs()?;

        let file_name = FileManager::artifact_file_name(TEXT_PREFIX, timestamp, language_code, "txt");
        let (file, path) = FileManager::create_unique_file(&self.text_dir, &file_name)
            .map_err(|e| ProcessingError::persistence(self.text_dir.join(&file_name), e))?;

        FileManager::write_with(file, |writer| {
            write!(writer, "{}\n{}\n\n{}", ORIGINAL_TEXT_HEADING, text, stats)
        })
        .map_err(|e| ProcessingError::persistence(&path, e))?;

        info!("Text saved to {:?}", path);
        Ok(path)
    }

    /// Record the audio artifact written by the synthesizer
    pub fn record_audio(&self, path: &Path) -> Result<PathBuf, ProcessingError> {
        if path.as_os_str().is_empty() {
            return Err(ProcessingError::persistence(
                path,
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "empty audio path"),
            ));
        }
        if !FileManager::file_exists(path) {
            return Err(ProcessingError::persistence(
                path,
                std::io::Error::new(std::io::ErrorKind::NotFound, "audio artifact is missing"),
            ));
        }

        info!("Audio saved to {:?}", path);
        Ok(path.to_path_buf())
    }
}

/// Read a persisted text artifact back and return its original text
pub fn read_original_text(path: &Path) -> std::io::Result<String> {
    let content = FileManager::read_to_string(path)?;
    parse_original_text(&content).map(str::to_string).ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("{:?} is not a processed text file", path),
        )
    })
}

/// Return the "Original Text:" section of a text artifact's content
pub fn parse_original_text(content: &str) -> Option<&str> {
    let body = content.strip_prefix(ORIGINAL_TEXT_HEADING)?.strip_prefix('\n')?;
    let end = body.rfind(&format!("\n\n{}", TextStats::HEADING))?;
    Some(&body[..end])
}
