/*!
 * Speech synthesizer implementations.
 *
 * This module contains client implementations for speech synthesis services:
 * - Google: the public Google Translate TTS endpoint
 * - Mock: deterministic audio for tests and offline dry runs
 */

use async_trait::async_trait;
use bytes::Bytes;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for all speech synthesizers
///
/// This trait defines the interface that all synthesizer implementations must
/// follow, allowing them to be used interchangeably by the pipeline. Retry and
/// timeout policies belong to the implementation.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync + Debug {
    /// Turn `text` into encoded audio spoken in `language_code`
    ///
    /// # Arguments
    /// * `text` - The text to speak
    /// * `language_code` - A code from the language catalog
    ///
    /// # Returns
    /// * `Result<Bytes, ProviderError>` - The encoded audio or an error
    async fn synthesize(&self, text: &str, language_code: &str) -> Result<Bytes, ProviderError>;

    /// File extension of the produced audio
    fn audio_extension(&self) -> &str {
        "mp3"
    }

    /// Name used in log messages
    fn name(&self) -> &str;
}

pub mod google;
pub mod mock;
