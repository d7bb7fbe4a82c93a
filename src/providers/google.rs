use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use log::{debug, error, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use url::Url;

use crate::app_config::SynthesisConfig;
use crate::errors::ProviderError;
use crate::providers::SpeechSynthesizer;

/// Boundaries the text is preferably split on: sentence and clause
/// punctuation (including CJK forms) and line breaks
static BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?;:,¡¿…。！？；：、，\n]+\s*").expect("valid boundary pattern"));

const NORMAL_SPEED: &str = "1";
const SLOW_SPEED: &str = "0.24";

/// Client for the Google Translate text-to-speech endpoint
#[derive(Debug)]
pub struct GoogleTts {
    /// Endpoint URL
    endpoint: Url,
    /// HTTP client for making requests
    client: Client,
    /// Maximum characters per request
    max_chars: usize,
    /// Value of the `ttsspeed` parameter
    speed: &'static str,
    /// Maximum number of retry attempts
    max_retries: u32,
    /// Base backoff time in milliseconds for exponential backoff
    backoff_base_ms: u64,
}

impl GoogleTts {
    /// Create a new client
    ///
    /// # Arguments
    /// * `endpoint` - The `translate_tts` URL
    /// * `timeout_secs` - Per-request timeout
    /// * `max_chars` - Maximum characters per request
    /// * `max_retries` - Maximum number of retry attempts
    /// * `backoff_base_ms` - Base backoff time in milliseconds
    pub fn new(
        endpoint: &str,
        timeout_secs: u64,
        max_chars: usize,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, ProviderError> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| ProviderError::RequestFailed(format!("invalid endpoint {}: {}", endpoint, e)))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ProviderError::ConnectionError(e.to_string()))?;

        Ok(Self {
            endpoint,
            client,
            max_chars: max_chars.max(1),
            speed: NORMAL_SPEED,
            max_retries,
            backoff_base_ms,
        })
    }

    /// Create a client from the synthesis configuration
    pub fn from_config(config: &SynthesisConfig) -> Result<Self, ProviderError> {
        let tts = Self::new(
            &config.endpoint,
            config.timeout_secs,
            config.max_chars_per_request,
            config.retry_count,
            config.retry_backoff_ms,
        )?;
        Ok(tts.with_slow_speech(config.slow))
    }

    /// Ask for slow speech
    pub fn with_slow_speech(mut self, slow: bool) -> Self {
        self.speed = if slow { SLOW_SPEED } else { NORMAL_SPEED };
        self
    }

    /// Fetch the audio of one chunk, retrying transient failures
    async fn fetch_chunk(
        &self,
        chunk: &str,
        language_code: &str,
        index: usize,
        total: usize,
    ) -> Result<Bytes, ProviderError> {
        let query = [
            ("ie", "UTF-8".to_string()),
            ("q", chunk.to_string()),
            ("tl", language_code.to_string()),
            ("total", total.to_string()),
            ("idx", index.to_string()),
            ("textlen", chunk.chars().count().to_string()),
            ("ttsspeed", self.speed.to_string()),
            ("client", "tw-ob".to_string()),
        ];

        let mut attempt = 0;
        let mut last_error = None;

        while attempt <= self.max_retries {
            let result = self
                .client
                .get(self.endpoint.clone())
                .query(&query)
                .send()
                .await;

            match result {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let audio = response
                            .bytes()
                            .await
                            .map_err(|e| ProviderError::ConnectionError(e.to_string()))?;
                        return check_audio(audio);
                    }

                    let message = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Failed to get error response text".to_string());

                    if status == StatusCode::TOO_MANY_REQUESTS {
                        warn!("Google TTS rate limited - attempt {}/{}", attempt + 1, self.max_retries + 1);
                        last_error = Some(ProviderError::RateLimitExceeded(message));
                    } else if status.is_server_error() {
                        // Server error - can retry
                        error!("Google TTS error ({}) - attempt {}/{}", status, attempt + 1, self.max_retries + 1);
                        last_error = Some(ProviderError::ApiError {
                            status_code: status.as_u16(),
                            message,
                        });
                    } else {
                        // Client error - don't retry
                        error!("Google TTS error ({}): {}", status, message);
                        return Err(ProviderError::ApiError {
                            status_code: status.as_u16(),
                            message,
                        });
                    }
                }
                Err(e) => {
                    // Network error - can retry
                    error!("Google TTS network error: {} - attempt {}/{}", e, attempt + 1, self.max_retries + 1);
                    last_error = Some(ProviderError::ConnectionError(e.to_string()));
                }
            }

            attempt += 1;

            // If we have more retries left, wait with exponential backoff
            if attempt <= self.max_retries {
                tokio::time::sleep(backoff_delay(self.backoff_base_ms, attempt)).await;
            }
        }

        Err(last_error.unwrap_or_else(|| {
            ProviderError::RequestFailed(format!(
                "Google TTS request failed after {} attempts",
                self.max_retries + 1
            ))
        }))
    }
}

/// Wait before retry number `attempt` (1-based): `base_ms * 2^(attempt - 1)`,
/// saturating instead of overflowing
fn backoff_delay(base_ms: u64, attempt: u32) -> Duration {
    let factor = 1u64.checked_shl(attempt.saturating_sub(1)).unwrap_or(u64::MAX);
    Duration::from_millis(base_ms.saturating_mul(factor))
}

#[async_trait]
impl SpeechSynthesizer for GoogleTts {
    async fn synthesize(&self, text: &str, language_code: &str) -> Result<Bytes, ProviderError> {
        let chunks = split_into_chunks(text, self.max_chars);
        if chunks.is_empty() {
            return Err(ProviderError::RequestFailed("nothing to speak".to_string()));
        }
        debug!("Synthesizing {} chunk(s) in '{}'", chunks.len(), language_code);

        // MP3 frames can be concatenated as they are
        let mut audio = BytesMut::new();
        for (index, chunk) in chunks.iter().enumerate() {
            let part = self.fetch_chunk(chunk, language_code, index, chunks.len()).await?;
            audio.extend_from_slice(&part);
        }

        Ok(audio.freeze())
    }

    fn name(&self) -> &str {
        "Google TTS"
    }
}

/// Reject responses that are clearly not MP3 audio
fn check_audio(audio: Bytes) -> Result<Bytes, ProviderError> {
    let is_id3 = audio.starts_with(b"ID3");
    let is_frame = audio.len() >= 2 && audio[0] == 0xFF && (audio[1] & 0xE0) == 0xE0;

    if is_id3 || is_frame {
        Ok(audio)
    } else if audio.is_empty() {
        Err(ProviderError::EncodingError("empty audio response".to_string()))
    } else {
        Err(ProviderError::EncodingError(format!(
            "response is not MP3 audio ({} bytes)",
            audio.len()
        )))
    }
}

/// Split `text` into chunks of at most `max_chars` characters.
///
/// Punctuation and line breaks are preferred split points, then whitespace;
/// a single word longer than `max_chars` is cut. Chunks are trimmed and empty
/// ones dropped.
pub fn split_into_chunks(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();

    let mut last_end = 0;
    let mut pieces = Vec::new();
    for boundary in BOUNDARY.find_iter(text) {
        pieces.push(&text[last_end..boundary.end()]);
        last_end = boundary.end();
    }
    if last_end < text.len() {
        pieces.push(&text[last_end..]);
    }

    for piece in pieces {
        if current.chars().count() + piece.chars().count() <= max_chars {
            current.push_str(piece);
            continue;
        }
        push_trimmed(&mut chunks, &mut current);

        if piece.chars().count() <= max_chars {
            current.push_str(piece);
            continue;
        }

        for word in piece.split_whitespace() {
            let word_len = word.chars().count();
            let needed = if current.is_empty() { word_len } else { current.chars().count() + 1 + word_len };

            if needed <= max_chars {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(word);
                continue;
            }
            push_trimmed(&mut chunks, &mut current);

            if word_len <= max_chars {
                current.push_str(word);
            } else {
                let chars: Vec<char> = word.chars().collect();
                for part in chars.chunks(max_chars) {
                    chunks.push(part.iter().collect());
                }
            }
        }
    }
    push_trimmed(&mut chunks, &mut current);

    chunks
}

fn push_trimmed(chunks: &mut Vec<String>, current: &mut String) {
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }
    current.clear();
}
