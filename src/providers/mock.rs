/*!
 * Mock speech synthesizer for testing and offline dry runs.
 *
 * This module provides a synthesizer that simulates different behaviors:
 * - `MockSpeechSynthesizer::working()` - Always succeeds with placeholder audio
 * - `MockSpeechSynthesizer::intermittent(n)` - Fails every Nth request
 * - `MockSpeechSynthesizer::failing()` - Always fails with an API error
 * - `MockSpeechSynthesizer::rate_limited()` - Always fails with a quota error
 */

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::errors::ProviderError;
use crate::providers::SpeechSynthesizer;

/// A request received by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockRequest {
    /// The text to speak
    pub text: String,
    /// Requested language
    pub language_code: String,
}

/// Behavior mode for the mock synthesizer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds
    Working,
    /// Fails intermittently (every Nth request)
    Intermittent { fail_every: usize },
    /// Always fails with an API error
    Failing,
    /// Always fails with a rate limit error
    RateLimited,
    /// Succeeds with an empty body
    Empty,
}

/// Mock synthesizer for testing pipeline behavior
#[derive(Debug, Clone)]
pub struct MockSpeechSynthesizer {
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter for intermittent failures
    request_count: Arc<AtomicUsize>,
    /// Every request received, in order
    requests: Arc<Mutex<Vec<MockRequest>>>,
}

impl MockSpeechSynthesizer {
    /// Create a new mock synthesizer with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create an intermittently failing mock
    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every: fail_every.max(1) })
    }

    /// Create a mock that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that always reports an exhausted quota
    pub fn rate_limited() -> Self {
        Self::new(MockBehavior::RateLimited)
    }

    /// Create a mock that returns empty audio
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Number of requests received so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Copy of the requests received so far
    pub fn requests(&self) -> Vec<MockRequest> {
        self.requests.lock().clone()
    }

    /// Audio returned for `text`: an ID3 tag header followed by the text
    pub fn audio_for(text: &str, language_code: &str) -> Bytes {
        let mut audio = b"ID3".to_vec();
        audio.extend_from_slice(format!("[{}] {}", language_code, text).as_bytes());
        Bytes::from(audio)
    }
}

#[async_trait]
impl SpeechSynthesizer for MockSpeechSynthesizer {
    async fn synthesize(&self, text: &str, language_code: &str) -> Result<Bytes, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push(MockRequest {
            text: text.to_string(),
            language_code: language_code.to_string(),
        });

        match self.behavior {
            MockBehavior::Working => Ok(Self::audio_for(text, language_code)),

            MockBehavior::Intermittent { fail_every } => {
                if count % fail_every == fail_every - 1 {
                    Err(ProviderError::ApiError {
                        message: format!("Simulated intermittent failure (request #{})", count + 1),
                        status_code: 503,
                    })
                } else {
                    Ok(Self::audio_for(text, language_code))
                }
            }

            MockBehavior::Failing => Err(ProviderError::ApiError {
                message: "Simulated synthesizer failure".to_string(),
                status_code: 500,
            }),

            MockBehavior::RateLimited => Err(ProviderError::RateLimitExceeded(
                "Simulated quota exhaustion".to_string(),
            )),

            MockBehavior::Empty => Ok(Bytes::new()),
        }
    }

    fn name(&self) -> &str {
        "Mock"
    }
}
