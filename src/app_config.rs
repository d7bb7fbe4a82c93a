use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::language_utils::{LanguageCatalog, DEFAULT_LANGUAGE};

/// Highest accepted `synthesis.retry_count`
pub const MAX_RETRY_COUNT: u32 = 10;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Language used when none, or an unknown one, is requested
    #[serde(default = "default_language")]
    pub default_language: String,

    /// Output directories
    #[serde(default)]
    pub output: OutputConfig,

    /// Speech synthesis settings
    #[serde(default)]
    pub synthesis: SynthesisConfig,

    /// Playback settings
    #[serde(default)]
    pub playback: PlaybackConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Speech synthesis provider type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SynthesisProvider {
    // @provider: Google Translate TTS
    #[default]
    Google,
    // @provider: Offline mock, placeholder audio
    Mock,
}

impl SynthesisProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Google => "Google TTS",
            Self::Mock => "Mock",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Google => "google".to_string(),
            Self::Mock => "mock".to_string(),
        }
    }
}

// Implement Display trait for SynthesisProvider
impl std::fmt::Display for SynthesisProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

// Implement FromStr trait for SynthesisProvider
impl std::str::FromStr for SynthesisProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "mock" => Ok(Self::Mock),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Output directory configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OutputConfig {
    /// Directory for processed text files
    #[serde(default = "default_text_dir")]
    pub text_dir: PathBuf,

    /// Directory for audio files
    #[serde(default = "default_audio_dir")]
    pub audio_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            text_dir: default_text_dir(),
            audio_dir: default_audio_dir(),
        }
    }
}

impl OutputConfig {
    /// Both directories below `root`
    pub fn under<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref();
        Self {
            text_dir: root.join(default_text_dir()),
            audio_dir: root.join(default_audio_dir()),
        }
    }
}

/// Speech synthesis configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SynthesisConfig {
    /// Provider to use
    #[serde(default)]
    pub provider: SynthesisProvider,

    /// Service endpoint URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Speak slowly
    #[serde(default)]
    pub slow: bool,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum characters sent in one request
    /// The public endpoint rejects anything above 200 characters; 100 matches
    /// what gTTS sends.
    #[serde(default = "default_max_chars_per_request")]
    pub max_chars_per_request: usize,

    /// Retry count for failed requests
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    /// Backoff multiplier for retries (in milliseconds)
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            provider: SynthesisProvider::default(),
            endpoint: default_endpoint(),
            slow: false,
            timeout_secs: default_timeout_secs(),
            max_chars_per_request: default_max_chars_per_request(),
            retry_count: default_retry_count(),
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}

/// Playback configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PlaybackConfig {
    /// Play the audio once it is written
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Matching `log` filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_text_dir() -> PathBuf {
    PathBuf::from("processed_texts")
}

fn default_audio_dir() -> PathBuf {
    PathBuf::from("processed_audio")
}

fn default_endpoint() -> String {
    "https://translate.google.com/translate_tts".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_chars_per_request() -> usize {
    100
}

fn default_retry_count() -> u32 {
    3 // Default to 3 retries
}

fn default_retry_backoff_ms() -> u64 {
    1000 // 1 second base backoff time, doubled on each retry
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if !LanguageCatalog::contains(&self.default_language) {
            return Err(anyhow!(
                "Default language '{}' is not supported (supported: {})",
                self.default_language,
                LanguageCatalog::codes_list()
            ));
        }

        if self.output.text_dir.as_os_str().is_empty() || self.output.audio_dir.as_os_str().is_empty() {
            return Err(anyhow!("Output directories must not be empty"));
        }

        if self.synthesis.max_chars_per_request == 0 {
            return Err(anyhow!("max_chars_per_request must be greater than zero"));
        }

        if self.synthesis.retry_count > MAX_RETRY_COUNT {
            return Err(anyhow!("retry_count must be at most {}", MAX_RETRY_COUNT));
        }

        if self.synthesis.timeout_secs == 0 {
            return Err(anyhow!("timeout_secs must be greater than zero"));
        }

        if self.synthesis.provider == SynthesisProvider::Google && self.synthesis.endpoint.trim().is_empty() {
            return Err(anyhow!("A synthesis endpoint is required for the Google provider"));
        }

        Ok(())
    }

    /// Load the configuration at `path`, writing a default one if it is missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {:?}", path))?;
            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            return Ok(config);
        }

        warn!("Config file not found at {:?}, creating default config.", path);
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }

    /// Save the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {:?}", path))?;
        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            default_language: default_language(),
            output: OutputConfig::default(),
            synthesis: SynthesisConfig::default(),
            playback: PlaybackConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
