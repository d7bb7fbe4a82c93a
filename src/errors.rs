/*!
 * Error types for the pdfaudio application.
 *
 * This module contains custom error types for different parts of the pipeline,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when talking to a speech synthesis provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when the provider returns audio that cannot be used
    #[error("Failed to decode provider response: {0}")]
    EncodingError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting or quota
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),
}

/// Errors reported by a page text source
#[derive(Error, Debug)]
pub enum SourceError {
    /// The document could not be opened or parsed at all
    #[error("cannot open document: {0}")]
    Open(String),

    /// The page tree could not be read
    #[error("unreadable document structure: {0}")]
    Structure(String),

    /// A single page could not be extracted
    #[error("page {page}: {message}")]
    Page {
        /// One-based page number
        page: usize,
        /// Reason given by the parser
        message: String,
    },
}

/// Reasons a candidate document path is rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputRejection {
    /// No path was given
    #[error("no document path was given")]
    EmptyPath,

    /// The path does not carry a supported extension
    #[error("the file must have a .{expected} extension: {path}")]
    UnsupportedExtension {
        /// Path as given
        path: PathBuf,
        /// Expected extension
        expected: &'static str,
    },

    /// Nothing exists at the path
    #[error("the document does not exist: {0}")]
    NotFound(PathBuf),

    /// The path exists but is not a regular file
    #[error("the path is not a file: {0}")]
    NotAFile(PathBuf),

    /// The file is zero bytes long
    #[error("the document is empty: {0}")]
    EmptyFile(PathBuf),
}

/// Failure kinds of the processing pipeline
#[derive(Error, Debug)]
pub enum ProcessingError {
    /// Bad extension, missing file or zero-size file
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputRejection),

    /// The document is encrypted and cannot be read
    #[error("corrupt document: encrypted")]
    Encrypted,

    /// The document reports zero pages
    #[error("corrupt document: no pages")]
    NoPages,

    /// The document structure could not be read
    #[error("corrupt document: {0}")]
    Unreadable(#[from] SourceError),

    /// No page produced any text
    #[error("no extractable text in {pages} page(s)")]
    EmptyContent {
        /// Number of pages that were tried
        pages: usize,
    },

    /// The language code is not in the catalog
    #[error("unsupported language '{code}' (supported: {supported})")]
    UnsupportedLanguage {
        /// Requested code
        code: String,
        /// Supported codes, for the message
        supported: String,
    },

    /// The speech synthesizer failed
    #[error("speech synthesis failed: {0}")]
    Synthesis(#[from] ProviderError),

    /// Writing an artifact failed
    #[error("cannot write {path}: {source}")]
    Persistence {
        /// Artifact or directory being written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Coarse error categories callers branch on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    CorruptDocument,
    EmptyContent,
    UnsupportedLanguage,
    Synthesis,
    Persistence,
}

impl ProcessingError {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::Encrypted | Self::NoPages | Self::Unreadable(_) => ErrorKind::CorruptDocument,
            Self::EmptyContent { .. } => ErrorKind::EmptyContent,
            Self::UnsupportedLanguage { .. } => ErrorKind::UnsupportedLanguage,
            Self::Synthesis(_) => ErrorKind::Synthesis,
            Self::Persistence { .. } => ErrorKind::Persistence,
        }
    }

    pub(crate) fn persistence(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Persistence {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn unsupported_language(code: &str) -> Self {
        Self::UnsupportedLanguage {
            code: code.to_string(),
            supported: crate::language_utils::LanguageCatalog::codes_list(),
        }
    }
}

/// Stages of one pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    ResolvingLanguage,
    Validating,
    Extracting,
    ComputingStats,
    PersistingText,
    Synthesizing,
    PersistingAudio,
    Done,
}

impl Stage {
    /// Gerund used in messages ("failed while extracting")
    pub fn activity(&self) -> &'static str {
        match self {
            Self::Idle => "starting",
            Self::ResolvingLanguage => "resolving the language",
            Self::Validating => "validating",
            Self::Extracting => "extracting",
            Self::ComputingStats => "computing statistics",
            Self::PersistingText => "persisting text",
            Self::Synthesizing => "synthesizing",
            Self::PersistingAudio => "persisting audio",
            Self::Done => "finishing",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.activity())
    }
}

/// A processing error together with the stage it happened in
#[derive(Error, Debug)]
#[error("failed while {stage}: {source}")]
pub struct PipelineError {
    /// Stage that failed
    pub stage: Stage,
    /// What went wrong
    #[source]
    pub source: ProcessingError,
    /// Text artifact written before the failure, if any
    pub text_file: Option<PathBuf>,
}

impl PipelineError {
    /// Wrap an error with its stage
    pub fn new(stage: Stage, source: ProcessingError) -> Self {
        Self {
            stage,
            source,
            text_file: None,
        }
    }

    /// Attach the text artifact that survived the failure
    pub fn with_text_file(mut self, path: PathBuf) -> Self {
        self.text_file = Some(path);
        self
    }

    /// Category of the underlying error
    pub fn kind(&self) -> ErrorKind {
        self.source.kind()
    }
}
