/*!
 * # pdfaudio - PDF documents read aloud
 *
 * A Rust library that turns a PDF document into spoken audio.
 *
 * ## Features
 *
 * - Validate candidate documents before any heavy I/O
 * - Extract text page by page, tolerating individual broken pages
 * - Compute word and character statistics for the extracted text
 * - Persist the processed text with a statistics block
 * - Synthesize speech in one of ten supported languages
 * - Play the resulting audio back (best effort)
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `language_utils`: The fixed language catalog
 * - `validation`: Document path validation
 * - `extraction`: Page-by-page text extraction:
 *   - `extraction::pdf`: `pdf_oxide` backed page source
 * - `stats`: Text statistics
 * - `persistence`: Text and audio artifact persistence
 * - `synthesis`: Catalog-enforcing adapter around speech synthesizers
 * - `providers`: Speech synthesizer implementations:
 *   - `providers::google`: Google Translate TTS client
 *   - `providers::mock`: Deterministic synthesizer for tests and dry runs
 * - `audio`: Audio playback
 * - `file_utils`: File system operations
 * - `app_controller`: The pipeline orchestrator
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod file_utils;
pub mod language_utils;
pub mod validation;
pub mod extraction;
pub mod stats;
pub mod persistence;
pub mod synthesis;
pub mod providers;
pub mod audio;
pub mod app_controller;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, PipelineResult, PipelineStage};
pub use extraction::{ExtractedText, Extractor, PageDocument, PageText, PageTextSource};
pub use language_utils::{LanguageCatalog, LanguageEntry};
pub use stats::{compute_stats, TextStats};
pub use errors::{ErrorKind, PipelineError, ProcessingError, ProviderError};
