/*!
 * Page-by-page text extraction.
 *
 * The extractor opens a validated document through a [`PageTextSource`],
 * walks its pages in order and accumulates their text. A page that fails or
 * yields nothing is recorded and logged, and extraction moves on; only an
 * encrypted, page-less or unreadable document, or one without any text at
 * all, fails the run.
 */

use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::errors::{ProcessingError, SourceError};
use crate::file_utils::FileManager;

pub mod pdf;

pub use pdf::PdfDocumentSource;

/// An opened document.
///
/// Dropping the value releases the underlying file handle.
pub trait PageDocument {
    /// Whether the document is encrypted
    fn is_encrypted(&self) -> bool;

    /// Number of pages
    fn page_count(&mut self) -> Result<usize, SourceError>;

    /// Text of the page at zero-based `index`
    fn extract_page_text(&mut self, index: usize) -> Result<String, SourceError>;
}

/// Something that can open documents for extraction
pub trait PageTextSource: Send + Sync {
    /// Open the document at `path`
    fn open(&self, path: &Path) -> Result<Box<dyn PageDocument>, SourceError>;
}

/// Summary of the opened document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentInfo {
    pub path: PathBuf,
    pub size_bytes: u64,
    pub page_count: usize,
    pub is_encrypted: bool,
}

/// Extraction outcome of a single page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    /// One-based page number
    pub index: usize,
    /// Extracted text, empty when the page failed
    pub text: String,
    /// Whether this page produced no usable text
    pub extraction_failed: bool,
    /// Warning emitted for a failed page
    pub warning: Option<String>,
}

/// Text extracted from a whole document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    pub document: DocumentInfo,
    /// Every page, in order
    pub pages: Vec<PageText>,
    /// Concatenation of the text of all pages that did not fail, trimmed
    pub combined_text: String,
}

impl ExtractedText {
    /// Pages that failed
    pub fn failed_pages(&self) -> impl Iterator<Item = &PageText> {
        self.pages.iter().filter(|page| page.extraction_failed)
    }

    /// Warnings emitted during extraction, in page order
    pub fn warnings(&self) -> Vec<String> {
        self.failed_pages().filter_map(|page| page.warning.clone()).collect()
    }
}

/// Extracts text from documents opened through a [`PageTextSource`]
pub struct Extractor<'a> {
    source: &'a dyn PageTextSource,
}

impl<'a> Extractor<'a> {
    pub fn new(source: &'a dyn PageTextSource) -> Self {
        Self { source }
    }

    /// Extract the text of every page of the document at `path`
    pub fn extract(&self, path: &Path) -> Result<ExtractedText, ProcessingError> {
        let size_bytes = FileManager::file_size(path).unwrap_or(0);
        let mut document = self.source.open(path)?;

        if document.is_encrypted() {
            return Err(ProcessingError::Encrypted);
        }

        let page_count = document.page_count()?;
        if page_count == 0 {
            return Err(ProcessingError::NoPages);
        }
        debug!("Document {:?} has {} page(s)", path, page_count);

        let mut pages = Vec::with_capacity(page_count);
        let mut combined_text = String::new();

        for index in 0..page_count {
            let number = index + 1;
            let page = match document.extract_page_text(index) {
                Ok(text) if !text.is_empty() => {
                    combined_text.push_str(&text);
                    PageText {
                        index: number,
                        text,
                        extraction_failed: false,
                        warning: None,
                    }
                }
                Ok(_) => Self::failed_page(
                    number,
                    format!("Page {} is empty or has no extractable text", number),
                ),
                Err(SourceError::Page { message, .. }) => Self::failed_page(
                    number,
                    format!("Could not extract text from page {}: {}", number, message),
                ),
                Err(e) => Self::failed_page(
                    number,
                    format!("Could not extract text from page {}: {}", number, e),
                ),
            };
            pages.push(page);
        }

        let combined_text = combined_text.trim().to_string();
        if combined_text.is_empty() {
            return Err(ProcessingError::EmptyContent { pages: page_count });
        }

        Ok(ExtractedText {
            document: DocumentInfo {
                path: path.to_path_buf(),
                size_bytes,
                page_count,
                is_encrypted: false,
            },
            pages,
            combined_text,
        })
    }

    fn failed_page(index: usize, warning: String) -> PageText {
        warn!("{}", warning);
        PageText {
            index,
            text: String::new(),
            extraction_failed: true,
            warning: Some(warning),
        }
    }
}
