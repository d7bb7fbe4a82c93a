use std::path::Path;

use log::debug;
use pdf_oxide::PdfDocument;

use super::{PageDocument, PageTextSource};
use crate::errors::SourceError;

/// Page text source backed by `pdf_oxide`
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfDocumentSource;

impl PdfDocumentSource {
    pub fn new() -> Self {
        Self
    }
}

impl PageTextSource for PdfDocumentSource {
    fn open(&self, path: &Path) -> Result<Box<dyn PageDocument>, SourceError> {
        let document = PdfDocument::open(path).map_err(|e| SourceError::Open(e.to_string()))?;

        // pdf_oxide keeps the /Encrypt entry in the trailer dictionary
        let encrypted = document
            .trailer()
            .as_dict()
            .map(|dict| dict.contains_key("Encrypt"))
            .unwrap_or(false);

        let version = document.version();
        debug!("Opened PDF {}.{} at {:?}", version.0, version.1, path);

        Ok(Box::new(OpenPdf { document, encrypted }))
    }
}

struct OpenPdf {
    document: PdfDocument,
    encrypted: bool,
}

impl PageDocument for OpenPdf {
    fn is_encrypted(&self) -> bool {
        self.encrypted
    }

    fn page_count(&mut self) -> Result<usize, SourceError> {
        self.document
            .page_count()
            .map_err(|e| SourceError::Structure(e.to_string()))
    }

    fn extract_page_text(&mut self, index: usize) -> Result<String, SourceError> {
        self.document.extract_text(index).map_err(|e| SourceError::Page {
            page: index + 1,
            message: e.to_string(),
        })
    }
}
