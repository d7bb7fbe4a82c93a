/*!
 * Scripted collaborators for pipeline tests.
 *
 * - `MockDocumentSource`: serves pages from a script instead of parsing PDFs
 * - `RecordingPlayer`: keeps every audio buffer it is asked to play
 * - `FailingPlayer`: always reports a missing output device
 * - `SlowPlayer`: blocks its thread for a fixed time, like real playback
 * - `PanickingPlayer`: panics while playing
 */

use bytes::Bytes;
use parking_lot::Mutex;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use pdfaudio::audio::{AudioPlayer, PlaybackError};
use pdfaudio::errors::SourceError;
use pdfaudio::extraction::{PageDocument, PageTextSource};

/// Script for one page: its text, or the error the parser reports
pub type ScriptedPage = Result<String, String>;

/// Page source that serves scripted pages
#[derive(Debug, Clone, Default)]
pub struct MockDocumentSource {
    pages: Vec<ScriptedPage>,
    encrypted: bool,
    open_error: Option<String>,
    structure_error: Option<String>,
    opened: Arc<AtomicUsize>,
}

impl MockDocumentSource {
    /// A document made of `pages`
    pub fn with_pages(pages: Vec<ScriptedPage>) -> Self {
        Self {
            pages,
            ..Self::default()
        }
    }

    /// A document whose pages all extract as `texts`
    pub fn with_texts(texts: &[&str]) -> Self {
        Self::with_pages(texts.iter().map(|text| Ok(text.to_string())).collect())
    }

    /// An encrypted single-page document
    pub fn encrypted() -> Self {
        Self {
            pages: vec![Ok("secret".to_string())],
            encrypted: true,
            ..Self::default()
        }
    }

    /// A document that cannot be opened
    pub fn unopenable(message: &str) -> Self {
        Self {
            open_error: Some(message.to_string()),
            ..Self::default()
        }
    }

    /// A document whose page tree cannot be read
    pub fn broken_page_tree(message: &str) -> Self {
        Self {
            structure_error: Some(message.to_string()),
            ..Self::default()
        }
    }

    /// Number of times a document was opened
    pub fn opened_count(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    /// Handle sharing the open counter, for sources moved into a controller
    pub fn counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.opened)
    }
}

impl PageTextSource for MockDocumentSource {
    fn open(&self, _path: &Path) -> Result<Box<dyn PageDocument>, SourceError> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.open_error {
            return Err(SourceError::Open(message.clone()));
        }
        Ok(Box::new(ScriptedDocument {
            pages: self.pages.clone(),
            encrypted: self.encrypted,
            structure_error: self.structure_error.clone(),
        }))
    }
}

struct ScriptedDocument {
    pages: Vec<ScriptedPage>,
    encrypted: bool,
    structure_error: Option<String>,
}

impl PageDocument for ScriptedDocument {
    fn is_encrypted(&self) -> bool {
        self.encrypted
    }

    fn page_count(&mut self) -> Result<usize, SourceError> {
        match &self.structure_error {
            Some(message) => Err(SourceError::Structure(message.clone())),
            None => Ok(self.pages.len()),
        }
    }

    fn extract_page_text(&mut self, index: usize) -> Result<String, SourceError> {
        self.pages[index].clone().map_err(|message| SourceError::Page {
            page: index + 1,
            message,
        })
    }
}

/// Player that records what it is given
#[derive(Debug, Clone, Default)]
pub struct RecordingPlayer {
    played: Arc<Mutex<Vec<Bytes>>>,
}

impl RecordingPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every buffer played so far
    pub fn played(&self) -> Vec<Bytes> {
        self.played.lock().clone()
    }
}

impl AudioPlayer for RecordingPlayer {
    fn play(&self, audio: Bytes) -> Result<(), PlaybackError> {
        self.played.lock().push(audio);
        Ok(())
    }
}

/// Player without an output device
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingPlayer;

impl AudioPlayer for FailingPlayer {
    fn play(&self, _audio: Bytes) -> Result<(), PlaybackError> {
        Err(PlaybackError::Device("no default output device".to_string()))
    }
}

/// Player that blocks for `duration` per buffer
#[derive(Debug, Clone, Copy)]
pub struct SlowPlayer {
    pub duration: Duration,
}

impl AudioPlayer for SlowPlayer {
    fn play(&self, _audio: Bytes) -> Result<(), PlaybackError> {
        std::thread::sleep(self.duration);
        Ok(())
    }
}

/// Player that panics
#[derive(Debug, Clone, Copy, Default)]
pub struct PanickingPlayer;

impl AudioPlayer for PanickingPlayer {
    fn play(&self, _audio: Bytes) -> Result<(), PlaybackError> {
        panic!("audio backend crashed");
    }
}
