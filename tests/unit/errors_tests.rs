/*!
 * Tests for error types and their categories
 */

use std::error::Error;
use std::path::PathBuf;

use pdfaudio::errors::{
    ErrorKind, InputRejection, PipelineError, ProcessingError, ProviderError, SourceError, Stage,
};

#[test]
fn test_kind_shouldMapEveryVariant() {
    let cases = [
        (ProcessingError::from(InputRejection::EmptyPath), ErrorKind::InvalidInput),
        (ProcessingError::Encrypted, ErrorKind::CorruptDocument),
        (ProcessingError::NoPages, ErrorKind::CorruptDocument),
        (
            ProcessingError::from(SourceError::Open("bad xref".to_string())),
            ErrorKind::CorruptDocument,
        ),
        (ProcessingError::EmptyContent { pages: 2 }, ErrorKind::EmptyContent),
        (
            ProcessingError::UnsupportedLanguage {
                code: "xx".to_string(),
                supported: "es".to_string(),
            },
            ErrorKind::UnsupportedLanguage,
        ),
        (
            ProcessingError::from(ProviderError::ConnectionError("offline".to_string())),
            ErrorKind::Synthesis,
        ),
        (
            ProcessingError::Persistence {
                path: PathBuf::from("out"),
                source: std::io::Error::other("disk full"),
            },
            ErrorKind::Persistence,
        ),
    ];

    for (error, kind) in cases {
        assert_eq!(error.kind(), kind, "{}", error);
    }
}

#[test]
fn test_pipeline_error_shouldNameStageAndKeepCause() {
    let error = PipelineError::new(
        Stage::Synthesizing,
        ProviderError::RateLimitExceeded("quota".to_string()).into(),
    )
    .with_text_file(PathBuf::from("processed_texts/texto.txt"));

    let message = error.to_string();
    assert!(message.starts_with("failed while synthesizing: "), "{}", message);
    assert!(message.contains("quota"));
    assert_eq!(error.kind(), ErrorKind::Synthesis);
    assert_eq!(error.text_file, Some(PathBuf::from("processed_texts/texto.txt")));

    let source = error.source().expect("processing error is the source");
    assert!(source.source().is_some(), "provider error should be preserved");
}

#[test]
fn test_input_rejection_messages_shouldDifferPerReason() {
    let path = PathBuf::from("a.pdf");
    let messages = [
        InputRejection::EmptyPath.to_string(),
        InputRejection::UnsupportedExtension { path: path.clone(), expected: "pdf" }.to_string(),
        InputRejection::NotFound(path.clone()).to_string(),
        InputRejection::NotAFile(path.clone()).to_string(),
        InputRejection::EmptyFile(path).to_string(),
    ];
    for (i, a) in messages.iter().enumerate() {
        for b in &messages[i + 1..] {
            assert_ne!(a, b);
        }
    }
}
