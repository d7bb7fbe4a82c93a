/*!
 * Tests for artifact persistence
 */

use anyhow::Result;
use chrono::{Local, TimeZone};

use pdfaudio::errors::{ErrorKind, ProcessingError};
use pdfaudio::persistence::{read_original_text, Persister};
use pdfaudio::stats::compute_stats;
use crate::common;

#[test]
fn test_new_shouldCreateDirectoriesIdempotently() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let output = common::output_under(temp_dir.path());

    let persister = Persister::new(&output)?;
    assert!(persister.text_dir().is_dir());
    assert!(persister.audio_dir().is_dir());

    // A second persister over the same directories is fine
    Persister::new(&output)?.ensure_output_dirs()?;
    Ok(())
}

#[test]
fn test_persist_text_withFrench_shouldNameFileAndWriteStats() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let persister = Persister::new(&common::output_under(temp_dir.path()))?;
    let timestamp = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
    let stats = compute_stats("Bonjour le monde", "Francés");

    let path = persister.persist_text_at("Bonjour le monde", &stats, "fr", &timestamp)?;

    assert_eq!(path.file_name().unwrap(), "texto_20240309_140507_fr.txt");
    assert_eq!(path.parent().unwrap(), persister.text_dir());
    let content = std::fs::read_to_string(&path)?;
    assert!(content.starts_with("Original Text:\nBonjour le monde\n\nText statistics:\n"));
    assert!(content.contains("        Selected language: Francés"));
    Ok(())
}

#[test]
fn test_read_original_text_shouldReturnPersistedText() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let persister = Persister::new(&common::output_under(temp_dir.path()))?;
    let text = "Primera página.\n\nSegunda página con\ttabulador.";
    let stats = compute_stats(text, "Español");

    let path = persister.persist_text(text, &stats, "es")?;

    assert_eq!(read_original_text(&path)?, text);
    Ok(())
}

#[test]
fn test_persist_text_withSameSecond_shouldNotOverwrite() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let persister = Persister::new(&common::output_under(temp_dir.path()))?;
    let timestamp = Local.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

    let first = persister.persist_text_at("uno", &compute_stats("uno", "Español"), "es", &timestamp)?;
    let second = persister.persist_text_at("dos", &compute_stats("dos", "Español"), "es", &timestamp)?;

    assert_ne!(first, second);
    assert_eq!(second.file_name().unwrap(), "texto_20240101_000000_es_1.txt");
    assert_eq!(read_original_text(&first)?, "uno");
    assert_eq!(read_original_text(&second)?, "dos");
    Ok(())
}

#[test]
fn test_record_audio_shouldRequireAnExistingPath() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let persister = Persister::new(&common::output_under(temp_dir.path()))?;

    let missing = persister.audio_dir().join("audio_20240101_000000_es.mp3");
    let err = persister.record_audio(&missing).unwrap_err();
    assert!(matches!(err, ProcessingError::Persistence { .. }));
    assert_eq!(err.kind(), ErrorKind::Persistence);
    assert!(persister.record_audio(std::path::Path::new("")).is_err());

    let existing = common::create_test_file(persister.audio_dir(), "audio_20240101_000000_es.mp3", "ID3")?;
    assert_eq!(persister.record_audio(&existing)?, existing);
    Ok(())
}

#[test]
fn test_persist_text_withFileInPlaceOfDirectory_shouldFailWithPersistence() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let mut output = common::output_under(temp_dir.path());
    output.text_dir = common::create_test_file(temp_dir.path(), "not_a_dir", "x")?;

    let err = Persister::new(&output).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Persistence);
    Ok(())
}
