/*!
 * Common test utilities for the pdfaudio test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tempfile::TempDir;

use pdfaudio::app_config::OutputConfig;

// Re-export the scripted collaborators
pub mod mock_sources;

static INIT_LOGGER: Once = Once::new();

/// Route library logs through env_logger (RUST_LOG) once per test binary
pub fn init_logger() {
    INIT_LOGGER.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a non-empty `.pdf` file; its content is never parsed by the mock sources
pub fn create_dummy_pdf(dir: &Path, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, "%PDF-1.4\n% placeholder\n")
}

/// Output directories below `dir`
pub fn output_under(dir: &Path) -> OutputConfig {
    OutputConfig::under(dir)
}

/// Names of the files directly inside `dir`, sorted
pub fn file_names(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        names.push(entry?.file_name().to_string_lossy().into_owned());
    }
    names.sort();
    Ok(names)
}

/// Creates a one-page PDF showing `text` in Helvetica.
///
/// With `encrypted` the trailer also carries an `/Encrypt` dictionary. Offsets
/// in the cross-reference table are computed from the written objects.
pub fn create_minimal_pdf(dir: &Path, filename: &str, text: &str, encrypted: bool) -> Result<PathBuf> {
    let content = format!("BT /F1 12 Tf 72 720 Td ({}) Tj ET", text);
    let mut objects = vec![
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Contents 4 0 R \
         /Resources << /Font << /F1 5 0 R >> >> >>"
            .to_string(),
        format!("<< /Length {} >>\nstream\n{}\nendstream", content.len(), content),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
    ];
    if encrypted {
        objects.push(format!(
            "<< /Filter /Standard /V 1 /R 2 /P -4 /O <{}> /U <{}> >>",
            "00".repeat(32),
            "00".repeat(32)
        ));
    }

    let mut pdf = String::from("%PDF-1.4\n");
    let mut offsets = Vec::with_capacity(objects.len());
    for (index, body) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.push_str(&format!("{} 0 obj\n{}\nendobj\n", index + 1, body));
    }

    let xref_offset = pdf.len();
    pdf.push_str(&format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1));
    for offset in &offsets {
        pdf.push_str(&format!("{:010} 00000 n \n", offset));
    }

    let encrypt_entry = if encrypted {
        format!(
            " /Encrypt {} 0 R /ID [<{}> <{}>]",
            objects.len(),
            "ab".repeat(16),
            "ab".repeat(16)
        )
    } else {
        String::new()
    };
    pdf.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R{} >>\nstartxref\n{}\n%%EOF\n",
        objects.len() + 1,
        encrypt_entry,
        xref_offset
    ));

    let file_path = dir.join(filename);
    fs::write(&file_path, pdf)?;
    Ok(file_path)
}
