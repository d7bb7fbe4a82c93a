/*!
 * Document validation.
 *
 * Cheap checks on a candidate document path, run before the document is
 * opened. Only existence and size metadata are consulted.
 */

use std::fs;
use std::path::Path;

use log::debug;

use crate::errors::InputRejection;

/// Extension accepted for input documents
pub const DOCUMENT_EXTENSION: &str = "pdf";

/// Validate a candidate document path.
///
/// Checks, in order: the path is non-empty and ends with `.pdf`
/// (case-insensitive), it names an existing regular file, and that file is
/// not empty.
pub fn validate(path: &Path) -> Result<(), InputRejection> {
    if path.as_os_str().is_empty() {
        return Err(InputRejection::EmptyPath);
    }

    let has_extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case(DOCUMENT_EXTENSION))
        .unwrap_or(false);
    if !has_extension {
        return Err(InputRejection::UnsupportedExtension {
            path: path.to_path_buf(),
            expected: DOCUMENT_EXTENSION,
        });
    }

    let metadata = fs::metadata(path).map_err(|_| InputRejection::NotFound(path.to_path_buf()))?;
    if !metadata.is_file() {
        return Err(InputRejection::NotAFile(path.to_path_buf()));
    }
    if metadata.len() == 0 {
        return Err(InputRejection::EmptyFile(path.to_path_buf()));
    }

    debug!("Validated {:?} ({} bytes)", path, metadata.len());
    Ok(())
}
