use chrono::{DateTime, Local};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

// @module: File and directory utilities

/// Timestamp format used in artifact names (sortable, second resolution)
pub const ARTIFACT_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Upper bound on numeric suffixes tried for one artifact name
const MAX_NAME_SUFFIX: u32 = 1000;

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed, no-op when present
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> io::Result<()> {
        let path = path.as_ref();
        if !Self::dir_exists(path) {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    // @formats: Artifact timestamp
    pub fn format_timestamp(timestamp: &DateTime<Local>) -> String {
        timestamp.format(ARTIFACT_TIMESTAMP_FORMAT).to_string()
    }

    // @generates: Artifact file name
    // @params: prefix, timestamp, language_code, extension
    // @returns: "{prefix}_{YYYYMMDD_HHMMSS}_{language_code}.{extension}"
    pub fn artifact_file_name(
        prefix: &str,
        timestamp: &DateTime<Local>,
        language_code: &str,
        extension: &str,
    ) -> String {
        format!(
            "{}_{}_{}.{}",
            prefix,
            Self::format_timestamp(timestamp),
            language_code,
            extension.trim_start_matches('.')
        )
    }

    /// Create a new file named after `file_name` inside `dir`.
    ///
    /// The file is opened with `create_new`, so an existing artifact is never
    /// overwritten. When the name is taken, `_1`, `_2`, ... is inserted before
    /// the extension until a free name is found.
    pub fn create_unique_file<P: AsRef<Path>>(dir: P, file_name: &str) -> io::Result<(File, PathBuf)> {
        let dir = dir.as_ref();

        for attempt in 0..MAX_NAME_SUFFIX {
            let path = dir.join(Self::suffixed_name(file_name, attempt));

            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => return Ok((file, path)),
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e),
            }
        }

        Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("no free file name for {:?} in {:?}", file_name, dir),
        ))
    }

    // @returns: `file_name` with "_{suffix}" before the extension, unchanged for 0
    pub fn suffixed_name(file_name: &str, suffix: u32) -> String {
        match (suffix, file_name.rsplit_once('.')) {
            (0, _) => file_name.to_string(),
            (n, Some((stem, ext))) => format!("{}_{}.{}", stem, n, ext),
            (n, None) => format!("{}_{}", file_name, n),
        }
    }

    /// Suffix [`create_unique_file`](Self::create_unique_file) inserted when it
    /// turned `file_name` into the name of `path`; 0 when none was needed
    pub fn name_suffix<P: AsRef<Path>>(path: P, file_name: &str) -> u32 {
        let Some(actual) = path.as_ref().file_name().and_then(|name| name.to_str()) else {
            return 0;
        };
        let (stem, extension) = match file_name.rsplit_once('.') {
            Some((stem, ext)) => (stem, Some(ext)),
            None => (file_name, None),
        };

        let rest = match extension {
            Some(ext) => actual.strip_suffix(ext).and_then(|rest| rest.strip_suffix('.')),
            None => Some(actual),
        };
        rest.and_then(|rest| rest.strip_prefix(stem))
            .and_then(|rest| rest.strip_prefix('_'))
            .and_then(|counter| counter.parse().ok())
            .unwrap_or(0)
    }

    /// Write through a buffered handle and flush it before returning.
    ///
    /// The handle is dropped on every path, including when `body` fails.
    pub fn write_with<F>(file: File, body: F) -> io::Result<()>
    where
        F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
    {
        let mut writer = BufWriter::new(file);
        body(&mut writer)?;
        writer.flush()?;
        writer.get_ref().sync_all()
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> io::Result<String> {
        fs::read_to_string(path)
    }

    /// Size of a file in bytes
    pub fn file_size<P: AsRef<Path>>(path: P) -> io::Result<u64> {
        Ok(fs::metadata(path)?.len())
    }
}
