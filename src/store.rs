use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

pub const IMAGE_EXTENSION: &str = "jpeg";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to create directory {}: {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("Failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOutcome {
    Saved,
    AlreadyExists,
}

/// Create the store directory (and parents) if missing
pub fn ensure_dir(dir: &Path) -> Result<(), StoreError> {
    fs::create_dir_all(dir).map_err(|source| StoreError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}

/// Turn an image title into a file stem.
///
/// Separators and NUL become `_`; a blank title becomes `bing-YYYY-MM-DD`.
pub fn file_stem(title: &str) -> String {
    let cleaned: String = title
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            c => c,
        })
        .collect();
    if cleaned.is_empty() {
        format!("bing-{}", chrono::Local::now().format("%Y-%m-%d"))
    } else {
        cleaned
    }
}

/// `<dir>/<title>.jpeg`
pub fn image_path(dir: &Path, title: &str) -> PathBuf {
    dir.join(format!("{}.{}", file_stem(title), IMAGE_EXTENSION))
}

/// Write `bytes` to `path` unless the file already exists.
///
/// The parent directory is created first.
pub fn save_image(bytes: &[u8], path: &Path) -> Result<StoreOutcome, StoreError> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    if path.exists() {
        return Ok(StoreOutcome::AlreadyExists);
    }

    let write_err = |source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };
    // create_new guards against a file appearing between the check and the open
    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            return Ok(StoreOutcome::AlreadyExists);
        }
        Err(e) => return Err(write_err(e)),
    };
    file.write_all(bytes).map_err(write_err)?;
    file.flush().map_err(write_err)?;
    Ok(StoreOutcome::Saved)
}
