//! Locating and reading the text file a book is printed from.
//!
//! Names are resolved against a data directory. `.txt` is appended when
//! missing, `../` is always refused, and the canonical result has to stay
//! inside the canonical data directory even when subdirectories or absolute
//! paths are allowed.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

const SOURCE_EXTENSION: &str = ".txt";

/// What a source name is allowed to look like, and how big the file may be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourcePolicy {
    pub allow_subdirs: bool,
    pub allow_absolute_paths: bool,
    pub max_file_bytes: u64,
}

impl Default for SourcePolicy {
    fn default() -> Self {
        SourcePolicy {
            allow_subdirs: false,
            allow_absolute_paths: false,
            max_file_bytes: 2 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("path `{0}` tries to leave the data directory")]
    PathTraversal(String),

    #[error("subdirectories are not allowed: `{0}`")]
    SubdirNotAllowed(String),

    #[error("absolute paths are not allowed: `{0}`")]
    AbsoluteNotAllowed(String),

    #[error("{} resolves outside the data directory", .0.display())]
    OutsideDataDir(PathBuf),

    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("file too large: {size} bytes (max: {limit})")]
    TooLarge { size: u64, limit: u64 },

    #[error("failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid UTF-8", .0.display())]
    NotUtf8(PathBuf),
}

/// `name` with `.txt` appended unless it already ends with it (any case).
pub fn source_file_name(name: &str) -> String {
    if name.to_lowercase().ends_with(SOURCE_EXTENSION) {
        name.to_string()
    } else {
        format!("{name}{SOURCE_EXTENSION}")
    }
}

/// Resolve a requested source name to a canonical path inside `data_dir`.
pub fn resolve_source(
    data_dir: &Path,
    name: &str,
    policy: &SourcePolicy,
) -> Result<PathBuf, SourceError> {
    let file_name = source_file_name(name.trim());
    if file_name.contains("../") || file_name.contains("..\\") {
        return Err(SourceError::PathTraversal(file_name));
    }

    let requested = Path::new(&file_name);
    let path = if requested.is_absolute() {
        if !policy.allow_absolute_paths {
            return Err(SourceError::AbsoluteNotAllowed(file_name));
        }
        requested.to_path_buf()
    } else {
        if !policy.allow_subdirs && file_name.contains(['/', '\\']) {
            return Err(SourceError::SubdirNotAllowed(file_name));
        }
        data_dir.join(requested)
    };

    let root = data_dir.canonicalize().map_err(|source| SourceError::Io {
        path: data_dir.to_path_buf(),
        source,
    })?;
    let target = path.canonicalize().map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            SourceError::NotFound(path.clone())
        } else {
            SourceError::Io {
                path: path.clone(),
                source,
            }
        }
    })?;

    if !target.starts_with(&root) {
        warn!(path = %path.display(), "Refusing source outside the data directory");
        return Err(SourceError::OutsideDataDir(path));
    }
    debug!(path = %target.display(), "Resolved source file");
    Ok(target)
}

/// Read `path` as UTF-8 text after checking it against the size ceiling.
pub fn read_source(path: &Path, max_file_bytes: u64) -> Result<String, SourceError> {
    let meta = fs::metadata(path).map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            SourceError::NotFound(path.to_path_buf())
        } else {
            SourceError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    if !meta.is_file() {
        return Err(SourceError::NotFound(path.to_path_buf()));
    }
    if meta.len() > max_file_bytes {
        return Err(SourceError::TooLarge {
            size: meta.len(),
            limit: max_file_bytes,
        });
    }

    let bytes = fs::read(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    String::from_utf8(bytes).map_err(|_| SourceError::NotUtf8(path.to_path_buf()))
}
