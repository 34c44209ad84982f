// file: src/utils/fs.rs
// version: 1.0.0
// guid: e94b7d02-5c18-4f3a-b6e9-1a8d42c7f055

//! Filesystem helpers for the config emitters.

use std::fs::{DirBuilder, File, OpenOptions};
use std::os::unix::fs::DirBuilderExt;
use std::path::Path;

use crate::error::{NetConfigError, Result};

/// Create `path` and any missing parents with mode 0755.
pub fn mkdir_p(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }

    DirBuilder::new()
        .recursive(true)
        .mode(0o755)
        .create(path)
        .map_err(|source| NetConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// Open `path` for writing, truncating any previous content.
pub fn create_file(path: &Path) -> Result<File> {
    File::create(path).map_err(|source| NetConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Open an existing `path` for appending.
pub fn append_file(path: &Path) -> Result<File> {
    OpenOptions::new()
        .append(true)
        .open(path)
        .map_err(|source| NetConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// Write a fully rendered fragment to `path` in one shot.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).map_err(|source| NetConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}
