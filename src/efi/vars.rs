// file: src/efi/vars.rs
// version: 1.0.0
// guid: 2c94e7b1-58d0-4f36-a1c8-7e62d40b9f53

//! Reading of EFI variable pseudo-files.

use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::error::{NetConfigError, Result};
use crate::utils::utf16::utf16le_to_string;

/// Default mount point of the EFI variable filesystem.
pub const EFIVARS_PATH: &str = "/sys/firmware/efi/efivars";

/// Accessor for EFI variables.
///
/// The root is configurable so tests can point it at a scratch
/// directory populated with crafted variable files.
#[derive(Debug, Clone)]
pub struct EfiVars {
    root: PathBuf,
}

impl Default for EfiVars {
    fn default() -> Self {
        Self::new()
    }
}

impl EfiVars {
    pub fn new() -> Self {
        Self {
            root: PathBuf::from(EFIVARS_PATH),
        }
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Whether the variable filesystem is accessible at all.
    pub fn is_supported(&self) -> bool {
        self.root.exists()
    }

    /// Read the payload of variable `<name>-<guid>`.
    ///
    /// Only regular files are accepted, with distinct errors for
    /// directories, symlinks and anything else. The leading 4-byte
    /// efivarfs attribute header is stripped from the returned data.
    pub fn read(&self, name: &str, guid: &str) -> Result<Vec<u8>> {
        let path = self.root.join(format!("{name}-{guid}"));

        let meta = fs::symlink_metadata(&path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                NetConfigError::VarNotFound(name.to_string())
            } else {
                NetConfigError::Io {
                    path: path.clone(),
                    source,
                }
            }
        })?;

        if meta.is_dir() {
            return Err(NetConfigError::IsDirectory(path));
        }
        if meta.file_type().is_symlink() {
            return Err(NetConfigError::IsSymlink(path));
        }
        if !meta.is_file() {
            return Err(NetConfigError::NotRegular(path));
        }

        let buf = fs::read(&path).map_err(|source| NetConfigError::Io {
            path: path.clone(),
            source,
        })?;

        // efivarfs files start with 4 bytes of attributes
        if buf.len() < 4 {
            return Err(NetConfigError::TruncatedVar);
        }

        debug!("Read EFI variable {} ({} bytes)", path.display(), buf.len());
        Ok(buf[4..].to_vec())
    }

    /// Read a variable and decode its payload as a UTF-16LE string.
    pub fn read_string(&self, name: &str, guid: &str) -> Result<String> {
        let data = self.read(name, guid)?;
        utf16le_to_string(&data)
    }
}
