// file: src/error.rs
// version: 1.0.0
// guid: 3f8a2c91-6b4d-4e72-9a05-c1d8f4b27e63

//! Error types for the network-configuration agent.
//!
//! Every variant maps to a positive errno-style exit code so that the
//! binaries can terminate with the code of the first fatal failure, the
//! way the initrd expects.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, NetConfigError>;

/// Error types for the network-configuration agent
#[derive(Debug, Error)]
pub enum NetConfigError {
    #[error("Syntax error in entry {entry}: '{token}'")]
    Syntax { entry: usize, token: String },

    #[error("Invalid VLAN interface: {0}")]
    InvalidVlanId(String),

    #[error("Invalid netmask: {0}")]
    InvalidNetmask(String),

    #[error("Too many interfaces!")]
    TooManyInterfaces,

    #[error("Too many vlans!")]
    TooManyVlans,

    #[error("More than 2 gateways on one interface!")]
    TooManyGateways,

    #[error("More than 3 VLAN IDs!")]
    TooManyVlanRefs,

    #[error("Using a configuration file with additional arguments is not possible")]
    Usage,

    #[error("Failed to initialize logger: {0}")]
    LoggerInit(String),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("EFI variable '{0}' not found")]
    VarNotFound(String),

    #[error("'{}' is a directory", .0.display())]
    IsDirectory(PathBuf),

    #[error("'{}' is a symlink", .0.display())]
    IsSymlink(PathBuf),

    #[error("'{}' is not a regular file", .0.display())]
    NotRegular(PathBuf),

    #[error("EFI variable payload is shorter than the attribute header")]
    TruncatedVar,

    #[error("UTF-16 payload has odd length")]
    OddUtf16Length,

    #[error("UTF-16 code unit outside the ASCII range")]
    Utf16OutOfRange,

    #[error("Malformed boot entry")]
    MalformedBootEntry,

    #[error("Boot source not found")]
    SourceNotFound,

    #[error("No boot device found")]
    NoBootDevice,

    #[error("EFI variable filesystem is not accessible")]
    EfiUnsupported,
}

impl NetConfigError {
    /// Exit code for this error, a positive errno where one applies.
    pub fn exit_code(&self) -> i32 {
        match self {
            NetConfigError::Syntax { .. }
            | NetConfigError::InvalidVlanId(_)
            | NetConfigError::InvalidNetmask(_)
            | NetConfigError::TruncatedVar
            | NetConfigError::OddUtf16Length
            | NetConfigError::MalformedBootEntry
            | NetConfigError::LoggerInit(_) => libc::EINVAL,

            NetConfigError::TooManyInterfaces
            | NetConfigError::TooManyVlans
            | NetConfigError::TooManyGateways
            | NetConfigError::TooManyVlanRefs => libc::ENOMEM,

            NetConfigError::Usage => 1,

            NetConfigError::Io { source, .. } => source.raw_os_error().unwrap_or(libc::EIO),

            NetConfigError::VarNotFound(_) | NetConfigError::SourceNotFound => libc::ENOENT,
            NetConfigError::IsDirectory(_) => libc::EISDIR,
            NetConfigError::IsSymlink(_) => libc::ELOOP,
            NetConfigError::NotRegular(_) => libc::EBADFD,
            NetConfigError::Utf16OutOfRange => libc::ERANGE,
            NetConfigError::NoBootDevice => libc::ENODEV,
            NetConfigError::EfiUnsupported => libc::EOPNOTSUPP,
        }
    }

    /// Whether the error aborts a kernel-command-line run.
    ///
    /// Capacity overflows and I/O failures are always fatal; everything
    /// else only skips the offending token there. Configuration-file
    /// mode treats every error as fatal regardless.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            NetConfigError::TooManyInterfaces
                | NetConfigError::TooManyVlans
                | NetConfigError::TooManyGateways
                | NetConfigError::TooManyVlanRefs
                | NetConfigError::Io { .. }
        )
    }

    /// Whether this is the "not found" code that lets the boot-source
    /// resolver fall through to its next strategy.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            NetConfigError::VarNotFound(_) | NetConfigError::SourceNotFound
        )
    }
}

/// Shorthand used by the sub-parsers to report a bad directive with its
/// origin, mirroring the single diagnostic format the logs are grepped for.
pub fn syntax_error(entry: usize, token: &str) -> NetConfigError {
    NetConfigError::Syntax {
        entry,
        token: token.to_string(),
    }
}
