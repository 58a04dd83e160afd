//! Error types for the version rewriter
//!
//! Provides error handling for:
//! - Version pair validation
//! - Target list construction and discovery
//! - Per-file I/O (read and in-place write)
//! - Structural manifest parsing
//! - Configuration loading and resolution

use crate::rewriter::RewriteReport;
use std::io;
use std::path::{Path, PathBuf};

/// Errors validating a `(from, to)` version pair
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PairError {
    /// Source version is empty
    #[error("source version is empty")]
    EmptyFrom,

    /// Target version is empty
    #[error("target version is empty")]
    EmptyTo,

    /// Source and target are the same string
    #[error("source and target versions are identical: {0}")]
    Identical(String),

    /// Version contains a character that cannot appear inside a quoted field
    #[error("version {value:?} contains forbidden character {ch:?}")]
    InvalidCharacter {
        /// Version as given
        value: String,
        /// Offending character
        ch: char,
    },
}

/// Errors building the list of files to rewrite
#[derive(Debug, thiserror::Error)]
pub enum TargetError {
    /// No target paths were given
    #[error("no target files given")]
    Empty,

    /// Walking the root directory failed
    #[error("failed to walk {}: {source}", .root.display())]
    Discovery {
        /// Directory being walked
        root: PathBuf,
        /// Underlying walk error
        #[source]
        source: walkdir::Error,
    },

    /// Discovery finished without finding a single manifest
    #[error("no files named {file_name} found under {}", .root.display())]
    NothingDiscovered {
        /// Directory that was walked
        root: PathBuf,
        /// Manifest name searched for
        file_name: String,
    },
}

/// Errors in the structural manifest model
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ManifestError {
    /// Manifest is not valid TOML
    #[error("invalid TOML: {0}")]
    Parse(String),

    /// Key path is empty or has an empty segment
    #[error("invalid key path: {0:?}")]
    InvalidKeyPath(String),
}

impl From<toml_edit::TomlError> for ManifestError {
    fn from(err: toml_edit::TomlError) -> Self {
        Self::Parse(err.message().to_string())
    }
}

/// Failure processing one listed file
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    /// Listed path does not exist
    #[error("file not found: {}", .path.display())]
    NotFound {
        /// Listed path
        path: PathBuf,
    },

    /// File cannot be read or written
    #[error("permission denied: {}", .path.display())]
    PermissionDenied {
        /// Listed path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// File content is not UTF-8 text
    #[error("not a UTF-8 text file: {}", .path.display())]
    InvalidUtf8 {
        /// Listed path
        path: PathBuf,
    },

    /// Any other I/O failure
    #[error("io error on {}: {source}", .path.display())]
    Io {
        /// Listed path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Structural mode could not parse the manifest
    #[error("cannot parse {}: {source}", .path.display())]
    Manifest {
        /// Listed path
        path: PathBuf,
        /// Parse failure
        #[source]
        source: ManifestError,
    },
}

impl FileError {
    /// Classify an I/O error for path
    pub fn from_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound { path },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { path, source },
            io::ErrorKind::InvalidData => Self::InvalidUtf8 { path },
            _ => Self::Io { path, source },
        }
    }

    /// Path the error refers to
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound { path }
            | Self::PermissionDenied { path, .. }
            | Self::InvalidUtf8 { path }
            | Self::Io { path, .. }
            | Self::Manifest { path, .. } => path,
        }
    }

    /// Check if the file was missing
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Top-level rewrite error
#[derive(Debug, thiserror::Error)]
pub enum RewriteError {
    /// Target list could not be built
    #[error("target error: {0}")]
    Targets(#[from] TargetError),

    /// At least one file failed; the report holds every outcome
    #[error("{} of {} files failed", .0.failed(), .0.files().len())]
    Incomplete(Box<RewriteReport>),
}

impl RewriteError {
    /// Report of the run, if files were processed
    #[must_use]
    pub fn report(&self) -> Option<&RewriteReport> {
        match self {
            Self::Incomplete(report) => Some(&**report),
            Self::Targets(_) => None,
        }
    }
}

/// Errors loading or resolving configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("cannot read config {}: {source}", .path.display())]
    Read {
        /// Config file path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Config file is not valid
    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        /// Config file path
        path: PathBuf,
        /// TOML or schema error
        #[source]
        source: toml::de::Error,
    },

    /// Required setting absent from both file and command line
    #[error("missing required setting: {0}")]
    Missing(&'static str),

    /// Unknown rewrite mode name
    #[error("unknown mode {0:?} (expected \"literal\" or \"structural\")")]
    UnknownMode(String),

    /// Keys or dependencies given while literal mode is selected
    #[error("keys and dependencies require structural mode, but literal mode was selected")]
    ScopedLiteral,

    /// Version pair rejected
    #[error("version pair: {0}")]
    Pair(#[from] PairError),

    /// Target list rejected
    #[error("targets: {0}")]
    Targets(#[from] TargetError),

    /// Key path rejected
    #[error("key: {0}")]
    Key(#[from] ManifestError),
}

/// Result type alias for rewrite operations
pub type RewriteResult<T> = Result<T, RewriteError>;
