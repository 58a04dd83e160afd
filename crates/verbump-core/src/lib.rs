//! verbump core
//!
//! Bumps a version string across an explicit list of manifest files before a
//! release.
//!
//! # Core Operations
//!
//! - **Literal rewrite**: replace every `version = "<from>"` with `version = "<to>"`
//! - **Structural rewrite**: parse each manifest as TOML and rewrite only the
//!   named keys, leaving unrelated fields that share the same value alone
//! - **Dry run**: compute per-file outcomes without writing
//!
//! # Architecture
//!
//! ```text
//! BumpConfig (file + CLI) → resolve → VersionPair + TargetList + Rewriter
//!                                          ↓
//!                     per file: read → LiteralPattern | ManifestDocument → write
//!                                          ↓
//!                                    RewriteReport
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use verbump_core::{rewrite, VersionPair};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pair = VersionPair::new("0.6.0", "0.7.0")?;
//! let modified = rewrite(&pair, &["Cargo.toml", "src/uucore/Cargo.toml"])?;
//! println!("{modified} files modified");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod config;
pub mod error;
pub mod key_path;
pub mod manifest;
pub mod pair;
pub mod pattern;
pub mod rewriter;
pub mod targets;

// Re-exports for convenience
pub use config::{BumpConfig, ModeName, ResolvedConfig, DEFAULT_CONFIG_FILE};
pub use error::{
    ConfigError, FileError, ManifestError, PairError, RewriteError, RewriteResult, TargetError,
};
pub use key_path::KeyPath;
pub use manifest::ManifestDocument;
pub use pair::VersionPair;
pub use pattern::LiteralPattern;
pub use rewriter::{
    rewrite, FailurePolicy, FileOutcome, FileReport, PlannedEdit, RewriteMode, RewriteReport,
    Rewriter,
};
pub use targets::{TargetList, DEFAULT_MANIFEST_NAME};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for running a version bump
    pub use crate::config::{BumpConfig, ResolvedConfig};
    pub use crate::error::{FileError, RewriteError};
    pub use crate::pair::VersionPair;
    pub use crate::rewriter::{
        rewrite, FailurePolicy, FileOutcome, RewriteMode, RewriteReport, Rewriter,
    };
    pub use crate::targets::TargetList;
}
