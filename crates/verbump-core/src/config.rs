//! Run configuration
//!
//! A [`BumpConfig`] comes from an optional TOML file and from command-line
//! overrides. [`BumpConfig::resolve`] validates the merged result into the
//! pair, targets and rewriter of one run.
//!
//! ```toml
//! from = "0.6.0"
//! to = "0.7.0"
//! targets = ["Cargo.toml", "src/uucore/Cargo.toml"]
//! discover = true
//! mode = "structural"
//! keys = ["package.version"]
//! dependencies = ["uucore"]
//! fail_fast = false
//! ```

use crate::error::ConfigError;
use crate::key_path::KeyPath;
use crate::pair::VersionPair;
use crate::rewriter::{FailurePolicy, RewriteMode, Rewriter};
use crate::targets::{TargetList, DEFAULT_MANIFEST_NAME};
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Config file looked up in the root directory when none is named
pub const DEFAULT_CONFIG_FILE: &str = "verbump.toml";

/// Name of a rewrite mode in configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeName {
    /// Plain substring replacement
    #[default]
    Literal,
    /// Key-scoped TOML rewrite
    Structural,
}

impl FromStr for ModeName {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "literal" => Ok(Self::Literal),
            "structural" => Ok(Self::Structural),
            other => Err(ConfigError::UnknownMode(other.to_string())),
        }
    }
}

/// Unvalidated settings for one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BumpConfig {
    /// Version being replaced
    pub from: Option<String>,
    /// Version written in its place
    pub to: Option<String>,
    /// Explicit manifest paths, relative to the root
    #[serde(default)]
    pub targets: Vec<PathBuf>,
    /// Walk the root for manifests
    #[serde(default)]
    pub discover: bool,
    /// Rewrite mode
    pub mode: Option<ModeName>,
    /// Structural keys to rewrite
    #[serde(default)]
    pub keys: Vec<String>,
    /// Dependencies whose version requirement is bumped too (structural mode)
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Stop at the first failed file
    #[serde(default)]
    pub fail_fast: bool,
}

/// Validated settings for one run
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Version pair
    pub pair: VersionPair,
    /// Files to rewrite
    pub targets: TargetList,
    /// Configured rewriter
    pub rewriter: Rewriter,
}

impl BumpConfig {
    /// Parse config text; `origin` names the source in errors
    ///
    /// # Errors
    /// `ConfigError::Parse` for invalid TOML or unknown fields
    pub fn parse(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Load config file
    ///
    /// # Errors
    /// `ConfigError::Read` or `ConfigError::Parse`
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }

    /// Load config file if it exists
    ///
    /// # Errors
    /// Same as [`BumpConfig::load`], except a missing file is `Ok(None)`
    pub fn load_optional(path: &Path) -> Result<Option<Self>, ConfigError> {
        match Self::load(path) {
            Ok(config) => Ok(Some(config)),
            Err(ConfigError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Overlay `overrides` on top of `self`
    ///
    /// Set options and non-empty lists in `overrides` win; flags are or-ed.
    #[must_use]
    pub fn merge(self, overrides: BumpConfig) -> Self {
        Self {
            from: overrides.from.or(self.from),
            to: overrides.to.or(self.to),
            targets: non_empty_or(overrides.targets, self.targets),
            discover: overrides.discover || self.discover,
            mode: overrides.mode.or(self.mode),
            keys: non_empty_or(overrides.keys, self.keys),
            dependencies: non_empty_or(overrides.dependencies, self.dependencies),
            fail_fast: overrides.fail_fast || self.fail_fast,
        }
    }

    /// Validate into a runnable configuration
    ///
    /// Relative targets are resolved against `root`. Keys or dependencies
    /// without a mode select structural mode.
    ///
    /// # Errors
    /// - `ConfigError::Missing` if `from` or `to` is unset
    /// - `ConfigError::Pair` for an invalid pair
    /// - `ConfigError::Targets` when no target is listed or discovered
    /// - `ConfigError::Key` for an invalid key or dependency name
    /// - `ConfigError::ScopedLiteral` for keys or dependencies in literal mode
    pub fn resolve(self, root: &Path) -> Result<ResolvedConfig, ConfigError> {
        let from = self.from.ok_or(ConfigError::Missing("from"))?;
        let to = self.to.ok_or(ConfigError::Missing("to"))?;
        let pair = VersionPair::new(from, to)?;

        let targets = if self.discover {
            let mut discovered = TargetList::discover(root, DEFAULT_MANIFEST_NAME)?;
            if !self.targets.is_empty() {
                discovered.merge(TargetList::with_root(root, &self.targets)?);
            }
            discovered
        } else {
            TargetList::with_root(root, &self.targets)?
        };

        let scoped = !self.keys.is_empty() || !self.dependencies.is_empty();
        let mode_name = match self.mode {
            Some(ModeName::Literal) if scoped => return Err(ConfigError::ScopedLiteral),
            Some(mode) => mode,
            None if scoped => ModeName::Structural,
            None => ModeName::default(),
        };
        let mode = match mode_name {
            ModeName::Literal => RewriteMode::Literal,
            ModeName::Structural => {
                let mut keys = if self.keys.is_empty() {
                    KeyPath::defaults()
                } else {
                    KeyPath::parse_all(&self.keys)?
                };
                for name in &self.dependencies {
                    keys.extend(KeyPath::dependency_versions(name)?);
                }
                RewriteMode::Structural { keys }
            }
        };
        let policy = if self.fail_fast {
            FailurePolicy::Abort
        } else {
            FailurePolicy::Continue
        };

        tracing::debug!(
            "Resolved config: {} over {} targets, {:?}, {:?}",
            pair,
            targets.len(),
            mode,
            policy
        );

        Ok(ResolvedConfig {
            pair,
            targets,
            rewriter: Rewriter::new(mode, policy),
        })
    }
}

fn non_empty_or<T>(preferred: Vec<T>, fallback: Vec<T>) -> Vec<T> {
    if preferred.is_empty() {
        fallback
    } else {
        preferred
    }
}
