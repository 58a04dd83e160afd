//! Key paths into TOML manifests
//!
//! Provides [`KeyPath`] for addressing a single value inside a manifest.
//!
//! # Examples
//! - `package.version` → `[package] version = "..."`
//! - `workspace.package.version` → `[workspace.package] version = "..."`
//! - `dependencies.uucore.version` → `uucore = { version = "..." }` or `uucore = "..."`

use crate::error::ManifestError;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Keys rewritten by structural mode when none are configured
pub const DEFAULT_KEYS: [&str; 2] = ["package.version", "workspace.package.version"];

/// Tables that declare dependencies
const DEPENDENCY_SECTIONS: [&str; 4] = [
    "dependencies",
    "dev-dependencies",
    "build-dependencies",
    "workspace.dependencies",
];

/// Dotted path to a value inside a manifest
///
/// Always has at least one segment and no empty segments.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeyPath(Vec<String>);

impl KeyPath {
    /// Get path segments
    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Get number of segments
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`: parsing rejects empty paths
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Segments leading to the final key
    #[inline]
    #[must_use]
    pub fn parent_segments(&self) -> &[String] {
        &self.0[..self.0.len() - 1]
    }

    /// Final key
    #[inline]
    #[must_use]
    pub fn last(&self) -> &str {
        &self.0[self.0.len() - 1]
    }

    /// Default structural key set
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        DEFAULT_KEYS
            .iter()
            .filter_map(|key| key.parse().ok())
            .collect()
    }

    /// Version keys of a named dependency in every dependency section
    ///
    /// # Errors
    /// `ManifestError::InvalidKeyPath` if `name` is empty or dotted
    pub fn dependency_versions(name: &str) -> Result<Vec<Self>, ManifestError> {
        if name.is_empty() || name.contains('.') {
            return Err(ManifestError::InvalidKeyPath(name.to_string()));
        }
        Ok(DEPENDENCY_SECTIONS
            .iter()
            .map(|section| {
                let mut segments: Vec<String> = section.split('.').map(str::to_string).collect();
                segments.push(name.to_string());
                segments.push("version".to_string());
                Self(segments)
            })
            .collect())
    }

    /// Parse a list of dotted keys
    ///
    /// # Errors
    /// Returns the first invalid key
    pub fn parse_all<I, S>(keys: I) -> Result<Vec<Self>, ManifestError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        keys.into_iter().map(|k| k.as_ref().parse()).collect()
    }
}

impl Display for KeyPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

impl FromStr for KeyPath {
    type Err = ManifestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments: Vec<String> = s.trim().split('.').map(str::to_string).collect();
        if segments.iter().any(String::is_empty) {
            return Err(ManifestError::InvalidKeyPath(s.to_string()));
        }
        Ok(Self(segments))
    }
}
