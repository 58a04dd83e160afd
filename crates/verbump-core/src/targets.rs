//! Target file lists
//!
//! An ordered, non-empty list of manifest paths. Paths can be listed
//! explicitly or discovered by walking a directory tree.

use crate::error::TargetError;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Manifest file name searched for by default
pub const DEFAULT_MANIFEST_NAME: &str = "Cargo.toml";

/// Directory names never descended into during discovery
const SKIPPED_DIRS: [&str; 2] = ["target", "node_modules"];

/// Ordered list of files to rewrite
///
/// Duplicates are dropped keeping the first occurrence, so a file is never
/// rewritten twice in one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetList {
    paths: Vec<PathBuf>,
}

impl TargetList {
    /// Build from explicit paths
    ///
    /// # Errors
    /// `TargetError::Empty` if `paths` yields nothing
    pub fn new<I, P>(paths: I) -> Result<Self, TargetError>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut list = Self { paths: Vec::new() };
        list.extend(paths.into_iter().map(Into::into));
        if list.paths.is_empty() {
            return Err(TargetError::Empty);
        }
        Ok(list)
    }

    /// Build from paths relative to `root`
    ///
    /// Absolute paths are kept as given.
    ///
    /// # Errors
    /// `TargetError::Empty` if `paths` yields nothing
    pub fn with_root<I, P>(root: &Path, paths: I) -> Result<Self, TargetError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        Self::new(paths.into_iter().map(|p| root.join(p)))
    }

    /// Collect every file named `file_name` below `root`
    ///
    /// Hidden directories and build output directories are skipped. Results
    /// are sorted by path.
    ///
    /// # Errors
    /// - `TargetError::Discovery` if the walk fails
    /// - `TargetError::NothingDiscovered` if no file matched
    pub fn discover(root: &Path, file_name: &str) -> Result<Self, TargetError> {
        let mut found = Vec::new();
        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_skipped(entry));

        for entry in walker {
            let entry = entry.map_err(|source| TargetError::Discovery {
                root: root.to_path_buf(),
                source,
            })?;
            if entry.file_type().is_file() && entry.file_name() == file_name {
                found.push(entry.into_path());
            }
        }

        tracing::debug!(
            "Discovered {} {} files under {}",
            found.len(),
            file_name,
            root.display()
        );

        if found.is_empty() {
            return Err(TargetError::NothingDiscovered {
                root: root.to_path_buf(),
                file_name: file_name.to_string(),
            });
        }
        found.sort();
        Ok(Self { paths: found })
    }

    /// Append paths not already present
    pub fn extend<I>(&mut self, paths: I)
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let mut seen: HashSet<PathBuf> = self.paths.iter().cloned().collect();
        for path in paths {
            if seen.insert(path.clone()) {
                self.paths.push(path);
            }
        }
    }

    /// Append another list
    pub fn merge(&mut self, other: TargetList) {
        self.extend(other.paths);
    }

    /// Get paths in processing order
    #[inline]
    #[must_use]
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Get number of targets
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Always `false` for a constructed list
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Iterate paths in processing order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter().map(PathBuf::as_path)
    }
}

fn is_skipped(entry: &DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.') || SKIPPED_DIRS.contains(&name))
}
