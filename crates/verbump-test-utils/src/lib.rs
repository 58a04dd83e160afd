//! Testing utilities for verbump workspace
//!
//! Shared fixtures: temporary manifest trees and sample manifests.

#![allow(missing_docs)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary directory holding manifest files
///
/// Removed when dropped.
#[derive(Debug)]
pub struct ManifestTree {
    dir: TempDir,
}

impl Default for ManifestTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ManifestTree {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    /// Write `content` at `rel`, creating parent directories
    pub fn write(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.path(rel)).unwrap()
    }

    pub fn read_bytes(&self, rel: &str) -> Vec<u8> {
        fs::read(self.path(rel)).unwrap()
    }
}

pub fn package_manifest(name: &str, version: &str) -> String {
    format!("[package]\nname = \"{name}\"\nversion = \"{version}\"\nedition = \"2021\"\n")
}

/// Manifest whose dependency shares the package's version string
pub fn manifest_with_dependency(name: &str, version: &str, dep: &str, dep_version: &str) -> String {
    format!(
        "[package]\nname = \"{name}\"\nversion = \"{version}\"\n\n\
         [dependencies]\n{dep} = {{ version = \"{dep_version}\", path = \"../{dep}\" }}\n"
    )
}

/// Workspace root manifest with `version` in `[workspace.package]`
pub fn workspace_manifest(version: &str, members: &[&str]) -> String {
    let members = members
        .iter()
        .map(|m| format!("    \"{m}\",\n"))
        .collect::<String>();
    format!(
        "[workspace]\nmembers = [\n{members}]\n\n[workspace.package]\nversion = \"{version}\"\n"
    )
}

/// Tree shaped like a multi-utility repository
///
/// `Cargo.toml`, `src/uucore/Cargo.toml` and one manifest per utility under
/// `src/uu/`, all at `version`.
pub fn utility_tree(version: &str, utilities: &[&str]) -> ManifestTree {
    let tree = ManifestTree::new();
    tree.write("Cargo.toml", &package_manifest("coreutils", version));
    tree.write("src/uucore/Cargo.toml", &package_manifest("uucore", version));
    for util in utilities {
        tree.write(
            &format!("src/uu/{util}/Cargo.toml"),
            &manifest_with_dependency(&format!("uu_{util}"), version, "uucore", version),
        );
    }
    tree
}
