//! Structural manifest model
//!
//! Wraps a format-preserving TOML document so that a single value can be
//! rewritten by [`KeyPath`] while every other byte of the file (comments,
//! ordering, whitespace) stays as written.

use crate::error::ManifestError;
use crate::key_path::KeyPath;
use crate::pair::VersionPair;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use toml_edit::{DocumentMut, Item, Value};

/// Requirement operators kept in front of a rewritten version, longest first
///
/// Upper bounds (`<`, `<=`) and strict lower bounds (`>`) are left alone: moving
/// them to the new version would change which releases they admit.
const REQUIREMENT_OPERATORS: [&str; 4] = [">=", "=", "^", "~"];

/// Parsed manifest
#[derive(Debug, Clone)]
pub struct ManifestDocument {
    doc: DocumentMut,
}

impl ManifestDocument {
    /// String value at path
    ///
    /// A bare-string dependency (`foo = "1.0"`) answers for `...foo.version`.
    #[must_use]
    pub fn get(&self, path: &KeyPath) -> Option<&str> {
        let mut current = self.doc.as_item();
        for segment in path.parent_segments() {
            current = current.as_table_like()?.get(segment.as_str())?;
        }
        if current.is_str() && path.last() == "version" {
            return current.as_str();
        }
        current.as_table_like()?.get(path.last())?.as_str()
    }

    /// Rewrite the value at path if it equals `pair.from`
    ///
    /// Version requirements are matched too: `">=0.6.0"` becomes `">=0.7.0"`.
    /// Returns whether the value changed. A missing path is not an error and
    /// leaves the document as it was: lookups never insert tables or keys.
    pub fn rewrite(&mut self, path: &KeyPath, pair: &VersionPair) -> bool {
        let mut current = self.doc.as_item_mut();
        for segment in path.parent_segments() {
            current = match lookup_mut(current, segment.as_str()) {
                Some(item) => item,
                None => return false,
            };
        }
        if current.is_str() && path.last() == "version" {
            return rewrite_item(current, pair);
        }
        match lookup_mut(current, path.last()) {
            Some(item) => rewrite_item(item, pair),
            None => false,
        }
    }

    /// Rewrite every path, returning the number of values changed
    pub fn rewrite_all(&mut self, paths: &[KeyPath], pair: &VersionPair) -> usize {
        paths.iter().filter(|path| self.rewrite(path, pair)).count()
    }
}

impl FromStr for ManifestDocument {
    type Err = ManifestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self { doc: s.parse()? })
    }
}

impl Display for ManifestDocument {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.doc)
    }
}

/// Child of a table or inline table, without inserting it when absent
fn lookup_mut<'a>(item: &'a mut Item, key: &str) -> Option<&'a mut Item> {
    item.as_table_like_mut()?.get_mut(key)
}

fn rewrite_item(item: &mut Item, pair: &VersionPair) -> bool {
    let Some(value) = item.as_value_mut() else {
        return false;
    };
    let Some(next) = value.as_str().and_then(|current| bump_requirement(current, pair)) else {
        return false;
    };

    let decor = value.decor().clone();
    let mut replacement = Value::from(next);
    *replacement.decor_mut() = decor;
    *value = replacement;
    true
}

/// New text for a version or version requirement, if it refers to `pair.from`
fn bump_requirement(current: &str, pair: &VersionPair) -> Option<String> {
    if current == pair.from_version() {
        return Some(pair.to_version().to_string());
    }
    let op = REQUIREMENT_OPERATORS
        .iter()
        .find(|op| current.starts_with(*op))?;
    let rest = &current[op.len()..];
    let version = rest.trim_start();
    if version != pair.from_version() {
        return None;
    }
    let spacing = &rest[..rest.len() - version.len()];
    Some(format!("{op}{spacing}{}", pair.to_version()))
}
