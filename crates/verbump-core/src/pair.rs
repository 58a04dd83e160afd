//! Version pairs
//!
//! Provides [`VersionPair`], the `(from, to)` tuple describing one release bump.

use crate::error::PairError;
use std::fmt::{self, Display, Formatter};

/// Characters that would break out of a quoted `version = "..."` field
const FORBIDDEN: [char; 3] = ['"', '\n', '\r'];

/// Source and target version of a release bump
///
/// Both sides are opaque strings. They are not required to be semver, but
/// must be non-empty, must differ, and must fit inside a quoted TOML string
/// without escaping.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionPair {
    from: String,
    to: String,
}

impl VersionPair {
    /// Create a validated pair
    ///
    /// # Errors
    /// - `PairError::EmptyFrom` / `PairError::EmptyTo` for empty sides
    /// - `PairError::InvalidCharacter` for quotes or line breaks
    /// - `PairError::Identical` when `from == to`
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Result<Self, PairError> {
        let from = from.into();
        let to = to.into();

        if from.is_empty() {
            return Err(PairError::EmptyFrom);
        }
        if to.is_empty() {
            return Err(PairError::EmptyTo);
        }
        check_characters(&from)?;
        check_characters(&to)?;
        if from == to {
            return Err(PairError::Identical(from));
        }

        Ok(Self { from, to })
    }

    /// Version being replaced
    #[inline]
    #[must_use]
    pub fn from_version(&self) -> &str {
        &self.from
    }

    /// Version written in its place
    #[inline]
    #[must_use]
    pub fn to_version(&self) -> &str {
        &self.to
    }

    /// Whether both sides parse as semantic versions
    #[must_use]
    pub fn is_semver(&self) -> bool {
        semver::Version::parse(&self.from).is_ok() && semver::Version::parse(&self.to).is_ok()
    }

    /// Whether the bump goes to a lower semantic version
    ///
    /// `false` when either side is not semver.
    #[must_use]
    pub fn is_downgrade(&self) -> bool {
        match (
            semver::Version::parse(&self.from),
            semver::Version::parse(&self.to),
        ) {
            (Ok(from), Ok(to)) => to < from,
            _ => false,
        }
    }
}

impl Display for VersionPair {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

fn check_characters(value: &str) -> Result<(), PairError> {
    match value.chars().find(|c| FORBIDDEN.contains(c)) {
        Some(ch) => Err(PairError::InvalidCharacter {
            value: value.to_string(),
            ch,
        }),
        None => Ok(()),
    }
}
