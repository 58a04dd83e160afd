//! Literal substitution patterns
//!
//! The literal mode matches the exact text `version = "<from>"`. It is a
//! plain substring match: every field that happens to carry the same quoted
//! value is rewritten, including dependency entries.

use crate::pair::VersionPair;

/// Result of applying a pattern to a text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    /// Rewritten text
    pub content: String,
    /// Number of occurrences replaced
    pub replacements: usize,
}

/// Literal needle/replacement pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralPattern {
    needle: String,
    replacement: String,
}

impl LiteralPattern {
    /// Pattern for the `version = "<from>"` field
    #[must_use]
    pub fn version_field(pair: &VersionPair) -> Self {
        Self {
            needle: quoted_field(pair.from_version()),
            replacement: quoted_field(pair.to_version()),
        }
    }

    /// Text searched for
    #[inline]
    #[must_use]
    pub fn needle(&self) -> &str {
        &self.needle
    }

    /// Text written in place of each match
    #[inline]
    #[must_use]
    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    /// Count non-overlapping occurrences in text
    #[must_use]
    pub fn count(&self, text: &str) -> usize {
        text.matches(self.needle.as_str()).count()
    }

    /// Replace every occurrence
    ///
    /// Returns `None` when the needle does not occur.
    #[must_use]
    pub fn apply(&self, text: &str) -> Option<Substitution> {
        let replacements = self.count(text);
        if replacements == 0 {
            return None;
        }
        Some(Substitution {
            content: text.replace(self.needle.as_str(), &self.replacement),
            replacements,
        })
    }
}

fn quoted_field(version: &str) -> String {
    format!("version = \"{version}\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern() -> LiteralPattern {
        LiteralPattern::version_field(&VersionPair::new("0.6.0", "0.7.0").unwrap())
    }

    #[test]
    fn builds_quoted_field() {
        let p = pattern();
        assert_eq!(p.needle(), "version = \"0.6.0\"");
        assert_eq!(p.replacement(), "version = \"0.7.0\"");
    }

    #[test]
    fn replaces_every_occurrence() {
        let text = "[package]\nversion = \"0.6.0\"\n\n\
                    [dependencies]\nfoo = { version = \"0.6.0\" }\n";
        let sub = pattern().apply(text).unwrap();
        assert_eq!(sub.replacements, 2);
        assert_eq!(
            sub.content,
            "[package]\nversion = \"0.7.0\"\n\n[dependencies]\nfoo = { version = \"0.7.0\" }\n"
        );
    }

    #[test]
    fn prerelease_suffix_does_not_match() {
        assert!(pattern().apply("version = \"0.6.0-beta\"\n").is_none());
    }

    #[test]
    fn spacing_must_match_exactly() {
        assert!(pattern().apply("version=\"0.6.0\"\n").is_none());
        assert_eq!(pattern().count("version = \"0.6.0\""), 1);
    }
}
