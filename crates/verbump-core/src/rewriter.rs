//! Version Rewriter
//!
//! Runs one substitution pass per target file, in order, rewriting each file
//! in place.
//!
//! # Workflow
//! 1. Read the file as UTF-8 text
//! 2. Compute the new content (literal or structural mode)
//! 3. Write it back only if something changed
//!
//! There is no cross-file atomicity: files already written stay written when
//! a later file fails.

use crate::error::{FileError, RewriteError, RewriteResult};
use crate::key_path::KeyPath;
use crate::manifest::ManifestDocument;
use crate::pair::VersionPair;
use crate::pattern::LiteralPattern;
use crate::targets::TargetList;
use std::fs;
use std::path::{Path, PathBuf};

/// How matches are located inside a file
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RewriteMode {
    /// Replace every `version = "<from>"` substring
    #[default]
    Literal,
    /// Parse as TOML and rewrite only the listed keys
    Structural {
        /// Keys to rewrite
        keys: Vec<KeyPath>,
    },
}

impl RewriteMode {
    /// Structural mode over the default key set
    #[must_use]
    pub fn structural() -> Self {
        Self::Structural {
            keys: KeyPath::defaults(),
        }
    }
}

/// What happens after a file fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Keep processing the remaining files
    #[default]
    Continue,
    /// Stop at the first failure; later files are skipped
    Abort,
}

/// Result for one target file
#[derive(Debug)]
pub enum FileOutcome {
    /// File rewritten (or would be, in a dry run)
    Modified {
        /// Number of occurrences or keys replaced
        replacements: usize,
    },
    /// Pattern absent; file left byte-for-byte as it was
    Unchanged,
    /// File could not be processed
    Failed(FileError),
    /// Not attempted because an earlier file failed under `Abort`
    Skipped,
}

/// Outcome for one path
#[derive(Debug)]
pub struct FileReport {
    /// Target path
    pub path: PathBuf,
    /// What happened
    pub outcome: FileOutcome,
}

/// Outcomes of a full pass, in target order
#[derive(Debug, Default)]
pub struct RewriteReport {
    files: Vec<FileReport>,
    dry_run: bool,
}

impl RewriteReport {
    /// Per-file outcomes
    #[inline]
    #[must_use]
    pub fn files(&self) -> &[FileReport] {
        &self.files
    }

    /// Whether the report comes from a dry run
    #[inline]
    #[must_use]
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Number of files modified
    #[must_use]
    pub fn files_modified(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Modified { .. }))
    }

    /// Number of files where the pattern was absent
    #[must_use]
    pub fn unchanged(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Unchanged))
    }

    /// Number of files that failed
    #[must_use]
    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Failed(_)))
    }

    /// Number of files skipped after an abort
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Skipped))
    }

    /// Sum of replacements over all files
    #[must_use]
    pub fn total_replacements(&self) -> usize {
        self.files
            .iter()
            .map(|f| match f.outcome {
                FileOutcome::Modified { replacements } => replacements,
                _ => 0,
            })
            .sum()
    }

    /// Errors of failed files, in order
    pub fn failures(&self) -> impl Iterator<Item = &FileError> {
        self.files.iter().filter_map(|f| match &f.outcome {
            FileOutcome::Failed(err) => Some(err),
            _ => None,
        })
    }

    /// Whether every file was processed without error
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed() == 0 && self.skipped() == 0
    }

    fn count(&self, pred: impl Fn(&FileOutcome) -> bool) -> usize {
        self.files.iter().filter(|f| pred(&f.outcome)).count()
    }

    fn push(&mut self, path: &Path, outcome: FileOutcome) {
        self.files.push(FileReport {
            path: path.to_path_buf(),
            outcome,
        });
    }
}

/// New content computed for one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedEdit {
    /// Full rewritten content
    pub content: String,
    /// Number of occurrences or keys replaced
    pub replacements: usize,
}

/// Configured rewriter
#[derive(Debug, Clone, Default)]
pub struct Rewriter {
    mode: RewriteMode,
    policy: FailurePolicy,
}

impl Rewriter {
    /// Create rewriter
    #[inline]
    #[must_use]
    pub fn new(mode: RewriteMode, policy: FailurePolicy) -> Self {
        Self { mode, policy }
    }

    /// Get mode
    #[inline]
    #[must_use]
    pub fn mode(&self) -> &RewriteMode {
        &self.mode
    }

    /// Get failure policy
    #[inline]
    #[must_use]
    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Compute the new content of one text, without touching disk
    ///
    /// Returns `None` when nothing matches.
    ///
    /// # Errors
    /// `FileError::Manifest` in structural mode when `text` is not TOML
    pub fn plan_text(
        &self,
        pair: &VersionPair,
        path: &Path,
        text: &str,
    ) -> Result<Option<PlannedEdit>, FileError> {
        match &self.mode {
            RewriteMode::Literal => Ok(LiteralPattern::version_field(pair)
                .apply(text)
                .map(|sub| PlannedEdit {
                    content: sub.content,
                    replacements: sub.replacements,
                })),
            RewriteMode::Structural { keys } => {
                let mut doc: ManifestDocument =
                    text.parse().map_err(|source| FileError::Manifest {
                        path: path.to_path_buf(),
                        source,
                    })?;
                let replacements = doc.rewrite_all(keys, pair);
                if replacements == 0 {
                    return Ok(None);
                }
                Ok(Some(PlannedEdit {
                    content: doc.to_string(),
                    replacements,
                }))
            }
        }
    }

    /// Read one file and compute its new content
    ///
    /// # Errors
    /// Any [`FileError`] from reading or parsing
    pub fn plan_file(
        &self,
        pair: &VersionPair,
        path: &Path,
    ) -> Result<Option<PlannedEdit>, FileError> {
        let text = fs::read_to_string(path).map_err(|e| FileError::from_io(path, e))?;
        self.plan_text(pair, path, &text)
    }

    /// Rewrite one file in place
    ///
    /// # Errors
    /// Any [`FileError`] from reading, parsing or writing
    pub fn rewrite_file(&self, pair: &VersionPair, path: &Path) -> Result<FileOutcome, FileError> {
        match self.plan_file(pair, path)? {
            Some(edit) => {
                fs::write(path, &edit.content).map_err(|e| FileError::from_io(path, e))?;
                Ok(FileOutcome::Modified {
                    replacements: edit.replacements,
                })
            }
            None => Ok(FileOutcome::Unchanged),
        }
    }

    /// Rewrite every target in order
    ///
    /// # Errors
    /// `RewriteError::Incomplete` carrying the full report when any file failed
    pub fn rewrite(
        &self,
        pair: &VersionPair,
        targets: &TargetList,
    ) -> RewriteResult<RewriteReport> {
        self.run(pair, targets, false)
    }

    /// Compute every outcome without writing (dry run)
    ///
    /// # Errors
    /// `RewriteError::Incomplete` carrying the full report when any file failed
    pub fn plan(&self, pair: &VersionPair, targets: &TargetList) -> RewriteResult<RewriteReport> {
        self.run(pair, targets, true)
    }

    fn run(
        &self,
        pair: &VersionPair,
        targets: &TargetList,
        dry_run: bool,
    ) -> RewriteResult<RewriteReport> {
        tracing::info!("Rewriting {} in {} files", pair, targets.len());

        let mut report = RewriteReport {
            files: Vec::with_capacity(targets.len()),
            dry_run,
        };
        let mut aborted = false;

        for path in targets.iter() {
            if aborted {
                report.push(path, FileOutcome::Skipped);
                continue;
            }

            let result = if dry_run {
                self.plan_file(pair, path).map(|edit| match edit {
                    Some(edit) => FileOutcome::Modified {
                        replacements: edit.replacements,
                    },
                    None => FileOutcome::Unchanged,
                })
            } else {
                self.rewrite_file(pair, path)
            };

            let outcome = match result {
                Ok(outcome) => outcome,
                Err(err) => {
                    tracing::warn!("{}", err);
                    aborted = self.policy == FailurePolicy::Abort;
                    FileOutcome::Failed(err)
                }
            };
            match &outcome {
                FileOutcome::Modified { replacements } => {
                    tracing::info!("{}: {} replacements", path.display(), replacements);
                }
                FileOutcome::Unchanged => {
                    tracing::warn!("{}: no match for {}", path.display(), pair.from_version());
                }
                FileOutcome::Failed(_) | FileOutcome::Skipped => {}
            }
            report.push(path, outcome);
        }

        if report.is_success() {
            Ok(report)
        } else {
            Err(RewriteError::Incomplete(Box::new(report)))
        }
    }
}

/// Rewrite `version = "<from>"` to `version = "<to>"` in every path
///
/// Literal mode, continuing past failed files. Returns the number of files
/// modified.
///
/// # Errors
/// - `RewriteError::Targets` if `paths` is empty
/// - `RewriteError::Incomplete` if any file failed
pub fn rewrite<P: AsRef<Path>>(pair: &VersionPair, paths: &[P]) -> RewriteResult<usize> {
    let targets = TargetList::new(paths.iter().map(|p| p.as_ref().to_path_buf()))?;
    let report = Rewriter::default().rewrite(pair, &targets)?;
    Ok(report.files_modified())
}
