//! Human-readable run output

use std::io::{self, Write};
use std::path::Path;
use verbump_core::{FileOutcome, RewriteReport, VersionPair};

/// Write one line per file followed by a totals line
///
/// Paths under `root` are shown relative to it.
///
/// # Errors
/// Propagates write failures
pub fn render_report(
    out: &mut impl Write,
    report: &RewriteReport,
    root: &Path,
) -> io::Result<()> {
    let (modified_label, total_label) = if report.is_dry_run() {
        ("would modify", "to modify")
    } else {
        ("modified", "modified")
    };

    for file in report.files() {
        let path = file.path.strip_prefix(root).unwrap_or(file.path.as_path()).display();
        match &file.outcome {
            FileOutcome::Modified { replacements } => {
                writeln!(out, "{modified_label:<12} {path} ({replacements} replaced)")?;
            }
            FileOutcome::Unchanged => writeln!(out, "{:<12} {path} (no match)", "unchanged")?,
            FileOutcome::Failed(err) => writeln!(out, "{:<12} {path}: {err}", "failed")?,
            FileOutcome::Skipped => writeln!(out, "{:<12} {path}", "skipped")?,
        }
    }

    writeln!(
        out,
        "{} files {total_label}, {} replacements, {} unchanged, {} failed, {} skipped",
        report.files_modified(),
        report.total_replacements(),
        report.unchanged(),
        report.failed(),
        report.skipped(),
    )
}

/// Write the manual steps that remain after the files are bumped
///
/// # Errors
/// Propagates write failures
pub fn render_checklist(out: &mut impl Write, pair: &VersionPair) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Remaining release steps (manual):")?;
    writeln!(out, "  1. Review every change: git diff")?;
    writeln!(out, "  2. Run the test suite: cargo test --workspace")?;
    writeln!(out, "  3. Publish the crates: cargo publish")?;
    writeln!(out, "  4. Tag the release: git tag {}", pair.to_version())
}
