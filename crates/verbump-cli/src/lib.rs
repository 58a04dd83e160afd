//! verbump command line
//!
//! Resolves settings from `verbump.toml` and the command line, runs one
//! rewrite pass and prints the per-file report plus the manual release
//! checklist.
//!
//! # Exit codes
//! - `0`: every file processed (files without a match included)
//! - `1`: at least one file failed
//! - `2`: usage or configuration error

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod cli;
pub mod logging;
pub mod report;

use anyhow::Context;
use clap::ArgMatches;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use verbump_core::{BumpConfig, RewriteError, RewriteReport, DEFAULT_CONFIG_FILE};

/// Exit code when a file failed
pub const EXIT_FAILED: u8 = 1;
/// Exit code for usage and configuration errors
pub const EXIT_USAGE: u8 = 2;

/// How a completed run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Every file was processed
    Success,
    /// At least one file failed or was skipped
    FilesFailed,
}

impl RunStatus {
    /// Process exit code for this status
    #[must_use]
    pub fn exit_code(self) -> ExitCode {
        match self {
            Self::Success => ExitCode::SUCCESS,
            Self::FilesFailed => ExitCode::from(EXIT_FAILED),
        }
    }
}

/// Run one bump from parsed arguments, writing the report to `out`
///
/// # Errors
/// Configuration, discovery and output errors. Per-file failures are not
/// errors here; they yield [`RunStatus::FilesFailed`].
pub fn run(matches: &ArgMatches, out: &mut impl Write) -> anyhow::Result<RunStatus> {
    let root = matches
        .get_one::<PathBuf>("root")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("."));
    let quiet = matches.get_flag("quiet");
    let dry_run = matches.get_flag("dry-run");

    let file_config = load_config(matches.get_one::<PathBuf>("config"), &root)?;
    let overrides = cli::overrides(matches)?;
    let resolved = file_config
        .merge(overrides)
        .resolve(&root)
        .context("invalid configuration")?;

    let pair = &resolved.pair;
    if !pair.is_semver() {
        tracing::warn!("{} is not a pair of semantic versions", pair);
    } else if pair.is_downgrade() {
        tracing::warn!("{} lowers the version", pair);
    }

    let result = if dry_run {
        resolved.rewriter.plan(pair, &resolved.targets)
    } else {
        resolved.rewriter.rewrite(pair, &resolved.targets)
    };

    let (report, status) = match result {
        Ok(report) => (report, RunStatus::Success),
        Err(RewriteError::Incomplete(report)) => (*report, RunStatus::FilesFailed),
        Err(err) => return Err(err.into()),
    };

    print_outcome(out, &report, &root, pair, quiet || dry_run)?;
    Ok(status)
}

fn load_config(explicit: Option<&PathBuf>, root: &Path) -> anyhow::Result<BumpConfig> {
    let config = match explicit {
        Some(path) => Some(BumpConfig::load(path)?),
        None => BumpConfig::load_optional(&root.join(DEFAULT_CONFIG_FILE))?,
    };
    if config.is_some() {
        tracing::debug!("Loaded config file");
    }
    Ok(config.unwrap_or_default())
}

fn print_outcome(
    out: &mut impl Write,
    report: &RewriteReport,
    root: &Path,
    pair: &verbump_core::VersionPair,
    skip_checklist: bool,
) -> anyhow::Result<()> {
    report::render_report(out, report, root).context("failed to write report")?;
    if !skip_checklist && report.files_modified() > 0 {
        report::render_checklist(out, pair).context("failed to write checklist")?;
    }
    Ok(())
}
