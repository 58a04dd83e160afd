//! Argument definitions
//!
//! Every setting of [`BumpConfig`] can be given on the command line; values
//! given here override the config file.

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use verbump_core::{BumpConfig, ConfigError, ModeName};

/// Build the `verbump` command
#[must_use]
pub fn build_cli() -> Command {
    Command::new("verbump")
        .version(verbump_core::VERSION)
        .about("Bump a version string across release manifests")
        .after_help(
            "Review the result with `git diff` before committing: \
             literal mode replaces every matching field, including dependencies.",
        )
        .arg(
            Arg::new("from")
                .long("from")
                .value_name("VERSION")
                .help("Version being replaced"),
        )
        .arg(
            Arg::new("to")
                .long("to")
                .value_name("VERSION")
                .help("Version written in its place"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Config file (default: verbump.toml in the root, if present)"),
        )
        .arg(
            Arg::new("root")
                .long("root")
                .value_name("DIR")
                .default_value(".")
                .value_parser(value_parser!(PathBuf))
                .help("Repository root that target paths are relative to"),
        )
        .arg(
            Arg::new("discover")
                .long("discover")
                .action(ArgAction::SetTrue)
                .help("Rewrite every Cargo.toml found under the root"),
        )
        .arg(
            Arg::new("mode")
                .long("mode")
                .value_name("MODE")
                .value_parser(["literal", "structural"])
                .help("Match `version = \"FROM\"` anywhere, or only at configured keys"),
        )
        .arg(
            Arg::new("key")
                .long("key")
                .value_name("PATH")
                .action(ArgAction::Append)
                .help("Dotted key to rewrite; implies structural mode (repeatable)"),
        )
        .arg(
            Arg::new("dependency")
                .long("dependency")
                .value_name("NAME")
                .action(ArgAction::Append)
                .help("Bump this dependency's requirement; implies structural mode (repeatable)"),
        )
        .arg(
            Arg::new("fail-fast")
                .long("fail-fast")
                .action(ArgAction::SetTrue)
                .help("Stop at the first file that fails"),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .short('n')
                .action(ArgAction::SetTrue)
                .help("Report what would change without writing"),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .short('q')
                .action(ArgAction::SetTrue)
                .help("Log warnings only and skip the release checklist"),
        )
        .arg(
            Arg::new("targets")
                .value_name("TARGETS")
                .num_args(0..)
                .value_parser(value_parser!(PathBuf))
                .help("Manifest files to rewrite"),
        )
}

/// Settings given on the command line
///
/// # Errors
/// `ConfigError::UnknownMode` for an unrecognised mode name
pub fn overrides(matches: &ArgMatches) -> Result<BumpConfig, ConfigError> {
    let strings = |id: &str| -> Vec<String> {
        matches
            .get_many::<String>(id)
            .map(|values| values.cloned().collect())
            .unwrap_or_default()
    };

    Ok(BumpConfig {
        from: matches.get_one::<String>("from").cloned(),
        to: matches.get_one::<String>("to").cloned(),
        targets: matches
            .get_many::<PathBuf>("targets")
            .map(|values| values.cloned().collect())
            .unwrap_or_default(),
        discover: matches.get_flag("discover"),
        mode: matches
            .get_one::<String>("mode")
            .map(|m| m.parse::<ModeName>())
            .transpose()?,
        keys: strings("key"),
        dependencies: strings("dependency"),
        fail_fast: matches.get_flag("fail-fast"),
    })
}
