use pretty_assertions::assert_eq;
use proptest::prelude::*;
use verbump_core::{
    rewrite, FailurePolicy, FileError, FileOutcome, KeyPath, RewriteError, RewriteMode, Rewriter,
    TargetList, VersionPair,
};
use verbump_test_utils::{manifest_with_dependency, package_manifest, utility_tree, ManifestTree};

fn pair() -> VersionPair {
    VersionPair::new("0.6.0", "0.7.0").unwrap()
}

#[test]
fn test_three_occurrences_all_rewritten() {
    let tree = ManifestTree::new();
    let original = "[package]\nversion = \"0.6.0\"\n\n\
                    [dependencies]\na = { version = \"0.6.0\" }\n\n\
                    [dev-dependencies]\nb = { version = \"0.6.0\" }\n";
    let path = tree.write("Cargo.toml", original);

    let modified = rewrite(&pair(), &[&path]).unwrap();

    assert_eq!(modified, 1);
    let content = tree.read("Cargo.toml");
    assert_eq!(content.matches("version = \"0.7.0\"").count(), 3);
    assert!(!content.contains("version = \"0.6.0\""));
}

#[test]
fn test_prerelease_value_left_unchanged() {
    let tree = ManifestTree::new();
    let path = tree.write("Cargo.toml", &package_manifest("uu_ls", "0.6.0-beta"));
    let before = tree.read_bytes("Cargo.toml");

    let modified = rewrite(&pair(), &[&path]).unwrap();

    assert_eq!(modified, 0);
    assert_eq!(tree.read_bytes("Cargo.toml"), before);
}

#[test]
fn test_files_without_pattern_are_byte_identical() {
    let tree = ManifestTree::new();
    let hit = tree.write("a/Cargo.toml", &package_manifest("a", "0.6.0"));
    let miss = tree.write("b/Cargo.toml", "# no version here\r\n[package]\r\nname = \"b\"\r\n");
    let before = tree.read_bytes("b/Cargo.toml");

    let targets = TargetList::new([hit, miss]).unwrap();
    let report = Rewriter::default().rewrite(&pair(), &targets).unwrap();

    assert_eq!(report.files_modified(), 1);
    assert_eq!(report.unchanged(), 1);
    assert!(matches!(report.files()[1].outcome, FileOutcome::Unchanged));
    assert_eq!(tree.read_bytes("b/Cargo.toml"), before);
}

#[test]
fn test_second_run_is_noop() {
    let tree = utility_tree("0.6.0", &["ls", "cat"]);
    let targets = TargetList::discover(tree.root(), "Cargo.toml").unwrap();
    let rewriter = Rewriter::default();

    let first = rewriter.rewrite(&pair(), &targets).unwrap();
    let after_first: Vec<String> = targets
        .iter()
        .map(|p| std::fs::read_to_string(p).unwrap())
        .collect();
    let second = rewriter.rewrite(&pair(), &targets).unwrap();
    let after_second: Vec<String> = targets
        .iter()
        .map(|p| std::fs::read_to_string(p).unwrap())
        .collect();

    assert_eq!(first.files_modified(), 4);
    assert_eq!(second.files_modified(), 0);
    assert_eq!(second.unchanged(), 4);
    assert_eq!(after_first, after_second);
}

#[test]
fn test_missing_file_continues_with_remaining() {
    let tree = ManifestTree::new();
    let first = tree.write("a/Cargo.toml", &package_manifest("a", "0.6.0"));
    let missing = tree.path("missing/Cargo.toml");
    let last = tree.write("c/Cargo.toml", &package_manifest("c", "0.6.0"));

    let targets = TargetList::new([first, missing.clone(), last]).unwrap();
    let err = Rewriter::default().rewrite(&pair(), &targets).unwrap_err();

    let report = err.report().unwrap();
    assert_eq!(report.files_modified(), 2);
    assert_eq!(report.failed(), 1);
    let failure = report.failures().next().unwrap();
    assert!(failure.is_not_found());
    assert_eq!(failure.path(), missing.as_path());
    assert!(tree.read("c/Cargo.toml").contains("version = \"0.7.0\""));
    assert_eq!(err.to_string(), "1 of 3 files failed");
}

#[test]
fn test_missing_file_aborts_under_fail_fast() {
    let tree = ManifestTree::new();
    let first = tree.write("a/Cargo.toml", &package_manifest("a", "0.6.0"));
    let missing = tree.path("missing/Cargo.toml");
    let last = tree.write("c/Cargo.toml", &package_manifest("c", "0.6.0"));

    let targets = TargetList::new([first, missing, last]).unwrap();
    let rewriter = Rewriter::new(RewriteMode::Literal, FailurePolicy::Abort);
    let err = rewriter.rewrite(&pair(), &targets).unwrap_err();

    let report = err.report().unwrap();
    assert_eq!(report.files_modified(), 1);
    assert_eq!(report.skipped(), 1);
    assert!(matches!(report.files()[2].outcome, FileOutcome::Skipped));
    // earlier files are not rolled back
    assert!(tree.read("a/Cargo.toml").contains("version = \"0.7.0\""));
    assert!(tree.read("c/Cargo.toml").contains("version = \"0.6.0\""));
}

#[test]
fn test_free_function_reports_not_found() {
    let tree = ManifestTree::new();
    let missing = tree.path("Cargo.toml");

    let err = rewrite(&pair(), &[missing]).unwrap_err();

    match err {
        RewriteError::Incomplete(report) => {
            assert!(matches!(
                report.files()[0].outcome,
                FileOutcome::Failed(FileError::NotFound { .. })
            ));
        }
        RewriteError::Targets(_) => panic!("expected an incomplete run"),
    }
}

#[test]
fn test_dry_run_writes_nothing() {
    let tree = utility_tree("0.6.0", &["ls"]);
    let targets = TargetList::discover(tree.root(), "Cargo.toml").unwrap();
    let before = tree.read("src/uu/ls/Cargo.toml");

    let report = Rewriter::default().plan(&pair(), &targets).unwrap();

    assert!(report.is_dry_run());
    assert_eq!(report.files_modified(), 3);
    assert_eq!(report.total_replacements(), 4);
    assert_eq!(tree.read("src/uu/ls/Cargo.toml"), before);
}

#[test]
fn test_literal_mode_hits_shared_dependency_value() {
    let tree = ManifestTree::new();
    let path = tree.write(
        "Cargo.toml",
        &manifest_with_dependency("uu_ls", "0.6.0", "unrelated", "0.6.0"),
    );

    rewrite(&pair(), &[&path]).unwrap();

    assert!(tree.read("Cargo.toml").contains("unrelated = { version = \"0.7.0\""));
}

#[test]
fn test_structural_mode_scopes_to_package_version() {
    let tree = ManifestTree::new();
    let original = format!(
        "# utility manifest\n{}",
        manifest_with_dependency("uu_ls", "0.6.0", "unrelated", "0.6.0")
    );
    let path = tree.write("Cargo.toml", &original);

    let targets = TargetList::new([path]).unwrap();
    let rewriter = Rewriter::new(RewriteMode::structural(), FailurePolicy::Continue);
    let report = rewriter.rewrite(&pair(), &targets).unwrap();

    assert_eq!(report.total_replacements(), 1);
    let expected = original.replacen("version = \"0.6.0\"", "version = \"0.7.0\"", 1);
    assert_eq!(tree.read("Cargo.toml"), expected);
}

#[test]
fn test_structural_mode_bumps_named_dependency() {
    let tree = utility_tree("0.6.0", &["ls"]);
    let mut keys = KeyPath::defaults();
    keys.extend(KeyPath::dependency_versions("uucore").unwrap());
    let rewriter = Rewriter::new(RewriteMode::Structural { keys }, FailurePolicy::Continue);

    let before = tree.read("src/uu/ls/Cargo.toml");
    let targets = TargetList::new([tree.path("src/uu/ls/Cargo.toml")]).unwrap();
    let report = rewriter.rewrite(&pair(), &targets).unwrap();

    assert_eq!(report.total_replacements(), 2);
    assert_eq!(tree.read("src/uu/ls/Cargo.toml"), before.replace("0.6.0", "0.7.0"));
}

#[test]
fn test_structural_keys_absent_from_file_add_nothing() {
    let tree = ManifestTree::new();
    let original = package_manifest("uu_cat", "0.6.0");
    let path = tree.write("Cargo.toml", &original);

    let mut keys = KeyPath::defaults();
    keys.extend(KeyPath::dependency_versions("uucore").unwrap());
    let rewriter = Rewriter::new(RewriteMode::Structural { keys }, FailurePolicy::Continue);
    let report = rewriter.rewrite(&pair(), &TargetList::new([path]).unwrap()).unwrap();

    assert_eq!(report.total_replacements(), 1);
    let expected = original.replace("0.6.0", "0.7.0");
    assert_eq!(tree.read("Cargo.toml"), expected);
}

#[test]
fn test_structural_mode_reports_invalid_toml() {
    let tree = ManifestTree::new();
    let bad = tree.write("bad/Cargo.toml", "[package\nversion = \"0.6.0\"\n");
    let good = tree.write("good/Cargo.toml", &package_manifest("good", "0.6.0"));

    let targets = TargetList::new([bad, good]).unwrap();
    let rewriter = Rewriter::new(RewriteMode::structural(), FailurePolicy::Continue);
    let err = rewriter.rewrite(&pair(), &targets).unwrap_err();

    let report = err.report().unwrap();
    assert!(matches!(
        report.files()[0].outcome,
        FileOutcome::Failed(FileError::Manifest { .. })
    ));
    assert_eq!(report.files_modified(), 1);
}

#[cfg(unix)]
#[test]
fn test_read_only_file_reports_permission_denied() {
    use std::os::unix::fs::PermissionsExt;

    let tree = ManifestTree::new();
    let path = tree.write("Cargo.toml", &package_manifest("a", "0.6.0"));
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o444)).unwrap();

    // Root bypasses file modes, so this only asserts for unprivileged runs.
    // test_unreadable_target_fails_and_others_continue covers the failure path there.
    if std::fs::OpenOptions::new().write(true).open(&path).is_ok() {
        return;
    }

    let err = rewrite(&pair(), &[&path]).unwrap_err();
    let report = err.report().unwrap();
    assert!(matches!(
        report.files()[0].outcome,
        FileOutcome::Failed(FileError::PermissionDenied { .. })
    ));
}

#[test]
fn test_unreadable_target_fails_and_others_continue() {
    let tree = ManifestTree::new();
    let dir = tree.path("crates/a/Cargo.toml");
    std::fs::create_dir_all(&dir).unwrap();
    let good = tree.write("Cargo.toml", &package_manifest("good", "0.6.0"));

    let err = rewrite(&pair(), &[&dir, &good]).unwrap_err();

    let report = err.report().unwrap();
    match &report.files()[0].outcome {
        FileOutcome::Failed(err) => {
            assert!(!err.is_not_found());
            assert_eq!(err.path(), dir.as_path());
        }
        other => panic!("expected a failure, got {other:?}"),
    }
    assert_eq!(report.files_modified(), 1);
    assert!(tree.read("Cargo.toml").contains("version = \"0.7.0\""));
}

proptest! {
    #[test]
    fn prop_rewrite_is_idempotent(
        prefix in "[a-z \n=\"]{0,40}",
        suffix in "[a-z \n=\"]{0,40}",
        copies in 0usize..4,
    ) {
        let tree = ManifestTree::new();
        let body = format!("{prefix}{}{suffix}", "version = \"0.6.0\"\n".repeat(copies));
        let path = tree.write("Cargo.toml", &body);

        rewrite(&pair(), &[&path]).unwrap();
        let once = tree.read("Cargo.toml");
        rewrite(&pair(), &[&path]).unwrap();
        let twice = tree.read("Cargo.toml");

        prop_assert_eq!(&once, &twice);
        prop_assert!(!once.contains("version = \"0.6.0\""));
    }
}
