//! Failed actions and unreadable directories through the full run.
//!
//! Failures are triggered with directory permissions. Privileged users
//! bypass those, so each test checks the lock took effect and returns early
//! otherwise.

use dirdupe::config::Config;
use dirdupe::error::ExitCode;
use dirdupe::scanner::ScanError;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn make_dir(root: &Path, name: &str, files: &[&str]) {
    let dir = root.join(name);
    fs::create_dir(&dir).unwrap();
    for file in files {
        fs::write(dir.join(file), format!("{name}/{file}")).unwrap();
    }
}

fn set_mode(dir: &Path, mode: u32) {
    fs::set_permissions(dir, fs::Permissions::from_mode(mode)).unwrap();
}

/// Add a read-only subdirectory holding one file, so `dir` cannot be
/// removed recursively. Returns the subdirectory if the lock holds.
fn add_undeletable_subdir(dir: &Path) -> Option<PathBuf> {
    let locked = dir.join("locked");
    fs::create_dir(&locked).unwrap();
    fs::write(locked.join("inner.bin"), b"x").unwrap();
    set_mode(&locked, 0o555);

    let check = locked.join("write_check");
    if fs::write(&check, b"").is_ok() {
        let _ = fs::remove_file(&check);
        set_mode(&locked, 0o755);
        return None;
    }
    Some(locked)
}

fn run_report(config: &Config) -> (ExitCode, String) {
    let mut buf = Vec::new();
    let code = dirdupe::run(config, &mut buf).unwrap();
    (code, String::from_utf8(buf).unwrap())
}

#[test]
fn test_failed_removal_gives_partial_success() {
    let root = TempDir::new().unwrap();
    make_dir(root.path(), "X", &["a.txt"]);
    make_dir(root.path(), "Y", &["a.txt"]);
    make_dir(root.path(), "Z", &["a.txt"]);
    let Some(locked) = add_undeletable_subdir(&root.path().join("Y")) else {
        return;
    };

    let mut config = Config::for_root(root.path()).unwrap();
    config.remove_duplicates = true;
    let (code, text) = run_report(&config);
    set_mode(&locked, 0o755);

    assert_eq!(code, ExitCode::PartialSuccess);
    assert_eq!(code.as_i32(), 3);
    let failed_at = text.find("  FAILED ").unwrap();
    let z_deleted_at = text.find("  Deleting ").unwrap();
    assert!(failed_at < z_deleted_at, "removal log out of order:\n{text}");
    assert!(root.path().join("Y").exists());
    assert!(!root.path().join("Z").exists());
}

#[test]
fn test_failed_source_removal_gives_partial_success() {
    let root = TempDir::new().unwrap();
    make_dir(root.path(), "X", &["a.txt", "b.txt"]);
    make_dir(root.path(), "Y", &["b.txt", "c.txt"]);
    let Some(locked) = add_undeletable_subdir(&root.path().join("Y")) else {
        return;
    };

    let mut config = Config::for_root(root.path()).unwrap();
    config.merge = true;
    config.print_unique = true;
    let (code, text) = run_report(&config);
    set_mode(&locked, 0o755);

    assert_eq!(code, ExitCode::PartialSuccess);
    assert!(text.contains("  Merging Y into X\n  FAILED failed to delete source after merge"));
    assert!(root.path().join("X").join("c.txt").exists());
    // Y gave its files away, so it is not listed as a survivor
    assert!(text.contains("Keeping these unique directories:\n  X\n\nOperation complete\n"));
}

#[test]
fn test_unreadable_subdirectory_aborts_run() {
    let root = TempDir::new().unwrap();
    make_dir(root.path(), "X", &["a.txt"]);
    make_dir(root.path(), "Y", &["a.txt"]);
    let y = root.path().join("Y");
    set_mode(&y, 0o000);
    if fs::read_dir(&y).is_ok() {
        set_mode(&y, 0o755);
        return;
    }

    let mut config = Config::for_root(root.path()).unwrap();
    config.remove_duplicates = true;
    let mut out = Vec::new();
    let result = dirdupe::run(&config, &mut out);
    set_mode(&y, 0o755);

    let err = result.unwrap_err();
    assert_eq!(ExitCode::for_error(&err), ExitCode::GeneralError);
    assert_eq!(ExitCode::for_error(&err).as_i32(), 1);
    let scan_error = err.downcast_ref::<ScanError>().unwrap();
    assert!(matches!(scan_error, ScanError::PermissionDenied(_)));
    assert_eq!(scan_error.path(), config.root.join("Y"));
    assert!(format!("{err:#}").contains("Y"));

    // Nothing was reported or removed
    assert!(out.is_empty());
    assert!(root.path().join("X").exists());
    assert!(y.join("a.txt").exists());
}
