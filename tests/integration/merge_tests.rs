//! Merge behavior through the full run, including conflict policies.

use dirdupe::actions::ConflictPolicy;
use dirdupe::config::Config;
use dirdupe::error::ExitCode;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn make_dir(root: &Path, name: &str, files: &[&str]) {
    let dir = root.join(name);
    fs::create_dir(&dir).unwrap();
    for file in files {
        fs::write(dir.join(file), format!("{name}/{file}")).unwrap();
    }
}

fn merge_config(root: &Path, policy: ConflictPolicy) -> Config {
    let mut config = Config::for_root(root).unwrap();
    config.merge = true;
    config.on_conflict = policy;
    config
}

#[test]
fn test_rename_policy_preserves_conflicting_file() {
    let root = TempDir::new().unwrap();
    make_dir(root.path(), "X", &["a.txt", "b.txt"]);
    make_dir(root.path(), "Y", &["b.txt", "c.txt"]);

    let config = merge_config(root.path(), ConflictPolicy::Rename);
    let mut out = Vec::new();
    let code = dirdupe::run(&config, &mut out).unwrap();

    assert_eq!(code, ExitCode::Success);
    let x = root.path().join("X");
    assert_eq!(fs::read_to_string(x.join("b.txt")).unwrap(), "X/b.txt");
    assert_eq!(fs::read_to_string(x.join("b_1.txt")).unwrap(), "Y/b.txt");
    assert!(x.join("c.txt").exists());
    assert!(!root.path().join("Y").exists());
    assert!(String::from_utf8(out)
        .unwrap()
        .contains("    renamed b.txt -> b_1.txt\n"));
}

#[test]
fn test_abort_policy_keeps_source() {
    let root = TempDir::new().unwrap();
    make_dir(root.path(), "X", &["a.txt", "b.txt"]);
    make_dir(root.path(), "Y", &["b.txt", "c.txt"]);

    let config = merge_config(root.path(), ConflictPolicy::Abort);
    let mut out = Vec::new();
    let code = dirdupe::run(&config, &mut out).unwrap();

    assert_eq!(code, ExitCode::Success);
    let y = root.path().join("Y");
    assert!(y.join("b.txt").exists());
    assert!(y.join("c.txt").exists());
    assert!(!root.path().join("X").join("c.txt").exists());
}

#[test]
fn test_merge_one_target_many_sources() {
    let root = TempDir::new().unwrap();
    make_dir(root.path(), "A", &["1", "2"]);
    make_dir(root.path(), "B", &["1", "3"]);
    make_dir(root.path(), "C", &["2", "4"]);

    let config = merge_config(root.path(), ConflictPolicy::Skip);
    let mut out = Vec::new();
    dirdupe::run(&config, &mut out).unwrap();

    let a = root.path().join("A");
    for name in ["1", "2", "3", "4"] {
        assert!(a.join(name).exists(), "missing {name}");
    }
    assert!(!root.path().join("B").exists());
    assert!(!root.path().join("C").exists());
}

#[test]
fn test_no_recomputation_after_merge() {
    let root = TempDir::new().unwrap();
    // Y overlaps X; Z only overlaps Y, so after Y merges into X the new
    // X/Z overlap is not acted on in the same run
    make_dir(root.path(), "X", &["1", "2"]);
    make_dir(root.path(), "Y", &["2", "3"]);
    make_dir(root.path(), "Z", &["3", "4"]);

    let config = merge_config(root.path(), ConflictPolicy::Skip);
    let mut out = Vec::new();
    dirdupe::run(&config, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.contains("  Merging Y into X\n  Deleting Y\n"));
    assert!(text.contains("  Skipping Z into Y: Y was merged into X\n"));
    assert!(root.path().join("Z").exists());
    assert!(root.path().join("X").join("3").exists());
}

#[test]
fn test_removal_and_merge_together() {
    let root = TempDir::new().unwrap();
    make_dir(root.path(), "X", &["a.txt", "b.txt"]);
    make_dir(root.path(), "X2", &["a.txt", "b.txt"]);
    make_dir(root.path(), "Y", &["b.txt", "c.txt"]);

    let mut config = merge_config(root.path(), ConflictPolicy::Skip);
    config.remove_duplicates = true;
    config.print_unique = true;
    let mut out = Vec::new();
    let code = dirdupe::run(&config, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert_eq!(code, ExitCode::Success);
    assert!(!root.path().join("X2").exists());
    assert!(!root.path().join("Y").exists());
    assert!(text.contains("Keeping these unique directories:\n  X\n\nOperation complete\n"));
}
