//! End-to-end scenarios over real temporary directory trees.

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

fn run_report(config: &Config) -> (ExitCode, String) {
    let mut buf = Vec::new();
    let code = dirdupe::run(config, &mut buf).unwrap();
    (code, String::from_utf8(buf).unwrap())
}

#[test]
fn test_scenario_a_report_only() {
    let root = TempDir::new().unwrap();
    make_dir(root.path(), "X", &["a.txt", "b.txt"]);
    make_dir(root.path(), "Y", &["a.txt", "b.txt"]);

    let config = Config::for_root(root.path()).unwrap();
    let (code, text) = run_report(&config);

    assert_eq!(code, ExitCode::Success);
    assert!(text.contains("Duplicate directories:\n  Y -> X\n"));
    assert!(!text.contains("Removing duplicate directories"));
    assert!(root.path().join("Y").exists());
}

#[test]
fn test_scenario_a_with_removal() {
    let root = TempDir::new().unwrap();
    make_dir(root.path(), "X", &["a.txt", "b.txt"]);
    make_dir(root.path(), "Y", &["a.txt", "b.txt"]);

    let mut config = Config::for_root(root.path()).unwrap();
    config.remove_duplicates = true;
    let (code, text) = run_report(&config);

    assert_eq!(code, ExitCode::Success);
    assert!(text.contains("Removing duplicate directories:\n  Deleting "));
    assert!(root.path().join("X").exists());
    assert!(!root.path().join("Y").exists());
}

#[test]
fn test_scenario_b_conflict_and_merge() {
    let root = TempDir::new().unwrap();
    make_dir(root.path(), "X", &["a.txt", "b.txt"]);
    make_dir(root.path(), "Y", &["b.txt", "c.txt"]);

    let mut config = Config::for_root(root.path()).unwrap();
    config.merge = true;
    let (code, text) = run_report(&config);

    assert_eq!(code, ExitCode::Success);
    assert!(text.contains("  WARNING: X vs Y\n  Common files (1):\n    - b.txt\n"));
    assert!(text.contains("  Merging Y into X\n  Deleting Y\n"));

    let x = root.path().join("X");
    assert!(x.join("c.txt").exists());
    // The pre-existing b.txt in X is untouched and Y's copy is gone
    assert_eq!(fs::read_to_string(x.join("b.txt")).unwrap(), "X/b.txt");
    assert!(!root.path().join("Y").exists());
}

#[test]
fn test_scenario_c_three_duplicates() {
    let root = TempDir::new().unwrap();
    for name in ["C", "A", "B"] {
        make_dir(root.path(), name, &["same.jpg"]);
    }

    let config = Config::for_root(root.path()).unwrap();
    let (_, text) = run_report(&config);

    assert!(text.contains("Duplicate directories:\n  B -> A\n  C -> A\n"));
}

#[test]
fn test_scenario_d_empty_directories_are_duplicates() {
    let root = TempDir::new().unwrap();
    make_dir(root.path(), "empty1", &[]);
    make_dir(root.path(), "empty2", &[]);
    // Hidden files do not count towards the signature
    fs::write(root.path().join("empty2").join(".DS_Store"), b"x").unwrap();

    let config = Config::for_root(root.path()).unwrap();
    let (_, text) = run_report(&config);

    assert!(text.contains("  empty2 -> empty1\n"));
}

#[test]
fn test_print_unique_lists_survivors() {
    let root = TempDir::new().unwrap();
    make_dir(root.path(), "X", &["a.txt", "b.txt"]);
    make_dir(root.path(), "Y", &["a.txt", "b.txt"]);
    make_dir(root.path(), "Z", &["z.txt"]);

    let mut config = Config::for_root(root.path()).unwrap();
    config.print_unique = true;
    let (_, text) = run_report(&config);

    assert!(text.contains("Keeping these unique directories:\n  X\n  Z\n\nOperation complete\n"));
}

#[test]
fn test_idempotent_analysis() {
    let root = TempDir::new().unwrap();
    make_dir(root.path(), "one", &["a", "b"]);
    make_dir(root.path(), "two", &["a", "b"]);
    make_dir(root.path(), "three", &["b", "c"]);

    let config = Config::for_root(root.path()).unwrap();
    let (_, first) = run_report(&config);
    let (_, second) = run_report(&config);

    assert_eq!(first, second);
}

#[test]
fn test_json_output() {
    let root = TempDir::new().unwrap();
    make_dir(root.path(), "X", &["a.txt"]);
    make_dir(root.path(), "Y", &["a.txt"]);

    let mut config = Config::for_root(root.path()).unwrap();
    config.output = dirdupe::cli::OutputFormat::Json;
    let (_, text) = run_report(&config);

    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["summary"]["duplicate_count"], 1);
    assert!(value["duplicates"][0]["duplicate"]
        .as_str()
        .unwrap()
        .ends_with("Y"));
}

#[test]
fn test_invalid_root_exit_code() {
    use clap::Parser;
    use dirdupe::cli::Cli;

    let root = TempDir::new().unwrap();
    let missing = root.path().join("missing");
    let cli = Cli::try_parse_from(["dirdupe", missing.to_str().unwrap()]).unwrap();

    let err = dirdupe::run_app(cli).unwrap_err();
    assert_eq!(ExitCode::for_error(&err), ExitCode::InvalidRoot);
}

#[test]
fn test_root_is_file_exit_code() {
    use clap::Parser;
    use dirdupe::cli::Cli;

    let root = TempDir::new().unwrap();
    let file = root.path().join("file.txt");
    fs::write(&file, b"x").unwrap();
    let cli = Cli::try_parse_from(["dirdupe", file.to_str().unwrap()]).unwrap();

    let err = dirdupe::run_app(cli).unwrap_err();
    assert_eq!(ExitCode::for_error(&err), ExitCode::InvalidRoot);
    assert!(file.exists());
}
