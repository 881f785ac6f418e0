//! CLI integration tests for strapi-migrate.
//!
//! These tests verify command-line argument parsing, help output,
//! and exit status for configuration and fetch errors.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

const ENV_VARS: [&str; 4] = ["SOURCE_API", "SOURCE_TOKEN", "DEST_API", "DEST_TOKEN"];

/// Get a command for the strapi-migrate binary.
fn cmd() -> Command {
    Command::cargo_bin("strapi-migrate").unwrap()
}

/// A command with none of the API variables inherited from the test environment.
fn isolated_cmd(dir: &tempfile::TempDir) -> Command {
    let mut c = cmd();
    c.current_dir(dir.path());
    for var in ENV_VARS {
        c.env_remove(var);
    }
    c
}

// =============================================================================
// Help and Version Tests
// =============================================================================

#[test]
fn test_help_shows_all_flags() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--collection"))
        .stdout(predicate::str::contains("--match-field"))
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("--env-file"))
        .stdout(predicate::str::contains("--report"))
        .stdout(predicate::str::contains("--field"));
}

#[test]
fn test_version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("strapi-migrate"));
}

#[test]
fn test_defaults_in_help() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("[default: .strapi.env]"))
        .stdout(predicate::str::contains("[default: migration_report.csv]"))
        .stdout(predicate::str::contains("[default: 100]"))
        .stdout(predicate::str::contains("[default: text]"))
        .stdout(predicate::str::contains("[default: info]"));
}

#[test]
fn test_help_marks_env_file_optional() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Optional dotenv file"))
        .stdout(predicate::str::contains("skipped if missing"));
}

// =============================================================================
// Argument Errors
// =============================================================================

#[test]
fn test_no_arguments_shows_usage() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_match_field_is_required() {
    cmd()
        .args(["--collection", "agenda-formats"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--match-field"));
}

// =============================================================================
// Configuration Errors
// =============================================================================

#[test]
fn test_missing_environment_aborts() {
    let dir = tempfile::tempdir().unwrap();

    isolated_cmd(&dir)
        .args(["--collection", "agenda-formats", "--match-field", "name"])
        .args(["--env-file", "missing.env"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("SOURCE_API"));

    assert!(!dir.path().join("migration_report.csv").exists());
}

#[test]
fn test_single_missing_variable_aborts() {
    let dir = tempfile::tempdir().unwrap();

    isolated_cmd(&dir)
        .args(["--collection", "agenda-formats", "--match-field", "name"])
        .args(["--env-file", "missing.env"])
        .env("SOURCE_API", "http://127.0.0.1:1")
        .env("SOURCE_TOKEN", "s")
        .env("DEST_API", "http://127.0.0.1:1")
        .assert()
        .failure()
        .stderr(predicate::str::contains("DEST_TOKEN"));
}

#[test]
fn test_env_file_is_read() {
    let dir = tempfile::tempdir().unwrap();
    let mut file = std::fs::File::create(dir.path().join("custom.env")).unwrap();
    writeln!(file, "SOURCE_API=ftp://source.example.com").unwrap();
    writeln!(file, "SOURCE_TOKEN=s").unwrap();
    writeln!(file, "DEST_API=https://dest.example.com").unwrap();
    writeln!(file, "DEST_TOKEN=d").unwrap();

    isolated_cmd(&dir)
        .args(["--collection", "agenda-formats", "--match-field", "name"])
        .args(["--env-file", "custom.env"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("http or https"));
}

#[test]
fn test_zero_page_size_rejected() {
    let dir = tempfile::tempdir().unwrap();

    isolated_cmd(&dir)
        .args(["--collection", "agenda-formats", "--match-field", "name"])
        .args(["--env-file", "missing.env", "--page-size", "0"])
        .env("SOURCE_API", "http://127.0.0.1:1")
        .env("SOURCE_TOKEN", "s")
        .env("DEST_API", "http://127.0.0.1:1")
        .env("DEST_TOKEN", "d")
        .assert()
        .failure()
        .stderr(predicate::str::contains("page size"));
}

// =============================================================================
// Fetch Errors
// =============================================================================

#[test]
fn test_unreachable_source_aborts_without_report() {
    let dir = tempfile::tempdir().unwrap();

    isolated_cmd(&dir)
        .args(["--collection", "agenda-formats", "--match-field", "name", "--dry-run"])
        .args(["--env-file", "missing.env"])
        .env("SOURCE_API", "http://127.0.0.1:1")
        .env("SOURCE_TOKEN", "s")
        .env("DEST_API", "http://127.0.0.1:1")
        .env("DEST_TOKEN", "d")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Network error"));

    assert!(!dir.path().join("migration_report.csv").exists());
}
