//! Integration tests for add, show and delete

#![allow(deprecated)]

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

mod common;
use common::{add_entry, init_journal, travelog_cmd, write_photo};

#[test]
fn test_add_entry() {
    let temp = TempDir::new().unwrap();
    init_journal(temp.path());
    let photo = write_photo(temp.path(), "beach.jpg");

    travelog_cmd()
        .current_dir(temp.path())
        .arg("add")
        .arg("-i")
        .arg(&photo)
        .arg("-t")
        .arg("Beach")
        .arg("-d")
        .arg("Nice")
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved entry"))
        .stdout(predicate::str::contains("🔔 Travel entry saved: Beach"))
        .stderr(predicate::str::contains("saving without location"));

    let stored =
        fs::read_to_string(temp.path().join(".travelog/store/travelEntries.json")).unwrap();
    assert!(stored.contains("\"title\":\"Beach\""));
    assert!(stored.contains("file://"));
    assert!(!stored.contains("\"location\""));
}

#[test]
fn test_add_without_notifications() {
    let temp = TempDir::new().unwrap();
    init_journal(temp.path());
    travelog_cmd()
        .current_dir(temp.path())
        .args(["config", "notifications", "false"])
        .assert()
        .success();

    let photo = write_photo(temp.path(), "hill.jpg");
    travelog_cmd()
        .current_dir(temp.path())
        .arg("add")
        .arg("-i")
        .arg(&photo)
        .args(["-t", "Hill", "-d", "Windy"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved entry"))
        .stdout(predicate::str::contains("🔔").not());
}

#[test]
fn test_add_blank_title_is_validation_error() {
    let temp = TempDir::new().unwrap();
    init_journal(temp.path());
    let photo = write_photo(temp.path(), "beach.jpg");

    travelog_cmd()
        .current_dir(temp.path())
        .arg("add")
        .arg("-i")
        .arg(&photo)
        .args(["-t", "   ", "-d", "Nice"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("title"));

    travelog_cmd()
        .current_dir(temp.path())
        .arg("feed")
        .assert()
        .success()
        .stdout(predicate::str::contains("No entries found"));
}

#[test]
fn test_add_missing_photo_fails() {
    let temp = TempDir::new().unwrap();
    init_journal(temp.path());

    travelog_cmd()
        .current_dir(temp.path())
        .args(["add", "-i", "nowhere.jpg", "-t", "Beach", "-d", "Nice"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot read image"));
}

#[test]
fn test_add_requires_a_photo_source() {
    let temp = TempDir::new().unwrap();
    init_journal(temp.path());

    travelog_cmd()
        .current_dir(temp.path())
        .args(["add", "-t", "Beach", "-d", "Nice"])
        .assert()
        .failure();
}

#[test]
fn test_add_with_camera_but_no_command() {
    let temp = TempDir::new().unwrap();
    init_journal(temp.path());

    travelog_cmd()
        .current_dir(temp.path())
        .args(["add", "--camera", "-t", "Beach", "-d", "Nice"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("camera"));
}

#[test]
fn test_add_rejects_out_of_range_latitude() {
    let temp = TempDir::new().unwrap();
    init_journal(temp.path());
    let photo = write_photo(temp.path(), "beach.jpg");

    travelog_cmd()
        .current_dir(temp.path())
        .arg("add")
        .arg("-i")
        .arg(&photo)
        .args(["-t", "Beach", "-d", "Nice", "--lat", "91", "--lon", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("latitude"));
}

#[test]
fn test_add_with_location_uses_known_place() {
    let temp = TempDir::new().unwrap();
    init_journal(temp.path());
    fs::write(
        temp.path().join(".travelog/config.toml"),
        r#"notifications = false
confirm_delete = true
created = "2025-01-01T00:00:00Z"

[[places]]
name = "Praia da Luz"
city = "Lagos"
country = "Portugal"
latitude = 37.087
longitude = -8.729
"#,
    )
    .unwrap();
    let photo = write_photo(temp.path(), "beach.jpg");

    let output = travelog_cmd()
        .current_dir(temp.path())
        .arg("add")
        .arg("-i")
        .arg(&photo)
        .args(["-t", "Beach", "-d", "Nice"])
        .args(["--lat", "37.09", "--lon", "-8.73"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Location: Praia da Luz, Lagos, Portugal"));

    let id = stdout
        .lines()
        .find_map(|line| line.strip_prefix("Saved entry "))
        .and_then(|rest| rest.split_whitespace().next())
        .unwrap()
        .to_string();

    travelog_cmd()
        .current_dir(temp.path())
        .arg("show")
        .arg(&id)
        .assert()
        .success()
        .stdout(predicate::str::contains("location: 37.09000, -8.73000"))
        .stdout(predicate::str::contains("address:  Praia da Luz, Lagos, Portugal"));
}

#[test]
fn test_show_entry() {
    let temp = TempDir::new().unwrap();
    init_journal(temp.path());
    let id = add_entry(temp.path(), "Beach", "Sunset over the water");

    travelog_cmd()
        .current_dir(temp.path())
        .arg("show")
        .arg(&id)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Beach\n"))
        .stdout(predicate::str::contains(format!("id:       {}", id)))
        .stdout(predicate::str::contains("Sunset over the water"));
}

#[test]
fn test_show_unknown_entry() {
    let temp = TempDir::new().unwrap();
    init_journal(temp.path());

    travelog_cmd()
        .current_dir(temp.path())
        .args(["show", "42"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("Entry not found: 42"));
}

#[test]
fn test_delete_with_yes() {
    let temp = TempDir::new().unwrap();
    init_journal(temp.path());
    let id = add_entry(temp.path(), "Beach", "Nice");

    travelog_cmd()
        .current_dir(temp.path())
        .arg("delete")
        .arg(&id)
        .arg("--yes")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Deleted entry {}", id)));

    travelog_cmd()
        .current_dir(temp.path())
        .arg("feed")
        .assert()
        .success()
        .stdout(predicate::str::contains("No entries found"));
}

#[test]
fn test_delete_declined_keeps_entry() {
    let temp = TempDir::new().unwrap();
    init_journal(temp.path());
    let id = add_entry(temp.path(), "Beach", "Nice");

    travelog_cmd()
        .current_dir(temp.path())
        .arg("delete")
        .arg(&id)
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cancelled"))
        .stderr(predicate::str::contains("Delete \"Beach\"? This cannot be undone."));

    travelog_cmd()
        .current_dir(temp.path())
        .arg("feed")
        .assert()
        .success()
        .stdout(predicate::str::contains("Beach"));
}

#[test]
fn test_delete_confirmed_from_stdin() {
    let temp = TempDir::new().unwrap();
    init_journal(temp.path());
    let id = add_entry(temp.path(), "Beach", "Nice");

    travelog_cmd()
        .current_dir(temp.path())
        .arg("delete")
        .arg(&id)
        .write_stdin("yes\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted entry"));
}

#[test]
fn test_delete_without_confirmation_when_disabled() {
    let temp = TempDir::new().unwrap();
    init_journal(temp.path());
    let id = add_entry(temp.path(), "Beach", "Nice");
    travelog_cmd()
        .current_dir(temp.path())
        .args(["config", "confirm_delete", "false"])
        .assert()
        .success();

    travelog_cmd()
        .current_dir(temp.path())
        .arg("delete")
        .arg(&id)
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted entry"));
}

#[test]
fn test_delete_unknown_entry() {
    let temp = TempDir::new().unwrap();
    init_journal(temp.path());

    travelog_cmd()
        .current_dir(temp.path())
        .args(["delete", "42", "--yes"])
        .assert()
        .code(5);
}
