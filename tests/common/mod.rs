#![allow(dead_code, deprecated)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};

pub fn travelog_cmd() -> Command {
    let mut cmd = Command::cargo_bin("travelog").unwrap();
    cmd.env_remove("TRAVELOG_ROOT");
    cmd.env_remove("TRAVELOG_CAMERA");
    cmd.env_remove("RUST_LOG");
    cmd
}

pub fn init_journal(root: &Path) {
    travelog_cmd().arg("init").arg(root).assert().success();
}

/// Write a fake photo into the journal directory
pub fn write_photo(root: &Path, name: &str) -> PathBuf {
    let path = root.join(name);
    fs::write(&path, b"\xFF\xD8\xFF\xE0 not really a jpeg").unwrap();
    path
}

/// Add an entry through the CLI and return its id
pub fn add_entry(root: &Path, title: &str, description: &str) -> String {
    let photo = write_photo(root, &format!("{}.jpg", title.replace(' ', "_")));
    let output = travelog_cmd()
        .current_dir(root)
        .arg("add")
        .arg("--image")
        .arg(&photo)
        .arg("--title")
        .arg(title)
        .arg("--description")
        .arg(description)
        .output()
        .unwrap();
    assert!(output.status.success(), "add failed: {:?}", output);

    let stdout = String::from_utf8(output.stdout).unwrap();
    stdout
        .lines()
        .find_map(|line| line.strip_prefix("Saved entry "))
        .and_then(|rest| rest.split_whitespace().next())
        .map(str::to_string)
        .expect("add printed no entry id")
}
