#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub fn daypost_cmd() -> Command {
    let mut cmd = Command::cargo_bin("daypost").unwrap();
    cmd.env_remove("DAYPOST_ROOT");
    cmd.env_remove("DAYPOST_LOG");
    cmd
}

/// Initialize a site in `temp` with entries under `entries/`
pub fn init_site(temp: &TempDir) {
    daypost_cmd()
        .arg("init")
        .arg(temp.path())
        .arg("--entries")
        .arg("entries")
        .assert()
        .success();
    fs::create_dir_all(temp.path().join("entries")).unwrap();
    fs::create_dir_all(temp.path().join("_posts")).unwrap();
}

/// Write a file relative to the site root, creating parent directories
pub fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Write a post with the given tags
pub fn write_post(temp: &TempDir, id: &str, title: &str, tags: &[&str]) {
    write_file(
        temp.path(),
        &format!("_posts/{}.md", id),
        &format!(
            "+++\ntitle = \"{}\"\ntags = [{}]\n+++\nPost body\n",
            title,
            quoted(tags)
        ),
    );
}

/// Write a journal entry with the given tags and creation date
pub fn write_entry(temp: &TempDir, id: &str, date: &str, tags: &[&str], text: &str) {
    write_file(
        temp.path(),
        &format!("entries/{}.md", id),
        &format!(
            "+++\nuuid = \"{}\"\ncreation_date = \"{}\"\ntags = [{}]\n+++\n{}",
            id,
            date,
            quoted(tags),
            text
        ),
    );
}

fn quoted(tags: &[&str]) -> String {
    tags.iter()
        .map(|t| format!("\"{}\"", t))
        .collect::<Vec<_>>()
        .join(", ")
}
