extern crate time;

use std::env;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output};

// Writes ${OUT_DIR}/git-commit and ${OUT_DIR}/compile-date for
// src/version.rs to include_str!.
fn main() {
    let commit = git_commit();
    write_out("git-commit", commit.as_bytes());

    let now = time::now_utc();
    let date = time::strftime("%Y-%m-%d", &now).unwrap();
    write_out("compile-date", date.as_bytes());
}

fn write_out(name: &str, contents: &[u8]) {
    let out_dir = env::var("OUT_DIR").unwrap();
    let mut f = File::create(Path::new(&out_dir).join(name)).unwrap();
    f.write_all(contents).unwrap();
}

fn git(args: &[&str]) -> Option<Output> {
    Command::new("git").args(args).output().ok()
        .filter(|out| out.status.success())
}

/// Short hash of HEAD, prefixed with "WIP " if the working tree is dirty.
fn git_commit() -> String {
    let hash = git(&["rev-parse", "--short", "HEAD"]);
    let changes = git(&["status", "--porcelain"]);
    match (hash, changes) {
        (Some(hash), Some(changes)) => {
            let hash = String::from_utf8_lossy(&hash.stdout).trim().to_string();
            if changes.stdout.is_empty() {
                hash
            } else {
                format!("WIP {}", hash)
            }
        }
        _ => "unknown commit".to_string(),
    }
}
