//! Stamps the binary with the commit it was built from.
//!
//! `SENTA_COMMIT` is the 8-char revision and `SENTA_COMMIT_DATE` its commit
//! time in UTC. Both fall back to `-` outside a git checkout.

use std::process::Command;

use chrono::{DateTime, Utc};

const UNKNOWN: &str = "-";

fn git(args: &[&str]) -> Option<String> {
    let out = Command::new("git").args(args).output().ok()?;
    if !out.status.success() {
        return None;
    }
    let text = String::from_utf8(out.stdout).ok()?;
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn commit_date() -> Option<String> {
    let raw = git(&["log", "-1", "--format=%cI"])?;
    let date = DateTime::parse_from_rfc3339(&raw).ok()?;
    Some(date.with_timezone(&Utc).format("%Y-%m-%d %H:%M:%S").to_string())
}

fn main() {
    let commit = git(&["rev-parse", "--short=8", "HEAD"]).unwrap_or_else(|| UNKNOWN.into());
    let date = commit_date().unwrap_or_else(|| UNKNOWN.into());

    println!("cargo:rustc-env=SENTA_COMMIT={}", commit);
    println!("cargo:rustc-env=SENTA_COMMIT_DATE={}", date);

    println!("cargo:rerun-if-changed=../../.git/HEAD");
    println!("cargo:rerun-if-changed=../../.git/refs/heads/");
}
