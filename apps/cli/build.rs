//! Stamps the `knox version` output with the commit it was built from.

use std::process::Command;

fn git(args: &[&str]) -> Option<String> {
    let out = Command::new("git").args(args).output().ok()?;
    if !out.status.success() {
        return None;
    }
    let text = String::from_utf8(out.stdout).ok()?;
    Some(text.trim().to_string())
}

fn main() {
    let mut commit = git(&["rev-parse", "--short=10", "HEAD"])
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "untracked".to_string());
    if git(&["status", "--porcelain", "--untracked-files=no"]).is_some_and(|s| !s.is_empty()) {
        commit.push_str("-dirty");
    }
    let date = git(&["log", "-1", "--format=%cs"])
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "undated".to_string());

    println!("cargo:rustc-env=KNOX_COMMIT={commit}");
    println!("cargo:rustc-env=KNOX_COMMIT_DATE={date}");
    println!("cargo:rerun-if-changed=../../.git/HEAD");
    println!("cargo:rerun-if-changed=../../.git/index");
}
