//! Thin wrappers around the `git` binary.
//!
//! All version-control work shells out to `git` with the working directory
//! set explicitly. Failures carry the subcommand and captured stderr so the
//! operator sees what git saw.

use crate::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Run a git subcommand in `dir` and return trimmed stdout.
///
/// A non-zero exit becomes `GitOperationFailed` with the subcommand name and
/// git's stderr.
pub fn run(dir: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .map_err(|e| Error::GitOperationFailed {
            command: args.join(" "),
            stderr: e.to_string(),
        })?;

    if !output.status.success() {
        return Err(Error::GitOperationFailed {
            command: args.join(" "),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim_end().to_string())
}

/// Check whether `dir` is inside a git repository.
pub fn is_repo(dir: &Path) -> bool {
    Command::new("git")
        .args(["rev-parse", "--git-dir"])
        .current_dir(dir)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Check whether a local branch ref exists in the repository at `dir`.
pub fn branch_exists(dir: &Path, branch: &str) -> bool {
    Command::new("git")
        .args(["rev-parse", "--verify", &format!("refs/heads/{branch}")])
        .current_dir(dir)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Walk up from `start` to find the repository toplevel, if any.
pub fn find_toplevel(start: &Path) -> Option<PathBuf> {
    let output = Command::new("git")
        .args(["rev-parse", "--show-toplevel"])
        .current_dir(start)
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if path.is_empty() {
        None
    } else {
        Some(PathBuf::from(path))
    }
}
