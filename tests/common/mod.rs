//! Common test utilities for bottega integration tests.
//!
//! Provides `TestEnv`: a bare upstream repository, a clone of it acting as
//! the source repository, and an isolated orchestration root. Configuration
//! is passed per-invocation through `BTG_*` env vars, so tests are
//! parallel-safe.

#![allow(dead_code)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
pub use tempfile::TempDir;

pub struct TestEnv {
    /// Bare repository standing in for the shared remote.
    pub upstream: TempDir,
    /// Clone of the upstream; the tool's source repository.
    pub repo: TempDir,
    /// Isolated orchestration root.
    pub root: TempDir,
}

/// Run a git command in `dir`, panicking on failure.
pub fn git(dir: &Path, args: &[&str]) {
    let output = std::process::Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Run a git command in `dir` and return trimmed stdout.
pub fn git_stdout(dir: &Path, args: &[&str]) -> String {
    let output = std::process::Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

impl TestEnv {
    /// Create an upstream with one commit on `main` and a clone of it.
    pub fn new() -> Self {
        let upstream = TempDir::new().unwrap();
        let repo = TempDir::new().unwrap();
        let root = TempDir::new().unwrap();

        git(upstream.path(), &["init", "--bare"]);

        git(
            repo.path(),
            &["clone", &upstream.path().display().to_string(), "."],
        );
        git(repo.path(), &["config", "user.email", "test@test.com"]);
        git(repo.path(), &["config", "user.name", "Test"]);
        git(repo.path(), &["checkout", "-b", "main"]);
        std::fs::write(repo.path().join("README.md"), "hello\n").unwrap();
        git(repo.path(), &["add", "."]);
        git(repo.path(), &["commit", "-m", "init"]);
        git(repo.path(), &["push", "-u", "origin", "main"]);

        Self {
            upstream,
            repo,
            root,
        }
    }

    /// Get a Command for the btg binary pointed at this environment.
    pub fn btg(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_btg"));
        cmd.current_dir(self.repo.path());
        cmd.env("BTG_REPO", self.repo.path());
        cmd.env("BTG_ROOT", self.root.path());
        cmd.env("BTG_TRUNK", "main");
        cmd.env("BTG_REMOTE", "origin");
        cmd
    }

    /// An identity's expected worktree path.
    pub fn worktree(&self, identity: &str) -> PathBuf {
        self.root.path().join("worktrees").join(identity)
    }

    /// An identity's expected manifest path.
    pub fn manifest(&self, identity: &str) -> PathBuf {
        self.root
            .path()
            .join("manifests")
            .join(format!("{identity}.md"))
    }

    /// The commit the upstream trunk currently points at.
    pub fn trunk_tip(&self) -> String {
        git_stdout(self.upstream.path(), &["rev-parse", "main"])
    }
}
