//! Process-wide configuration.
//!
//! Resolved once at startup from CLI flags (which clap also feeds from
//! `BTG_*` environment variables) and passed explicitly to every operation.
//!
//! ## Precedence (highest to lowest)
//!
//! 1. CLI flag
//! 2. `BTG_REPO` / `BTG_ROOT` / `BTG_TRUNK` / `BTG_REMOTE` environment variable
//! 3. Built-in default

use crate::git;
use crate::identity::Identity;
use std::env;
use std::path::PathBuf;

/// Default trunk branch new task branches are cut from.
pub const DEFAULT_TRUNK: &str = "main";

/// Default remote the trunk is fetched from.
pub const DEFAULT_REMOTE: &str = "origin";

/// Fully resolved configuration for one invocation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the source git repository.
    pub repo: PathBuf,
    /// Orchestration root holding worktrees, logs, manifests, and locks.
    pub root: PathBuf,
    /// Trunk branch name (e.g. `main`).
    pub trunk: String,
    /// Remote name (e.g. `origin`).
    pub remote: String,
}

impl Config {
    /// Resolve configuration from optional overrides.
    ///
    /// The repo defaults to the git toplevel of the current directory (the
    /// current directory itself when not inside a repository); the root
    /// defaults to `bottega` under the platform data directory.
    pub fn resolve(
        repo: Option<PathBuf>,
        root: Option<PathBuf>,
        trunk: Option<String>,
        remote: Option<String>,
    ) -> Self {
        let repo = repo.unwrap_or_else(|| {
            let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            git::find_toplevel(&cwd).unwrap_or(cwd)
        });

        let root = root.unwrap_or_else(default_root);

        Self {
            repo,
            root,
            trunk: trunk.unwrap_or_else(|| DEFAULT_TRUNK.to_string()),
            remote: remote.unwrap_or_else(|| DEFAULT_REMOTE.to_string()),
        }
    }

    /// Directory holding the four working copies.
    pub fn worktrees_dir(&self) -> PathBuf {
        self.root.join("worktrees")
    }

    /// An identity's working copy path.
    pub fn worktree_path(&self, identity: Identity) -> PathBuf {
        self.worktrees_dir().join(identity.as_str())
    }

    /// Directory holding per-identity assistant logs.
    pub fn logs_dir(&self) -> PathBuf {
        self.root.join("logs")
    }

    /// An identity's log directory.
    pub fn log_dir(&self, identity: Identity) -> PathBuf {
        self.logs_dir().join(identity.as_str())
    }

    /// Directory holding per-identity manifests.
    pub fn manifests_dir(&self) -> PathBuf {
        self.root.join("manifests")
    }

    /// An identity's manifest path.
    pub fn manifest_path(&self, identity: Identity) -> PathBuf {
        self.manifests_dir().join(format!("{}.md", identity.as_str()))
    }

    /// Reserved lock directory (provision for future same-identity locking).
    pub fn locks_dir(&self) -> PathBuf {
        self.root.join("locks")
    }

    /// The remote-tracking ref for the trunk, e.g. `origin/main`.
    pub fn remote_trunk(&self) -> String {
        format!("{}/{}", self.remote, self.trunk)
    }
}

fn default_root() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("bottega"))
        .unwrap_or_else(|| PathBuf::from(".bottega"))
}
