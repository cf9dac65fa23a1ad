//! Bottega - isolated git worktrees for a fixed crew of coding assistants.
//!
//! This library provides the core functionality for the `btg` CLI tool:
//! identity validation, orchestration-root bootstrap, worktree lifecycle,
//! and per-assignment task branch issuance.

pub mod cli;
pub mod commands;
pub mod config;
pub mod git;
pub mod identity;
pub mod manifest;
pub mod workspace;

use std::path::PathBuf;

/// Library-level error type for Bottega operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unknown identity '{0}' (expected one of: leonardo, raphael, michelangelo, donatello)")]
    UnknownIdentity(String),

    #[error("not a git repository: {}", .0.display())]
    RepoNotFound(PathBuf),

    #[error("working copy at {} has uncommitted or untracked changes; commit or stash them (or remove untracked files) before starting a new task", .0.display())]
    DirtyWorkingCopy(PathBuf),

    #[error("no working copy for {identity} at {}; run `btg init` or `btg prep` first", .path.display())]
    MissingWorktree {
        identity: identity::Identity,
        path: PathBuf,
    },

    #[error("git {command} failed: {stderr}")]
    GitOperationFailed { command: String, stderr: String },

    #[error("failed to write manifest {}: {source}", .path.display())]
    ManifestWriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result type alias for Bottega operations.
pub type Result<T> = std::result::Result<T, Error>;
