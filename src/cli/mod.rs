//! CLI argument definitions for Bottega.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Bottega - isolated git worktrees for a fixed crew of coding assistants.
///
/// Run `btg init` once, then `btg prep <identity> "<objective>"` before each
/// assignment. Identities: leonardo, raphael, michelangelo, donatello.
#[derive(Parser, Debug)]
#[command(name = "btg")]
#[command(author, version, about = "Hands four coding assistants isolated git worktrees", long_about = None)]
pub struct Cli {
    /// Output JSON instead of human-readable text
    #[arg(long = "json", global = true)]
    pub json: bool,

    /// Source git repository. Defaults to the git toplevel of the current
    /// directory. Can also be set via BTG_REPO.
    #[arg(short = 'C', long = "repo", global = true, env = "BTG_REPO")]
    pub repo: Option<PathBuf>,

    /// Orchestration root holding worktrees, logs, and manifests.
    /// Can also be set via BTG_ROOT.
    #[arg(long = "root", global = true, env = "BTG_ROOT")]
    pub root: Option<PathBuf>,

    /// Trunk branch task branches are cut from. Can also be set via BTG_TRUNK.
    #[arg(long = "trunk", global = true, env = "BTG_TRUNK")]
    pub trunk: Option<String>,

    /// Remote the trunk is fetched from. Can also be set via BTG_REMOTE.
    #[arg(long = "remote", global = true, env = "BTG_REMOTE")]
    pub remote: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the orchestration root plus a worktree and manifest for all
    /// four identities
    Init,

    /// Prepare an assignment: clean-check the identity's worktree, cut a
    /// fresh task branch from the trunk, record it in the manifest
    #[command(alias = "start")]
    Prep {
        /// Identity the assignment goes to
        identity: String,
        /// Free-form objective text (becomes the branch slug)
        objective: String,
    },

    /// Show each identity's worktree branch and pending changes
    Status,

    /// Print an identity's worktree path and a fresh log path to point the
    /// assistant at
    Open {
        /// Identity whose worktree to open
        identity: String,
    },

    /// Destructive: realign an identity's worktree with the remote trunk,
    /// discarding local changes and untracked files
    Reset {
        /// Identity whose worktree to reset
        identity: String,
    },

    /// Detach an identity's worktree; branches are kept
    Remove {
        /// Identity whose worktree to remove
        identity: String,
    },
}
