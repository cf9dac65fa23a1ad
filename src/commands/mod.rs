//! Command implementations for the Bottega CLI.
//!
//! Each function takes the resolved [`Config`] and returns a serializable
//! outcome; `main` decides between human and JSON rendering.

use crate::config::Config;
use crate::identity::Identity;
use crate::manifest;
use crate::workspace::{RemoveOutcome, Workspace, WorktreeStatus};
use crate::Result;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Outcome of `btg init`.
#[derive(Debug, Serialize)]
pub struct InitOutcome {
    pub root: PathBuf,
    pub worktrees: Vec<WorktreeEntry>,
}

#[derive(Debug, Serialize)]
pub struct WorktreeEntry {
    pub identity: Identity,
    pub path: PathBuf,
    pub manifest: PathBuf,
}

/// Outcome of `btg prep`.
#[derive(Debug, Serialize)]
pub struct PrepOutcome {
    pub identity: Identity,
    pub branch: String,
    pub worktree: PathBuf,
    pub manifest: PathBuf,
    pub log: PathBuf,
}

/// Outcome of `btg status`.
#[derive(Debug, Serialize)]
pub struct StatusOutcome {
    pub identities: Vec<StatusEntry>,
}

#[derive(Debug, Serialize)]
pub struct StatusEntry {
    pub identity: Identity,
    /// Short git status text, or `None` when no worktree exists.
    pub status: Option<String>,
}

/// Outcome of `btg open`.
#[derive(Debug, Serialize)]
pub struct OpenOutcome {
    pub identity: Identity,
    pub worktree: PathBuf,
    pub log: PathBuf,
}

/// Outcome of `btg reset` / `btg remove`.
#[derive(Debug, Serialize)]
pub struct ActionOutcome {
    pub identity: Identity,
    pub message: String,
}

/// Set up the orchestration root and every identity's worktree and manifest.
pub fn init(config: &Config) -> Result<InitOutcome> {
    let workspace = Workspace::new(config);
    workspace.bootstrap()?;

    let mut worktrees = Vec::new();
    for identity in Identity::ALL {
        let manifest = manifest::ensure(config, identity)?;
        let path = workspace.ensure_worktree(identity)?;
        worktrees.push(WorktreeEntry {
            identity,
            path,
            manifest,
        });
    }

    Ok(InitOutcome {
        root: config.root.clone(),
        worktrees,
    })
}

/// Prepare an assignment for one identity.
pub fn prep(config: &Config, identity: Identity, objective: &str) -> Result<PrepOutcome> {
    let workspace = Workspace::new(config);
    workspace.bootstrap()?;

    let manifest_path = manifest::ensure(config, identity)?;
    let worktree = workspace.ensure_worktree(identity)?;
    let branch = workspace.issue_task_branch(identity, objective)?;
    manifest::record_assignment(config, identity, objective, &branch)?;
    let log = workspace.allocate_log_path(identity)?;

    Ok(PrepOutcome {
        identity,
        branch,
        worktree,
        manifest: manifest_path,
        log,
    })
}

/// Aggregate each identity's short status.
pub fn status(config: &Config) -> Result<StatusOutcome> {
    let workspace = Workspace::new(config);

    let identities = workspace
        .status_report()?
        .into_iter()
        .map(|(identity, status)| StatusEntry {
            identity,
            status: match status {
                WorktreeStatus::Present(text) => Some(text),
                WorktreeStatus::Absent => None,
            },
        })
        .collect();

    Ok(StatusOutcome { identities })
}

/// Print where an identity works and where its next log should go.
pub fn open(config: &Config, identity: Identity) -> Result<OpenOutcome> {
    let workspace = Workspace::new(config);
    workspace.bootstrap()?;

    let worktree = workspace.ensure_worktree(identity)?;
    let log = workspace.allocate_log_path(identity)?;

    Ok(OpenOutcome {
        identity,
        worktree,
        log,
    })
}

/// Destructively realign an identity's worktree with the remote trunk.
pub fn reset(config: &Config, identity: Identity) -> Result<ActionOutcome> {
    let workspace = Workspace::new(config);
    workspace.reset_worktree(identity)?;

    Ok(ActionOutcome {
        identity,
        message: format!(
            "worktree {} reset to {}",
            config.worktree_path(identity).display(),
            config.remote_trunk()
        ),
    })
}

/// Detach an identity's worktree from the source repository.
pub fn remove(config: &Config, identity: Identity) -> Result<ActionOutcome> {
    let workspace = Workspace::new(config);

    let message = match workspace.remove_worktree(identity)? {
        RemoveOutcome::Removed => format!(
            "worktree {} removed (branches kept)",
            config.worktree_path(identity).display()
        ),
        RemoveOutcome::AlreadyAbsent => {
            format!("no worktree for {identity}; nothing to remove")
        }
        RemoveOutcome::Skipped(reason) => {
            format!("worktree for {identity} left in place: {reason}")
        }
    };

    Ok(ActionOutcome { identity, message })
}

impl fmt::Display for InitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Orchestration root: {}", self.root.display())?;
        for entry in &self.worktrees {
            writeln!(
                f,
                "  {:<13} {}",
                entry.identity,
                entry.path.display()
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for PrepOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Prepared {} on branch {}", self.identity, self.branch)?;
        writeln!(f, "  worktree: {}", self.worktree.display())?;
        writeln!(f, "  manifest: {}", self.manifest.display())?;
        writeln!(f, "  log:      {}", self.log.display())
    }
}

impl fmt::Display for StatusOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.identities {
            match &entry.status {
                Some(text) => {
                    writeln!(f, "{}:", entry.identity)?;
                    for line in text.lines() {
                        writeln!(f, "  {line}")?;
                    }
                }
                None => writeln!(f, "{}: (no worktree)", entry.identity)?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for OpenOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Worktree for {}: {}", self.identity, self.worktree.display())?;
        writeln!(
            f,
            "  cd {} && <assistant> 2>&1 | tee {}",
            self.worktree.display(),
            self.log.display()
        )
    }
}

impl fmt::Display for ActionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.message)
    }
}
