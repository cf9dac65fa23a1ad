//! Worktree lifecycle and task branch issuance.
//!
//! Each identity owns one persistent working copy under
//! `<root>/worktrees/<identity>`, anchored to its base branch. Every
//! assignment cuts a fresh task branch from the remote trunk tip, after a
//! clean-tree check, and checks it out in that working copy.

use crate::config::Config;
use crate::git;
use crate::identity::Identity;
use crate::{Error, Result};
use chrono::Local;
use std::fs::File;
use std::path::PathBuf;

/// Maximum length of the objective slug embedded in a task branch name.
const SLUG_MAX: usize = 48;

/// Fallback slug when the objective has no usable characters.
const SLUG_FALLBACK: &str = "task";

/// Outcome of a worktree removal.
#[derive(Debug, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The worktree was detached from the source repository.
    Removed,
    /// There was no worktree to remove.
    AlreadyAbsent,
    /// Git refused (e.g. the worktree is busy); the reason is kept for a
    /// notice, but the operation is treated as a soft success.
    Skipped(String),
}

/// Per-identity status for the report: the short git status text, or absent.
#[derive(Debug)]
pub enum WorktreeStatus {
    Present(String),
    Absent,
}

/// Worktree manager bound to one resolved configuration.
pub struct Workspace<'a> {
    config: &'a Config,
}

impl<'a> Workspace<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Idempotently create the orchestration root and its subareas.
    pub fn bootstrap(&self) -> Result<()> {
        for dir in [
            self.config.worktrees_dir(),
            self.config.logs_dir(),
            self.config.manifests_dir(),
            self.config.locks_dir(),
        ] {
            std::fs::create_dir_all(dir)?;
        }
        Ok(())
    }

    /// Whether the identity's working copy is present (detected via its
    /// version-control metadata, not the bare directory).
    pub fn worktree_present(&self, identity: Identity) -> bool {
        self.config.worktree_path(identity).join(".git").exists()
    }

    /// Ensure the identity's working copy exists, creating the base branch
    /// from the remote trunk if needed. No-op when already present.
    pub fn ensure_worktree(&self, identity: Identity) -> Result<PathBuf> {
        let path = self.config.worktree_path(identity);
        if self.worktree_present(identity) {
            return Ok(path);
        }

        if !git::is_repo(&self.config.repo) {
            return Err(Error::RepoNotFound(self.config.repo.clone()));
        }

        std::fs::create_dir_all(self.config.worktrees_dir())?;
        git::run(&self.config.repo, &["fetch", &self.config.remote])?;

        let base = identity.base_branch();
        if !git::branch_exists(&self.config.repo, &base) {
            git::run(
                &self.config.repo,
                &["branch", &base, &self.config.remote_trunk()],
            )?;
        }

        git::run(
            &self.config.repo,
            &["worktree", "add", &path.display().to_string(), &base],
        )?;

        Ok(path)
    }

    /// Issue a fresh task branch for an assignment.
    ///
    /// Fails with `DirtyWorkingCopy` before touching anything if the working
    /// copy has uncommitted changes. Otherwise fetches the remote and
    /// force-checks-out `agent/<identity>/<slug>-<YYYYMMDD-HHMM>` at the
    /// remote trunk tip. Returns the branch name.
    pub fn issue_task_branch(&self, identity: Identity, objective: &str) -> Result<String> {
        let path = self.config.worktree_path(identity);

        let status = git::run(&path, &["status", "--porcelain"])?;
        if !status.trim().is_empty() {
            return Err(Error::DirtyWorkingCopy(path));
        }

        git::run(&path, &["fetch", &self.config.remote])?;

        let branch = task_branch_name(identity, objective);
        git::run(
            &path,
            &["checkout", "-B", &branch, &self.config.remote_trunk()],
        )?;

        Ok(branch)
    }

    /// Short status per identity: branch name plus per-file change
    /// indicators, or absent when the working copy was never created.
    /// A git failure in a present worktree is propagated, not swallowed.
    pub fn status_report(&self) -> Result<Vec<(Identity, WorktreeStatus)>> {
        Identity::ALL
            .iter()
            .map(|&identity| {
                let status = if self.worktree_present(identity) {
                    WorktreeStatus::Present(git::run(
                        &self.config.worktree_path(identity),
                        &["status", "--short", "--branch"],
                    )?)
                } else {
                    WorktreeStatus::Absent
                };
                Ok((identity, status))
            })
            .collect()
    }

    /// Destructive: realign the working copy with the remote trunk tip and
    /// delete all untracked files in it.
    pub fn reset_worktree(&self, identity: Identity) -> Result<()> {
        let path = self.config.worktree_path(identity);
        if !self.worktree_present(identity) {
            return Err(Error::MissingWorktree { identity, path });
        }

        git::run(&path, &["fetch", &self.config.remote])?;
        git::run(&path, &["reset", "--hard", &self.config.remote_trunk()])?;
        git::run(&path, &["clean", "-fd"])?;
        Ok(())
    }

    /// Detach the identity's working copy from the source repository.
    /// Branches are left intact. Absent or busy worktrees are soft successes.
    pub fn remove_worktree(&self, identity: Identity) -> Result<RemoveOutcome> {
        let path = self.config.worktree_path(identity);
        if !path.exists() {
            return Ok(RemoveOutcome::AlreadyAbsent);
        }

        match git::run(
            &self.config.repo,
            &["worktree", "remove", &path.display().to_string()],
        ) {
            Ok(_) => Ok(RemoveOutcome::Removed),
            Err(e) => Ok(RemoveOutcome::Skipped(e.to_string())),
        }
    }

    /// Create the identity's log directory if needed and hand back a fresh
    /// timestamped log file path. The file is created empty; the external
    /// assistant writes to it, never this tool.
    pub fn allocate_log_path(&self, identity: Identity) -> Result<PathBuf> {
        let dir = self.config.log_dir(identity);
        std::fs::create_dir_all(&dir)?;

        let path = dir.join(format!("{}.log", Local::now().format("%Y%m%d-%H%M%S")));
        File::create(&path)?;
        Ok(path)
    }
}

/// Derive the branch name for an assignment: identity, slugified objective,
/// minute-resolution timestamp.
pub fn task_branch_name(identity: Identity, objective: &str) -> String {
    format!(
        "agent/{}/{}-{}",
        identity.as_str(),
        slugify(objective),
        Local::now().format("%Y%m%d-%H%M")
    )
}

/// Slugify an objective for use in a branch name.
///
/// Lower-case, non-alphanumeric runs collapsed to single hyphens, no
/// leading/trailing hyphens, at most 48 characters, `task` when nothing
/// usable remains.
pub fn slugify(text: &str) -> String {
    let mut slug = String::new();
    let mut pending_hyphen = false;

    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug.truncate(SLUG_MAX);
    while slug.ends_with('-') {
        slug.pop();
    }

    if slug.is_empty() {
        SLUG_FALLBACK.to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(
            slugify("Fix flaky tests in Foo suite"),
            "fix-flaky-tests-in-foo-suite"
        );
    }

    #[test]
    fn test_slugify_collapses_punctuation_runs() {
        assert_eq!(slugify("fix: the -- weird   bug!"), "fix-the-weird-bug");
    }

    #[test]
    fn test_slugify_strips_edge_hyphens() {
        assert_eq!(slugify("--hello--"), "hello");
        assert_eq!(slugify("   spaced   "), "spaced");
    }

    #[test]
    fn test_slugify_empty_and_punctuation_only_fall_back() {
        assert_eq!(slugify(""), "task");
        assert_eq!(slugify("!!!   ---   "), "task");
    }

    #[test]
    fn test_slugify_truncates_to_48() {
        let long = "a".repeat(100);
        assert_eq!(slugify(&long).len(), 48);

        // Truncation must not leave a trailing hyphen.
        let awkward = format!("{} {}", "a".repeat(47), "b".repeat(20));
        let slug = slugify(&awkward);
        assert!(slug.len() <= 48);
        assert!(!slug.ends_with('-'));
    }

    #[test]
    fn test_slugify_idempotent() {
        for input in ["fix-flaky-tests", "task", "a-1-b-2"] {
            assert_eq!(slugify(input), input);
            assert_eq!(slugify(&slugify(input)), slugify(input));
        }
    }

    #[test]
    fn test_slugify_never_doubles_hyphens() {
        for input in ["a!!b", "a - b", "x..y..z", "7&7"] {
            assert!(!slugify(input).contains("--"), "input {input:?}");
        }
    }

    #[test]
    fn test_task_branch_name_shape() {
        let name = task_branch_name(Identity::Raphael, "Fix flaky tests in Foo suite");
        assert!(name.starts_with("agent/raphael/fix-flaky-tests-in-foo-suite-"));

        // Suffix is a YYYYMMDD-HHMM timestamp.
        let suffix = name
            .rsplit('/')
            .next()
            .unwrap()
            .trim_start_matches("fix-flaky-tests-in-foo-suite-");
        assert_eq!(suffix.len(), "20260101-0900".len());
        assert!(suffix.chars().all(|c| c.is_ascii_digit() || c == '-'));
    }
}
