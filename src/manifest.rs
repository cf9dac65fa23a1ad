//! Per-identity assignment manifests.
//!
//! Each identity has one markdown manifest under `<root>/manifests/`. It is
//! created once with a blank header template and afterwards only ever
//! appended to, one block per assignment.

use crate::config::Config;
use crate::identity::Identity;
use crate::{Error, Result};
use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// Header written when a manifest is first created. All fields start blank;
/// the operator and assistant fill them in by hand.
fn header(identity: Identity) -> String {
    format!(
        "# Manifest: {identity}\n\
         \n\
         Objective:\n\
         Scope:\n\
         Constraints:\n\
         Status:\n\
         Next action:\n\
         PR:\n\
         Started:\n\
         Last updated:\n"
    )
}

/// Create the identity's manifest with the header template if it does not
/// exist yet. Never overwrites. Returns the manifest path.
pub fn ensure(config: &Config, identity: Identity) -> Result<PathBuf> {
    let path = config.manifest_path(identity);

    if !path.exists() {
        std::fs::create_dir_all(config.manifests_dir())?;
        std::fs::write(&path, header(identity)).map_err(|source| Error::ManifestWriteFailed {
            path: path.clone(),
            source,
        })?;
    }

    Ok(path)
}

/// Append one assignment block to the identity's manifest.
pub fn record_assignment(
    config: &Config,
    identity: Identity,
    objective: &str,
    branch: &str,
) -> Result<()> {
    let path = ensure(config, identity)?;
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");

    let block = format!(
        "\n## {timestamp}\n\
         - Objective: {objective}\n\
         - Branch: {branch}\n\
         - Status: prepared\n"
    );

    let mut file = OpenOptions::new()
        .append(true)
        .open(&path)
        .map_err(|source| Error::ManifestWriteFailed {
            path: path.clone(),
            source,
        })?;
    file.write_all(block.as_bytes())
        .map_err(|source| Error::ManifestWriteFailed { path, source })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn test_config(root: &Path) -> Config {
        Config {
            repo: root.join("repo"),
            root: root.to_path_buf(),
            trunk: "main".to_string(),
            remote: "origin".to_string(),
        }
    }

    #[test]
    fn test_ensure_creates_header_once() {
        let temp = TempDir::new().unwrap();
        let cfg = test_config(temp.path());

        let path = ensure(&cfg, Identity::Raphael).unwrap();
        let first = std::fs::read_to_string(&path).unwrap();
        assert!(first.starts_with("# Manifest: raphael"));
        assert!(first.contains("Objective:"));
        assert!(first.contains("Last updated:"));

        // Second ensure must not touch the file.
        std::fs::write(&path, "edited by hand\n").unwrap();
        ensure(&cfg, Identity::Raphael).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "edited by hand\n"
        );
    }

    #[test]
    fn test_record_assignment_appends_only() {
        let temp = TempDir::new().unwrap();
        let cfg = test_config(temp.path());

        let path = ensure(&cfg, Identity::Leonardo).unwrap();
        let before = std::fs::read_to_string(&path).unwrap();

        record_assignment(&cfg, Identity::Leonardo, "Fix the parser", "agent/leonardo/fix-the-parser-20260101-0900").unwrap();

        let after = std::fs::read_to_string(&path).unwrap();
        assert!(after.starts_with(&before), "prior content must be a prefix");
        assert!(after.contains("- Objective: Fix the parser"));
        assert!(after.contains("- Branch: agent/leonardo/fix-the-parser-20260101-0900"));
        assert!(after.contains("- Status: prepared"));

        // A second assignment grows the file again, keeping the first block.
        record_assignment(&cfg, Identity::Leonardo, "Second task", "agent/leonardo/second-task-20260101-0905").unwrap();
        let third = std::fs::read_to_string(&path).unwrap();
        assert!(third.starts_with(&after));
    }

    #[test]
    fn test_record_assignment_creates_manifest_if_missing() {
        let temp = TempDir::new().unwrap();
        let cfg = test_config(temp.path());

        record_assignment(&cfg, Identity::Donatello, "Bootstrap", "agent/donatello/bootstrap-20260101-0900").unwrap();
        let content = std::fs::read_to_string(cfg.manifest_path(Identity::Donatello)).unwrap();
        assert!(content.starts_with("# Manifest: donatello"));
        assert!(content.contains("- Objective: Bootstrap"));
    }
}
