//! Writing rendered artifacts to disk

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{GenError, Result};

/// Kinds of generated files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    DaoIndex,
    DaoInternal,
    Model,
    ModelForDao,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::DaoIndex => f.write_str("dao index"),
            ArtifactKind::DaoInternal => f.write_str("dao internal"),
            ArtifactKind::Model => f.write_str("model"),
            ArtifactKind::ModelForDao => f.write_str("model for dao"),
        }
    }
}

/// What to do when the target file already exists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritePolicy {
    /// Leave an existing file untouched
    KeepExisting,
    Overwrite,
}

/// A fully rendered file waiting to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub path: PathBuf,
    pub policy: WritePolicy,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    Skipped,
}

/// Runs `gofmt -w` on generated files.
///
/// The binary can be replaced through `GFGEN_GOFMT_BIN`. Failures are only
/// logged; a missing binary is reported once per formatter.
#[derive(Debug)]
pub struct Formatter {
    program: String,
    missing_reported: AtomicBool,
}

impl Formatter {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            missing_reported: AtomicBool::new(false),
        }
    }

    pub fn gofmt() -> Self {
        Self::new(std::env::var("GFGEN_GOFMT_BIN").unwrap_or_else(|_| "gofmt".to_string()))
    }

    pub fn format(&self, path: &Path) {
        match Command::new(&self.program).arg("-w").arg(path).output() {
            Ok(output) if output.status.success() => {}
            Ok(output) => tracing::warn!(
                "{} failed for {}: {}",
                self.program,
                path.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            ),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                if !self.missing_reported.swap(true, Ordering::Relaxed) {
                    tracing::warn!("{} not found, generated files are left unformatted", self.program);
                }
            }
            Err(e) => tracing::warn!("failed to run {} on {}: {}", self.program, path.display(), e),
        }
    }
}

/// Write an artifact according to its policy, then format it
pub fn write_artifact(artifact: &Artifact, formatter: Option<&Formatter>) -> Result<WriteOutcome> {
    let path = &artifact.path;
    if artifact.policy == WritePolicy::KeepExisting && path.exists() {
        tracing::debug!("skipped existing {} file: {}", artifact.kind, path.display());
        return Ok(WriteOutcome::Skipped);
    }

    let write_err = |source| GenError::Write {
        path: path.clone(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    let mut content = artifact.content.trim().to_string();
    content.push('\n');
    std::fs::write(path, content).map_err(write_err)?;

    if let Some(formatter) = formatter {
        formatter.format(path);
    }
    tracing::info!("generated: {}", path.display());
    Ok(WriteOutcome::Written)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact(path: PathBuf, policy: WritePolicy, content: &str) -> Artifact {
        Artifact {
            kind: ArtifactKind::DaoIndex,
            path,
            policy,
            content: content.to_string(),
        }
    }

    #[test]
    fn test_keep_existing_skips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dao").join("user.go");

        let first = artifact(path.clone(), WritePolicy::KeepExisting, "package dao // v1");
        assert_eq!(write_artifact(&first, None).unwrap(), WriteOutcome::Written);

        let second = artifact(path.clone(), WritePolicy::KeepExisting, "package dao // v2");
        assert_eq!(write_artifact(&second, None).unwrap(), WriteOutcome::Skipped);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "package dao // v1\n");
    }

    #[test]
    fn test_overwrite_replaces() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("internal").join("user.go");
        write_artifact(&artifact(path.clone(), WritePolicy::Overwrite, "v1"), None).unwrap();
        write_artifact(&artifact(path.clone(), WritePolicy::Overwrite, "\n\nv2\n\n"), None).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "v2\n");
    }

    #[test]
    fn test_write_error_carries_path() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("model");
        std::fs::write(&blocker, "not a directory").unwrap();
        let path = blocker.join("model.go");
        let err = write_artifact(&artifact(path.clone(), WritePolicy::Overwrite, "x"), None)
            .unwrap_err();
        assert!(matches!(err, GenError::Write { path: ref p, .. } if *p == path));
    }

    #[test]
    fn test_missing_formatter_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user.go");
        let formatter = Formatter::new("gfgen-no-such-formatter");
        let a = artifact(path.clone(), WritePolicy::Overwrite, "package dao");
        assert_eq!(write_artifact(&a, Some(&formatter)).unwrap(), WriteOutcome::Written);
        assert_eq!(write_artifact(&a, Some(&formatter)).unwrap(), WriteOutcome::Written);
        assert!(formatter.missing_reported.load(Ordering::Relaxed));
    }
}
