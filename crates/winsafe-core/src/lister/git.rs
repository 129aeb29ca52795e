//! List tracked paths with `git ls-tree`.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tokio::process::Command;

use super::PathLister;

/// Lists every blob path in the tree of `revision`.
///
/// Uses `-z` so paths come back verbatim; without it git C-quotes names
/// containing `"`, `\` or non-ASCII bytes.
#[derive(Debug, Clone)]
pub struct GitTreeLister {
    repo: PathBuf,
    revision: String,
}

impl GitTreeLister {
    pub fn new(repo: impl Into<PathBuf>, revision: impl Into<String>) -> Self {
        Self {
            repo: repo.into(),
            revision: revision.into(),
        }
    }
}

impl PathLister for GitTreeLister {
    async fn list_paths(&self) -> Result<Vec<String>> {
        let output = Command::new("git")
            .arg("-C")
            .arg(&self.repo)
            .args(["ls-tree", "-r", "-z", "--name-only", "--full-tree"])
            .arg(&self.revision)
            .output()
            .await
            .context("failed to execute git ls-tree (is git on PATH?)")?;
        if !output.status.success() {
            anyhow::bail!(
                "git ls-tree {} in {} failed: {}",
                self.revision,
                self.repo.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        let paths = parse_nul_separated(&output.stdout)?;
        tracing::debug!(
            revision = %self.revision,
            count = paths.len(),
            "listed tracked paths"
        );
        Ok(paths)
    }
}

/// Splits NUL-terminated `git -z` output into UTF-8 paths.
pub(crate) fn parse_nul_separated(bytes: &[u8]) -> Result<Vec<String>> {
    bytes
        .split(|b| *b == 0)
        .filter(|p| !p.is_empty())
        .map(|p| {
            String::from_utf8(p.to_vec()).with_context(|| {
                format!("tracked path is not UTF-8: {}", String::from_utf8_lossy(p))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nul_separated_output() {
        let out = b"a.txt\0blog/index.html?p=1\0dir/\"quoted\".md\0";
        let paths = parse_nul_separated(out).unwrap();
        assert_eq!(
            paths,
            vec!["a.txt", "blog/index.html?p=1", "dir/\"quoted\".md"]
        );
    }

    #[test]
    fn empty_output_is_empty_list() {
        assert!(parse_nul_separated(b"").unwrap().is_empty());
    }

    #[test]
    fn rejects_non_utf8_paths() {
        let err = parse_nul_separated(b"ok\0bad\xff\0").unwrap_err();
        assert!(err.to_string().contains("not UTF-8"));
    }

    #[tokio::test]
    async fn missing_repository_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let lister = GitTreeLister::new(dir.path().join("nope"), "HEAD");
        assert!(lister.list_paths().await.is_err());
    }
}
