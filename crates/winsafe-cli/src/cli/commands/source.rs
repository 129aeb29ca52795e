//! Resolve `SourceArgs` into a list of tracked paths.

use anyhow::Result;
use winsafe_core::config::WinsafeConfig;
use winsafe_core::lister::{FileLister, GitTreeLister, PathLister};

use crate::cli::SourceArgs;

pub async fn list_paths(cfg: &WinsafeConfig, source: &SourceArgs) -> Result<Vec<String>> {
    match &source.paths_file {
        Some(file) => {
            tracing::debug!(file = %file.display(), "listing paths from file");
            FileLister::new(file).list_paths().await
        }
        None => {
            let rev = source.rev.as_deref().unwrap_or(&cfg.revision);
            tracing::debug!(repo = %source.repo.display(), rev, "listing paths with git");
            GitTreeLister::new(&source.repo, rev).list_paths().await
        }
    }
}
