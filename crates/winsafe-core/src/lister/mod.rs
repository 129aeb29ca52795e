//! Repository path listers.
//!
//! The mapping builder only needs an ordered list of tracked paths; listers
//! produce that list from a Git revision or from a plain text file.

mod file;
mod git;

pub use file::FileLister;
pub use git::GitTreeLister;

use anyhow::Result;
use std::future::Future;

/// Source of tracked repository paths, in a stable order.
pub trait PathLister {
    fn list_paths(&self) -> impl Future<Output = Result<Vec<String>>> + Send;
}
