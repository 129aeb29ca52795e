//! History rewriter adapters.
//!
//! The engine stops at a [`RenameMapping`]; a rewriter turns it into something
//! that applies every rename across the full history. The shipped adapter
//! emits a `git filter-repo` plan rather than running it, so the user can
//! review the renames first.

mod filter_repo;
mod instructions;

pub use filter_repo::{python_bytes_literal, FilterRepoPlan, CALLBACK_FILE, SCRIPT_FILE};
pub use instructions::{render_instructions, INSTRUCTIONS_FILE};

use anyhow::Result;
use std::path::PathBuf;

use crate::mapping::RenameMapping;

/// Consumer of a finished rename mapping.
pub trait HistoryRewriter {
    /// Applies or stages `mapping`; returns the files it produced.
    fn rewrite(&self, mapping: &RenameMapping) -> Result<Vec<PathBuf>>;
}
