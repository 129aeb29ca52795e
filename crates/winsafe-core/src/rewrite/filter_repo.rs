//! `git filter-repo` plan generation.

use anyhow::Result;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use super::instructions::{render_instructions, INSTRUCTIONS_FILE};
use super::HistoryRewriter;
use crate::checksum::plan_digest;
use crate::mapping::RenameMapping;
use crate::storage;

pub const CALLBACK_FILE: &str = "rename_callback.py";
pub const SCRIPT_FILE: &str = "fix_repository.sh";

/// Writes a filename callback, a driver script and instructions into `out_dir`.
///
/// All renames run in a single `git filter-repo` pass. The callback is a
/// bytes-to-bytes lookup, so paths containing `:` or quotes need no extra
/// escaping on the command line.
#[derive(Debug, Clone)]
pub struct FilterRepoPlan {
    out_dir: PathBuf,
}

impl FilterRepoPlan {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }
}

impl HistoryRewriter for FilterRepoPlan {
    fn rewrite(&self, mapping: &RenameMapping) -> Result<Vec<PathBuf>> {
        let digest = plan_digest(mapping);

        let callback = self.out_dir.join(CALLBACK_FILE);
        storage::write_atomic(&callback, render_callback(mapping).as_bytes())?;

        let script = self.out_dir.join(SCRIPT_FILE);
        storage::write_atomic(&script, render_script(mapping.len(), &digest).as_bytes())?;
        storage::set_executable(&script)?;

        let instructions = self.out_dir.join(INSTRUCTIONS_FILE);
        storage::write_atomic(
            &instructions,
            render_instructions(mapping.len(), &digest).as_bytes(),
        )?;

        tracing::info!(
            dir = %self.out_dir.display(),
            renames = mapping.len(),
            "wrote filter-repo plan"
        );
        Ok(vec![callback, script, instructions])
    }
}

/// Global that holds the rename table between callback invocations.
const CACHE_NAME: &str = "_winsafe_renames";

/// Body of a `--filename-callback`. filter-repo wraps it in a function taking
/// `filename` as bytes and calls it for every path of every commit, so the
/// table is built on the first call and kept in the module globals.
pub(crate) fn render_callback(mapping: &RenameMapping) -> String {
    let mut out = format!(
        "renames = globals().get(\"{CACHE_NAME}\")\n\
         if renames is None:\n    \
         renames = globals()[\"{CACHE_NAME}\"] = {{\n"
    );
    for pair in mapping {
        let _ = writeln!(
            out,
            "        {}: {},",
            python_bytes_literal(&pair.original),
            python_bytes_literal(&pair.sanitized)
        );
    }
    out.push_str("    }\nreturn renames.get(filename, filename)\n");
    out
}

pub(crate) fn render_script(count: usize, digest: &str) -> String {
    format!(
        r#"#!/usr/bin/env bash
# Rewrites every commit so tracked paths are valid on Windows.
# Renames: {count}
# Plan digest: {digest}
set -euo pipefail

REPO="${{1:-.}}"
PLAN_DIR="$(cd "$(dirname "${{BASH_SOURCE[0]}}")" && pwd)"

if ! git filter-repo --version >/dev/null 2>&1; then
    echo "git filter-repo is not installed (pip install git-filter-repo)" >&2
    exit 1
fi

cd "$REPO"
git filter-repo --force --filename-callback "$(cat "$PLAN_DIR/{CALLBACK_FILE}")"
echo "Rewrote history with {count} path rename(s)."
"#
    )
}

/// Renders `s` as a Python bytes literal (`b"..."`), escaping quotes,
/// backslashes and every byte outside printable ASCII.
pub fn python_bytes_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 3);
    out.push_str("b\"");
    for &b in s.as_bytes() {
        match b {
            b'\\' => out.push_str("\\\\"),
            b'"' => out.push_str("\\\""),
            0x20..=0x7e => out.push(b as char),
            _ => {
                let _ = write!(out, "\\x{b:02x}");
            }
        }
    }
    out.push('"');
    out
}
