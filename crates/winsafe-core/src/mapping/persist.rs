//! Text and JSON forms of a rename mapping.
//!
//! Text form:
//!
//! ```text
//! Original -> Sanitized
//! ==================================================
//! blog/index.html?p=12 -> blog/index.html_p_12
//! ```
//!
//! `>` is forbidden in sanitized paths, so the last ` -> ` on a line always
//! separates the two sides even if the original path contains the arrow.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::Path;

use super::{RenameMapping, RenamePair};
use crate::storage;

pub const TEXT_HEADER: &str = "Original -> Sanitized";
const SEPARATOR: &str = " -> ";
const RULE_WIDTH: usize = 50;

/// On-disk format of a mapping file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MappingFormat {
    #[default]
    Text,
    Json,
}

impl MappingFormat {
    /// Conventional file name for this format.
    pub fn file_name(self) -> &'static str {
        match self {
            MappingFormat::Text => "rename_mapping.txt",
            MappingFormat::Json => "rename_mapping.json",
        }
    }

    /// Format implied by a file extension (`.json` → JSON, anything else → text).
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => MappingFormat::Json,
            _ => MappingFormat::Text,
        }
    }
}

pub fn to_text(mapping: &RenameMapping) -> String {
    let mut out = String::new();
    out.push_str(TEXT_HEADER);
    out.push('\n');
    out.push_str(&"=".repeat(RULE_WIDTH));
    out.push('\n');
    for pair in mapping {
        let _ = writeln!(out, "{}{SEPARATOR}{}", pair.original, pair.sanitized);
    }
    out
}

pub fn parse_text(text: &str) -> Result<RenameMapping> {
    let mut pairs = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.is_empty() || line == TEXT_HEADER || is_rule(line) {
            continue;
        }
        let (original, sanitized) = line
            .rsplit_once(SEPARATOR)
            .with_context(|| format!("line {}: missing \"{}\"", lineno + 1, SEPARATOR.trim()))?;
        pairs.push(RenamePair {
            original: original.to_string(),
            sanitized: sanitized.to_string(),
        });
    }
    RenameMapping::from_pairs(pairs)
}

fn is_rule(line: &str) -> bool {
    line.chars().all(|c| c == '=')
}

pub fn to_json(mapping: &RenameMapping) -> Result<String> {
    serde_json::to_string_pretty(mapping).context("serialize rename mapping")
}

pub fn parse_json(text: &str) -> Result<RenameMapping> {
    let pairs: Vec<RenamePair> = serde_json::from_str(text).context("parse rename mapping JSON")?;
    RenameMapping::from_pairs(pairs)
}

/// Write `mapping` to `path` in `format`, atomically.
pub fn write_mapping(path: &Path, mapping: &RenameMapping, format: MappingFormat) -> Result<()> {
    let body = match format {
        MappingFormat::Text => to_text(mapping),
        MappingFormat::Json => to_json(mapping)?,
    };
    storage::write_atomic(path, body.as_bytes())
        .with_context(|| format!("write rename mapping: {}", path.display()))
}

/// Read a mapping file, picking the format from its extension.
pub fn read_mapping(path: &Path) -> Result<RenameMapping> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read rename mapping: {}", path.display()))?;
    match MappingFormat::from_path(path) {
        MappingFormat::Text => parse_text(&text),
        MappingFormat::Json => parse_json(&text),
    }
    .with_context(|| format!("load rename mapping: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RenameMapping {
        RenameMapping::from_pairs(vec![
            RenamePair {
                original: "blog/index.html?p=12".to_string(),
                sanitized: "blog/index.html_p_12".to_string(),
            },
            RenamePair {
                original: "odd -> name?.txt".to_string(),
                sanitized: "odd - name_.txt".to_string(),
            },
        ])
        .unwrap()
    }

    #[test]
    fn text_layout() {
        let text = to_text(&sample());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Original -> Sanitized");
        assert_eq!(lines[1], "=".repeat(50));
        assert_eq!(lines[2], "blog/index.html?p=12 -> blog/index.html_p_12");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn parse_text_splits_on_last_arrow() {
        let parsed = parse_text(&to_text(&sample())).unwrap();
        assert_eq!(parsed, sample());
        assert_eq!(parsed.get("odd -> name?.txt"), Some("odd - name_.txt"));
    }

    #[test]
    fn parse_text_accepts_crlf_and_no_header() {
        let parsed = parse_text("a? -> a_\r\nb* -> b_\r\n").unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed.get("b*"), Some("b_"));
    }

    #[test]
    fn parse_text_rejects_garbage() {
        let err = parse_text("Original -> Sanitized\nnot a pair\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn json_shape() {
        let json = to_json(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["original"], "blog/index.html?p=12");
        assert_eq!(value[1]["sanitized"], "odd - name_.txt");
        assert_eq!(parse_json(&json).unwrap(), sample());
    }

    #[test]
    fn write_and_read_both_formats() {
        let dir = tempfile::tempdir().unwrap();
        for format in [MappingFormat::Text, MappingFormat::Json] {
            let path = dir.path().join(format.file_name());
            write_mapping(&path, &sample(), format).unwrap();
            assert_eq!(MappingFormat::from_path(&path), format);
            assert_eq!(read_mapping(&path).unwrap(), sample());
        }
    }
}
