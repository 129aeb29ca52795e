//! Single-segment sanitizer.

use crate::rules::RuleTable;

use super::percent::{has_percent_triplet, percent_decode};
use super::truncate::truncate_preserving_extension;

/// Maximum byte length of a sanitized segment.
pub const DEFAULT_MAX_SEGMENT_LEN: usize = 200;

/// Sanitizes path segments with a fixed rule table and length limit.
#[derive(Debug, Clone)]
pub struct SegmentSanitizer {
    rules: RuleTable,
    max_len: usize,
}

impl SegmentSanitizer {
    pub fn new(rules: RuleTable, max_len: usize) -> Self {
        Self { rules, max_len }
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Sanitizes one segment (no `/`).
    ///
    /// Returns an empty string when nothing but forbidden characters, dots and
    /// spaces remain; callers must treat that as a malformed result.
    pub fn sanitize(&self, segment: &str) -> String {
        let mut pass = self.rules.substitute(segment);

        if has_percent_triplet(&pass.text) {
            match percent_decode(&pass.text) {
                Ok(decoded) => pass = self.rules.substitute_decoded(&decoded),
                Err(err) => {
                    tracing::debug!(%err, "keeping segment undecoded");
                }
            }
        }

        if !pass.substantive {
            return String::new();
        }

        let collapsed = collapse_underscores(&pass.text);
        let trimmed = collapsed.trim_matches(|c| c == '.' || c == ' ');
        truncate_preserving_extension(trimmed, self.max_len)
    }
}

impl Default for SegmentSanitizer {
    fn default() -> Self {
        Self::new(RuleTable::default(), DEFAULT_MAX_SEGMENT_LEN)
    }
}

fn collapse_underscores(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_underscore = false;
    for c in s.chars() {
        if c == '_' {
            if !prev_underscore {
                out.push('_');
            }
            prev_underscore = true;
        } else {
            out.push(c);
            prev_underscore = false;
        }
    }
    out
}
