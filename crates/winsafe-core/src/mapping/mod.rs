//! Rename mapping construction, reporting and persistence.
//!
//! The builder scans a list of tracked paths, keeps the ones containing a
//! forbidden character, sanitizes them and resolves collisions in input
//! order. The result is an ordered, injective list of
//! `(original, sanitized)` pairs.

mod builder;
pub mod persist;
mod report;

pub use builder::{BuildOutcome, MappingBuilder};
pub use report::ProblemReport;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One planned rename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenamePair {
    pub original: String,
    pub sanitized: String,
}

/// Ordered, one-to-one mapping from original paths to sanitized paths.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RenameMapping {
    pairs: Vec<RenamePair>,
}

impl RenameMapping {
    /// Builds a mapping from pairs, rejecting repeated originals or targets.
    pub fn from_pairs(pairs: Vec<RenamePair>) -> anyhow::Result<Self> {
        let mut originals = HashSet::new();
        let mut targets = HashSet::new();
        for pair in &pairs {
            if !originals.insert(pair.original.as_str()) {
                anyhow::bail!("original path listed twice: {}", pair.original);
            }
            if !targets.insert(pair.sanitized.as_str()) {
                anyhow::bail!("sanitized path assigned twice: {}", pair.sanitized);
            }
        }
        Ok(Self { pairs })
    }

    pub(crate) fn push(&mut self, original: String, sanitized: String) {
        self.pairs.push(RenamePair {
            original,
            sanitized,
        });
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> &[RenamePair] {
        &self.pairs
    }

    pub fn iter(&self) -> impl Iterator<Item = &RenamePair> {
        self.pairs.iter()
    }

    /// Sanitized path planned for `original`, if it is being renamed.
    pub fn get(&self, original: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|p| p.original == original)
            .map(|p| p.sanitized.as_str())
    }
}

impl<'a> IntoIterator for &'a RenameMapping {
    type Item = &'a RenamePair;
    type IntoIter = std::slice::Iter<'a, RenamePair>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(o: &str, s: &str) -> RenamePair {
        RenamePair {
            original: o.to_string(),
            sanitized: s.to_string(),
        }
    }

    #[test]
    fn from_pairs_accepts_injective_list() {
        let m = RenameMapping::from_pairs(vec![pair("a?", "a_"), pair("b?", "b_")]).unwrap();
        assert_eq!(m.len(), 2);
        assert_eq!(m.get("b?"), Some("b_"));
        assert_eq!(m.get("c"), None);
    }

    #[test]
    fn from_pairs_rejects_duplicates() {
        assert!(RenameMapping::from_pairs(vec![pair("a?", "a_"), pair("a?", "b_")]).is_err());
        assert!(RenameMapping::from_pairs(vec![pair("a?", "a_"), pair("a:", "a_")]).is_err());
    }
}
