//! Mapping builder: filter, sanitize, resolve.

use std::collections::HashSet;

use crate::config::WinsafeConfig;
use crate::error::{RuleError, SanitizeError};
use crate::resolve::{UniquenessResolver, UsedNameRegistry};
use crate::sanitize::SegmentSanitizer;

use super::{ProblemReport, RenameMapping};

/// Result of one build pass.
#[derive(Debug, Clone, Default)]
pub struct BuildOutcome {
    pub mapping: RenameMapping,
    /// Distinct problematic paths found in the input, including malformed ones.
    pub problematic_count: usize,
    /// One `MalformedSanitizedPath` per problematic path left out of the mapping.
    pub malformed: Vec<SanitizeError>,
}

/// Builds rename mappings from lists of tracked paths.
#[derive(Debug, Clone)]
pub struct MappingBuilder {
    sanitizer: SegmentSanitizer,
    resolver: UniquenessResolver,
    reserve_existing: bool,
}

impl MappingBuilder {
    pub fn new(sanitizer: SegmentSanitizer, resolver: UniquenessResolver) -> Self {
        Self {
            sanitizer,
            resolver,
            reserve_existing: false,
        }
    }

    pub fn from_config(cfg: &WinsafeConfig) -> Result<Self, RuleError> {
        let rules = cfg.rules.rule_table()?;
        Ok(Self::new(
            SegmentSanitizer::new(rules, cfg.max_segment_len),
            UniquenessResolver::new(cfg.max_segment_len, cfg.max_resolution_attempts),
        )
        .reserve_existing_paths(cfg.reserve_existing_paths))
    }

    /// When enabled, paths that need no renaming are claimed up front, along
    /// with their directories, so a sanitized path can never replace a file
    /// or directory that already exists.
    pub fn reserve_existing_paths(mut self, reserve: bool) -> Self {
        self.reserve_existing = reserve;
        self
    }

    pub fn sanitizer(&self) -> &SegmentSanitizer {
        &self.sanitizer
    }

    pub fn is_problematic(&self, path: &str) -> bool {
        self.sanitizer.rules().contains_forbidden(path)
    }

    pub fn report<S: AsRef<str>>(&self, all_paths: &[S], limit: usize) -> ProblemReport {
        ProblemReport::from_paths(self.sanitizer.rules(), all_paths, limit)
    }

    /// Builds the rename mapping for `all_paths`.
    ///
    /// Output order follows input order. Paths whose sanitized form has an
    /// empty segment are collected in [`BuildOutcome::malformed`] and the rest
    /// of the batch continues. Only `ResolutionExhausted` aborts the build.
    pub fn build<S: AsRef<str>>(&self, all_paths: &[S]) -> Result<BuildOutcome, SanitizeError> {
        let mut seen = HashSet::new();
        let problematic: Vec<&str> = all_paths
            .iter()
            .map(AsRef::as_ref)
            .filter(|p| self.is_problematic(p))
            .filter(|p| seen.insert(*p))
            .collect();

        let mut registry = UsedNameRegistry::new();
        if self.reserve_existing {
            for path in all_paths.iter().map(AsRef::as_ref) {
                if !self.is_problematic(path) {
                    registry.claim(path);
                }
            }
        }

        // Sanitization is independent per path; resolution below must stay
        // sequential in input order.
        let sanitized: Vec<(&str, Result<String, SanitizeError>)> = problematic
            .iter()
            .map(|p| (*p, self.sanitizer.sanitize_path(p)))
            .collect();

        let mut outcome = BuildOutcome {
            problematic_count: problematic.len(),
            ..BuildOutcome::default()
        };
        for (original, result) in sanitized {
            match result {
                Ok(candidate) => {
                    let resolved = self.resolver.resolve(&candidate, &mut registry)?;
                    tracing::debug!(from = original, to = %resolved, "planned rename");
                    outcome.mapping.push(original.to_string(), resolved);
                }
                Err(err) => {
                    tracing::warn!(%err, "excluding path from rename mapping");
                    outcome.malformed.push(err);
                }
            }
        }

        tracing::info!(
            total = all_paths.len(),
            problematic = outcome.problematic_count,
            renamed = outcome.mapping.len(),
            malformed = outcome.malformed.len(),
            "rename mapping built"
        );
        Ok(outcome)
    }
}

impl Default for MappingBuilder {
    fn default() -> Self {
        Self::new(SegmentSanitizer::default(), UniquenessResolver::default())
    }
}
