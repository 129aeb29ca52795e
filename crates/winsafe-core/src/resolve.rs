//! Uniqueness resolution for sanitized paths.
//!
//! Resolution is order-dependent: the first path to claim a name keeps it,
//! later ones get a counter suffix. Callers must feed paths in a stable order
//! and must not run this step concurrently.

use std::collections::HashSet;

use crate::error::SanitizeError;
use crate::sanitize::{fit_with_suffix, split_extension, DEFAULT_MAX_SEGMENT_LEN};

/// Default bound on counter attempts per path.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10_000;

/// Set of paths already assigned during one mapping build.
///
/// Every directory above a claimed path is tracked too, so a file can never
/// be placed where a directory exists and the other way round.
#[derive(Debug, Default, Clone)]
pub struct UsedNameRegistry {
    used: HashSet<String>,
    dirs: HashSet<String>,
}

impl UsedNameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when `path` itself has been claimed.
    pub fn contains(&self, path: &str) -> bool {
        self.used.contains(path)
    }

    /// True when `path` cannot be claimed: it is a claimed path, a directory
    /// of one, or lies below a claimed path.
    pub fn is_taken(&self, path: &str) -> bool {
        self.used.contains(path) || self.dirs.contains(path) || self.has_file_ancestor(path)
    }

    /// True when some directory of `path` has itself been claimed as a file.
    pub fn has_file_ancestor(&self, path: &str) -> bool {
        parent_dirs(path).any(|dir| self.used.contains(dir))
    }

    /// Claims `path`; returns false if it was already taken.
    pub fn claim(&mut self, path: &str) -> bool {
        if self.is_taken(path) {
            return false;
        }
        for dir in parent_dirs(path) {
            if !self.dirs.contains(dir) {
                self.dirs.insert(dir.to_string());
            }
        }
        self.used.insert(path.to_string())
    }

    pub fn len(&self) -> usize {
        self.used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }
}

/// `a/b/c` → `a`, `a/b`.
fn parent_dirs(path: &str) -> impl Iterator<Item = &str> {
    path.match_indices('/').map(move |(idx, _)| &path[..idx])
}

/// Appends `_<n>` before the extension of the final segment until a free
/// name is found.
#[derive(Debug, Clone, Copy)]
pub struct UniquenessResolver {
    max_segment_len: usize,
    max_attempts: u32,
}

impl UniquenessResolver {
    pub fn new(max_segment_len: usize, max_attempts: u32) -> Self {
        Self {
            max_segment_len,
            max_attempts,
        }
    }

    /// Returns `sanitized` if it is free, otherwise the first free suffixed
    /// variant. The returned path is claimed in `registry`.
    ///
    /// When the stem already ends in `_` the counter is appended directly
    /// (`a_.txt` → `a_1.txt`) so no double underscore appears. The final
    /// segment is shortened if the suffix would push it past the length limit.
    ///
    /// A path below a file that is already claimed fails at once with
    /// `ResolutionExhausted { attempts: 0 }`.
    pub fn resolve(
        &self,
        sanitized: &str,
        registry: &mut UsedNameRegistry,
    ) -> Result<String, SanitizeError> {
        if registry.claim(sanitized) {
            return Ok(sanitized.to_string());
        }

        // Only the final segment is varied, which cannot help when a parent
        // directory is already a file.
        if registry.has_file_ancestor(sanitized) {
            return Err(SanitizeError::ResolutionExhausted {
                path: sanitized.to_string(),
                attempts: 0,
            });
        }

        let (dir, file) = match sanitized.rfind('/') {
            Some(idx) => sanitized.split_at(idx + 1),
            None => ("", sanitized),
        };
        let (stem, ext) = split_extension(file);

        for counter in 1..=self.max_attempts {
            let candidate = format!(
                "{dir}{}",
                fit_with_suffix(stem, counter, ext, self.max_segment_len)
            );
            if registry.claim(&candidate) {
                tracing::debug!(from = sanitized, to = %candidate, "resolved name collision");
                return Ok(candidate);
            }
        }

        Err(SanitizeError::ResolutionExhausted {
            path: sanitized.to_string(),
            attempts: self.max_attempts,
        })
    }
}

impl Default for UniquenessResolver {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SEGMENT_LEN, DEFAULT_MAX_ATTEMPTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_claim_keeps_name() {
        let mut reg = UsedNameRegistry::new();
        let r = UniquenessResolver::default();
        assert_eq!(r.resolve("docs/a.txt", &mut reg).unwrap(), "docs/a.txt");
        assert!(reg.contains("docs/a.txt"));
    }

    #[test]
    fn collisions_get_counter_before_extension() {
        let mut reg = UsedNameRegistry::new();
        let r = UniquenessResolver::default();
        assert_eq!(r.resolve("d/page.html", &mut reg).unwrap(), "d/page.html");
        assert_eq!(r.resolve("d/page.html", &mut reg).unwrap(), "d/page_1.html");
        assert_eq!(r.resolve("d/page.html", &mut reg).unwrap(), "d/page_2.html");
        assert_eq!(reg.len(), 3);
    }

    #[test]
    fn trailing_underscore_stem_gets_bare_counter() {
        let mut reg = UsedNameRegistry::new();
        let r = UniquenessResolver::default();
        r.resolve("a_.txt", &mut reg).unwrap();
        assert_eq!(r.resolve("a_.txt", &mut reg).unwrap(), "a_1.txt");
    }

    #[test]
    fn no_extension_and_dotted_directories() {
        let mut reg = UsedNameRegistry::new();
        let r = UniquenessResolver::default();
        r.resolve("v1.2/README", &mut reg).unwrap();
        assert_eq!(r.resolve("v1.2/README", &mut reg).unwrap(), "v1.2/README_1");
    }

    #[test]
    fn skips_already_claimed_suffixes() {
        let mut reg = UsedNameRegistry::new();
        assert!(reg.claim("x_1.txt"));
        assert!(reg.claim("x.txt"));
        let r = UniquenessResolver::default();
        assert_eq!(r.resolve("x.txt", &mut reg).unwrap(), "x_2.txt");
    }

    #[test]
    fn suffix_respects_segment_limit() {
        let name = format!("{}.txt", "n".repeat(196));
        let mut reg = UsedNameRegistry::new();
        let r = UniquenessResolver::default();
        r.resolve(&name, &mut reg).unwrap();
        let second = r.resolve(&name, &mut reg).unwrap();
        assert_eq!(second.len(), 200);
        assert!(second.ends_with("_1.txt"));
        assert_ne!(second, name);
    }

    #[test]
    fn shortened_stem_ending_in_underscore_gets_bare_counter() {
        let name = format!("{}_mm.txt", "n".repeat(193));
        let mut reg = UsedNameRegistry::new();
        let r = UniquenessResolver::default();
        r.resolve(&name, &mut reg).unwrap();
        let second = r.resolve(&name, &mut reg).unwrap();
        assert!(second.len() <= 200);
        assert!(!second.contains("__"), "{second}");
        assert!(second.ends_with("nn_1.txt"));
    }

    #[test]
    fn file_cannot_take_the_name_of_a_claimed_directory() {
        let mut reg = UsedNameRegistry::new();
        assert!(reg.claim("docs_/readme.md"));
        assert!(reg.is_taken("docs_"));
        assert!(!reg.contains("docs_"));
        let r = UniquenessResolver::default();
        assert_eq!(r.resolve("docs_", &mut reg).unwrap(), "docs_1");
    }

    #[test]
    fn path_below_a_claimed_file_is_exhausted() {
        let mut reg = UsedNameRegistry::new();
        assert!(reg.claim("docs_"));
        assert!(!reg.claim("docs_/readme.md"));
        let r = UniquenessResolver::default();
        assert_eq!(
            r.resolve("docs_/readme.md", &mut reg).unwrap_err(),
            SanitizeError::ResolutionExhausted {
                path: "docs_/readme.md".to_string(),
                attempts: 0
            }
        );
    }

    #[test]
    fn exhaustion_is_reported() {
        let mut reg = UsedNameRegistry::new();
        let r = UniquenessResolver::new(200, 2);
        for p in ["f.txt", "f_1.txt", "f_2.txt"] {
            assert!(reg.claim(p));
        }
        assert_eq!(
            r.resolve("f.txt", &mut reg).unwrap_err(),
            SanitizeError::ResolutionExhausted {
                path: "f.txt".to_string(),
                attempts: 2
            }
        );
    }
}
