//! Whole-path sanitization.

use crate::error::SanitizeError;

use super::segment::SegmentSanitizer;

impl SegmentSanitizer {
    /// Sanitizes every `/`-separated segment of `path` with the same rules.
    ///
    /// The segment count is preserved. If any segment comes out empty the
    /// path is reported as [`SanitizeError::MalformedSanitizedPath`] instead
    /// of silently merging directory levels.
    pub fn sanitize_path(&self, path: &str) -> Result<String, SanitizeError> {
        let segments: Vec<String> = path.split('/').map(|s| self.sanitize(s)).collect();
        let sanitized = segments.join("/");
        match segments.iter().position(String::is_empty) {
            Some(index) => Err(SanitizeError::MalformedSanitizedPath {
                original: path.to_string(),
                sanitized,
                index,
            }),
            None => Ok(sanitized),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitizes_each_segment() {
        let s = SegmentSanitizer::default();
        assert_eq!(
            s.sanitize_path("blog/index.html?p=12/feed").unwrap(),
            "blog/index.html_p_12/feed"
        );
        assert_eq!(
            s.sanitize_path("what?/why:/file*.txt").unwrap(),
            "what_/why_/file_.txt"
        );
    }

    #[test]
    fn preserves_segment_count() {
        let s = SegmentSanitizer::default();
        let out = s.sanitize_path("a%2Fb/c?").unwrap();
        assert_eq!(out.split('/').count(), 2);
    }

    #[test]
    fn empty_segment_is_malformed() {
        let s = SegmentSanitizer::default();
        match s.sanitize_path("docs/???/readme.md") {
            Err(SanitizeError::MalformedSanitizedPath {
                original,
                sanitized,
                index,
            }) => {
                assert_eq!(original, "docs/???/readme.md");
                assert_eq!(sanitized, "docs//readme.md");
                assert_eq!(index, 1);
            }
            other => panic!("expected MalformedSanitizedPath, got {other:?}"),
        }
    }

    #[test]
    fn empty_path_is_malformed() {
        let s = SegmentSanitizer::default();
        assert!(matches!(
            s.sanitize_path(""),
            Err(SanitizeError::MalformedSanitizedPath { index: 0, .. })
        ));
    }
}
