//! Error kinds raised by the sanitization engine.

use thiserror::Error;

/// Conditions reported while sanitizing paths and building a rename mapping.
///
/// `MalformedSanitizedPath` and `DecodeFailure` are recovered locally by the
/// engine (the first is collected as a per-path diagnostic, the second falls
/// back to the pre-decode value). `ResolutionExhausted` aborts a build.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SanitizeError {
    /// Sanitization produced an empty segment (or an empty path).
    #[error("sanitizing {original:?} left segment {index} empty (got {sanitized:?})")]
    MalformedSanitizedPath {
        original: String,
        sanitized: String,
        /// Zero-based index of the first empty segment.
        index: usize,
    },

    /// A `%` escape could not be decoded into UTF-8 text.
    #[error("percent-decoding {input:?} failed at byte {offset}: {reason}")]
    DecodeFailure {
        input: String,
        offset: usize,
        reason: &'static str,
    },

    /// No free name was found for a path within the configured attempt limit.
    #[error("no unique name for {path:?} after {attempts} attempts")]
    ResolutionExhausted { path: String, attempts: u32 },
}

impl SanitizeError {
    /// Original path this diagnostic refers to, when there is one.
    pub fn path(&self) -> &str {
        match self {
            SanitizeError::MalformedSanitizedPath { original, .. } => original,
            SanitizeError::DecodeFailure { input, .. } => input,
            SanitizeError::ResolutionExhausted { path, .. } => path,
        }
    }
}

/// Invalid rule table supplied through configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("rule {index} lists no characters")]
    EmptyCharacterSet { index: usize },

    #[error("character {ch:?} is claimed by rules {first} and {second}")]
    DuplicateCharacter { ch: char, first: usize, second: usize },

    #[error("replacement {replacement:?} of rule {index} contains {ch:?}, which is itself forbidden")]
    ForbiddenReplacement {
        index: usize,
        replacement: String,
        ch: char,
    },
}
