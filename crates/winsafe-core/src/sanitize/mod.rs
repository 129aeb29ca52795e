//! Windows-safe sanitization of path segments and whole paths.
//!
//! A segment goes through: rule substitution, optional single percent-decode
//! with re-substitution, underscore collapsing, trimming of dots and spaces,
//! and a byte-length limit that keeps the extension.

mod path;
mod percent;
mod segment;
mod truncate;

pub use percent::{has_percent_triplet, percent_decode};
pub use segment::{SegmentSanitizer, DEFAULT_MAX_SEGMENT_LEN};
pub use truncate::truncate_preserving_extension;

pub(crate) use truncate::{fit_with_suffix, split_extension};
