//! winsafe core: Windows-safe path sanitization and rename planning for Git
//! repository histories.

pub mod config;
pub mod error;
pub mod logging;

pub mod checksum;
pub mod lister;
pub mod mapping;
pub mod resolve;
pub mod rewrite;
pub mod rules;
pub mod sanitize;
pub mod storage;

pub use error::{RuleError, SanitizeError};
pub use mapping::{BuildOutcome, MappingBuilder, ProblemReport, RenameMapping, RenamePair};
pub use resolve::{UniquenessResolver, UsedNameRegistry};
pub use rules::{AmpersandStyle, Rule, RuleTable};
pub use sanitize::SegmentSanitizer;
