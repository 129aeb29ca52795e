//! Plan fingerprints.
//!
//! The digest of a mapping's text form lets two runs (or two machines) confirm
//! they produced the identical rename plan before history is rewritten.

use sha2::{Digest, Sha256};

use crate::mapping::persist;
use crate::mapping::RenameMapping;

/// SHA-256 of `data` as lowercase hex.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// SHA-256 of the mapping's text serialization.
pub fn plan_digest(mapping: &RenameMapping) -> String {
    sha256_hex(persist::to_text(mapping).as_bytes())
}
