//! `winsafe sanitize <path>...` – show how individual paths would be rewritten.

use anyhow::Result;
use winsafe_core::config::WinsafeConfig;
use winsafe_core::MappingBuilder;

/// Prints `original -> sanitized` per path. Exits with an error if any path
/// sanitizes to a name with an empty segment.
pub fn run_sanitize(cfg: &WinsafeConfig, paths: &[String]) -> Result<()> {
    let builder = MappingBuilder::from_config(cfg)?;
    let mut malformed = 0usize;
    for path in paths {
        match builder.sanitizer().sanitize_path(path) {
            Ok(sanitized) => println!("{path} -> {sanitized}"),
            Err(err) => {
                malformed += 1;
                println!("{path} -> (invalid: {err})");
            }
        }
    }
    if malformed > 0 {
        anyhow::bail!("{malformed} path(s) sanitize to an empty segment");
    }
    Ok(())
}
