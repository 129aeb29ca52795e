//! `winsafe plan` – build the rename mapping and write a filter-repo plan.

use anyhow::Result;
use std::path::Path;
use winsafe_core::checksum::plan_digest;
use winsafe_core::config::WinsafeConfig;
use winsafe_core::mapping::persist::{write_mapping, MappingFormat};
use winsafe_core::rewrite::{FilterRepoPlan, HistoryRewriter};
use winsafe_core::MappingBuilder;

use super::source::list_paths;
use crate::cli::SourceArgs;

pub async fn run_plan(
    cfg: &WinsafeConfig,
    source: &SourceArgs,
    out_dir: &Path,
    format: MappingFormat,
) -> Result<()> {
    let paths = list_paths(cfg, source).await?;
    let builder = MappingBuilder::from_config(cfg)?;
    let outcome = builder.build(&paths)?;

    println!(
        "Found {} problematic path(s) out of {}.",
        outcome.problematic_count,
        paths.len()
    );
    if outcome.problematic_count == 0 {
        println!("Nothing to rename.");
        return Ok(());
    }

    if !outcome.malformed.is_empty() {
        println!();
        println!(
            "Skipped {} path(s) that sanitize to an empty name:",
            outcome.malformed.len()
        );
        for err in &outcome.malformed {
            println!("  {}", err.path());
        }
    }

    if outcome.mapping.is_empty() {
        println!("No renames could be planned.");
        return Ok(());
    }

    println!();
    println!("Example renames:");
    for pair in outcome.mapping.iter().take(cfg.preview_limit) {
        println!("  {} -> {}", pair.original, pair.sanitized);
    }

    let mapping_file = out_dir.join(format.file_name());
    write_mapping(&mapping_file, &outcome.mapping, format)?;
    let written = FilterRepoPlan::new(out_dir).rewrite(&outcome.mapping)?;

    println!();
    println!("Wrote {}", mapping_file.display());
    for path in &written {
        println!("Wrote {}", path.display());
    }
    println!("Plan digest: {}", plan_digest(&outcome.mapping));
    Ok(())
}
