//! `winsafe scan` – count problematic paths and show examples.

use anyhow::Result;
use winsafe_core::config::WinsafeConfig;
use winsafe_core::MappingBuilder;

use super::source::list_paths;
use crate::cli::SourceArgs;

pub async fn run_scan(cfg: &WinsafeConfig, source: &SourceArgs) -> Result<()> {
    let paths = list_paths(cfg, source).await?;
    let builder = MappingBuilder::from_config(cfg)?;
    let report = builder.report(&paths, cfg.example_limit);

    println!("Total paths:       {}", report.total_paths);
    println!("Problematic paths: {}", report.problematic_count);
    if report.problematic_count == 0 {
        println!("No problematic paths found.");
        return Ok(());
    }

    println!();
    println!("Examples:");
    for path in &report.examples {
        println!("  {path}");
    }
    if report.remaining() > 0 {
        println!("  ... and {} more", report.remaining());
    }
    Ok(())
}
