//! CLI for winsafe.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use winsafe_core::config::{self, WinsafeConfig};
use winsafe_core::mapping::persist::MappingFormat;
use winsafe_core::AmpersandStyle;

use commands::{run_completions, run_manpage, run_plan, run_sanitize, run_scan};

/// Top-level CLI for winsafe.
#[derive(Debug, Parser)]
#[command(name = "winsafe")]
#[command(about = "Plan Windows-safe renames for every path in a Git history", long_about = None)]
pub struct Cli {
    /// Use this config file instead of ~/.config/winsafe/config.toml.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

/// Where the list of tracked paths comes from.
#[derive(Debug, Clone, Args)]
pub struct SourceArgs {
    /// Repository to scan.
    #[arg(long, default_value = ".", value_name = "DIR")]
    pub repo: PathBuf,

    /// Revision whose tree is scanned (default from config, normally HEAD).
    #[arg(long, value_name = "REV")]
    pub rev: Option<String>,

    /// Read paths from a newline-separated file instead of running git.
    #[arg(long, value_name = "FILE", conflicts_with = "rev")]
    pub paths_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for MappingFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Text => MappingFormat::Text,
            FormatArg::Json => MappingFormat::Json,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AmpersandArg {
    /// `&` becomes `_and_`.
    Word,
    /// `&` becomes `_`.
    Underscore,
}

impl From<AmpersandArg> for AmpersandStyle {
    fn from(a: AmpersandArg) -> Self {
        match a {
            AmpersandArg::Word => AmpersandStyle::Word,
            AmpersandArg::Underscore => AmpersandStyle::Underscore,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Count tracked paths that are invalid on Windows and show examples.
    Scan {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Build the rename mapping and write a git filter-repo plan.
    Plan {
        #[command(flatten)]
        source: SourceArgs,

        /// Directory for the mapping file, callback, script and instructions.
        #[arg(long, default_value = "winsafe-plan", value_name = "DIR")]
        out_dir: PathBuf,

        /// Mapping file format.
        #[arg(long, value_enum, default_value = "text")]
        format: FormatArg,

        /// How `&` is rewritten (overrides config).
        #[arg(long, value_enum)]
        ampersand: Option<AmpersandArg>,
    },

    /// Print the sanitized form of each path (no collision handling).
    Sanitize {
        /// Paths to sanitize.
        #[arg(required = true)]
        paths: Vec<String>,

        /// How `&` is rewritten (overrides config).
        #[arg(long, value_enum)]
        ampersand: Option<AmpersandArg>,
    },

    /// Generate shell completions.
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },

    /// Print a man page (roff) to stdout.
    Manpage,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match &cli.command {
            CliCommand::Completions { shell } => return run_completions(*shell),
            CliCommand::Manpage => return run_manpage(),
            _ => {}
        }

        let cfg = load_config(cli.config.as_deref())?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Scan { source } => run_scan(&cfg, &source).await?,
            CliCommand::Plan {
                source,
                out_dir,
                format,
                ampersand,
            } => {
                let cfg = with_ampersand(cfg, ampersand)?;
                run_plan(&cfg, &source, &out_dir, format.into()).await?;
            }
            CliCommand::Sanitize { paths, ampersand } => {
                let cfg = with_ampersand(cfg, ampersand)?;
                run_sanitize(&cfg, &paths)?;
            }
            CliCommand::Completions { .. } | CliCommand::Manpage => {}
        }

        Ok(())
    }
}

fn load_config(path: Option<&std::path::Path>) -> Result<WinsafeConfig> {
    match path {
        Some(p) => config::load_from_path(p),
        None => config::load_or_init(),
    }
}

/// Applies `--ampersand`. A custom `[rules] table` has no ampersand profile,
/// so the flag is rejected rather than silently ignored.
fn with_ampersand(
    mut cfg: WinsafeConfig,
    ampersand: Option<AmpersandArg>,
) -> Result<WinsafeConfig> {
    if let Some(a) = ampersand {
        if cfg.rules.table.is_some() {
            anyhow::bail!(
                "--ampersand cannot be combined with a custom [rules] table in the config; \
                 edit the table's `&` entry instead"
            );
        }
        cfg.rules.ampersand = a.into();
    }
    Ok(cfg)
}

#[cfg(test)]
mod tests;
