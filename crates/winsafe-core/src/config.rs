use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::RuleError;
use crate::resolve::DEFAULT_MAX_ATTEMPTS;
use crate::rules::{AmpersandStyle, Rule, RuleTable};
use crate::sanitize::DEFAULT_MAX_SEGMENT_LEN;

/// Rule table selection (optional `[rules]` section in config.toml).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// How the built-in table rewrites `&`: "word" (`_and_`) or "underscore" (`_`).
    #[serde(default)]
    pub ampersand: AmpersandStyle,
    /// Replaces the built-in table entirely when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<Vec<Rule>>,
}

impl RulesConfig {
    pub fn rule_table(&self) -> Result<RuleTable, RuleError> {
        match &self.table {
            Some(rules) => RuleTable::new(rules.clone()),
            None => Ok(RuleTable::windows(self.ampersand)),
        }
    }
}

/// Global configuration loaded from `~/.config/winsafe/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WinsafeConfig {
    /// Revision whose tree is scanned when none is given on the command line.
    pub revision: String,
    /// Maximum byte length of a sanitized path segment.
    pub max_segment_len: usize,
    /// Number of problematic paths listed in a scan report.
    pub example_limit: usize,
    /// Number of renames previewed after planning.
    pub preview_limit: usize,
    /// Upper bound on counter suffixes tried per colliding path.
    pub max_resolution_attempts: u32,
    /// Keep renamed paths from landing on paths that already exist in the tree.
    pub reserve_existing_paths: bool,
    pub rules: RulesConfig,
}

impl Default for WinsafeConfig {
    fn default() -> Self {
        Self {
            revision: "HEAD".to_string(),
            max_segment_len: DEFAULT_MAX_SEGMENT_LEN,
            example_limit: 10,
            preview_limit: 5,
            max_resolution_attempts: DEFAULT_MAX_ATTEMPTS,
            reserve_existing_paths: true,
            rules: RulesConfig::default(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("winsafe")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<WinsafeConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = WinsafeConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from_path(&path)
}

/// Load configuration from an explicit file.
pub fn load_from_path(path: &Path) -> Result<WinsafeConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config: {}", path.display()))?;
    let cfg: WinsafeConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    if cfg.max_segment_len < 8 {
        anyhow::bail!(
            "max_segment_len = {} is too small to hold a name and a counter suffix",
            cfg.max_segment_len
        );
    }
    cfg.rules
        .rule_table()
        .with_context(|| format!("invalid [rules] in {}", path.display()))?;
    Ok(cfg)
}
