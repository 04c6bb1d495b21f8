//! Config file loading

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::merge::{parse_header_mapping, HeaderMapping};

pub const DEFAULT_PREVIEW_ROWS: usize = 20;

/// Settings read from `opps-merge.toml` / `opps-merge.yml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Default `--metrics-cols` mapping.
    pub metrics_cols: Option<MetricsCols>,
    /// Rows shown by `preview`.
    pub preview_rows: usize,
    /// Field delimiter for every CSV read and written.
    pub delimiter: char,
}

impl Default for Config {
    fn default() -> Self {
        Self { metrics_cols: None, preview_rows: DEFAULT_PREVIEW_ROWS, delimiter: ',' }
    }
}

/// `metrics_cols` accepts the CLI spec string or a table of
/// `expected = "source"` pairs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum MetricsCols {
    Spec(String),
    Table(BTreeMap<String, String>),
}

impl MetricsCols {
    pub fn to_mapping(&self) -> Result<HeaderMapping> {
        match self {
            MetricsCols::Spec(spec) => Ok(parse_header_mapping(Some(spec.as_str()))?),
            MetricsCols::Table(pairs) => Ok(pairs
                .iter()
                .map(|(expected, source)| (expected.trim(), source.trim()))
                .collect()),
        }
    }
}

impl Config {
    /// Delimiter as a CSV byte. Must be a single ASCII character.
    pub fn delimiter_byte(&self) -> Result<u8> {
        if self.delimiter.is_ascii() {
            Ok(self.delimiter as u8)
        } else {
            anyhow::bail!("delimiter must be a single ASCII character, got '{}'", self.delimiter)
        }
    }
}

/// Load config from `config_path`, or discover one in `search_dir`.
///
/// An explicit file must parse; an auto-discovered file that does not is
/// skipped with a warning.
pub fn load_config(search_dir: &Path, config_path: Option<&Path>) -> Result<Config> {
    let config_path_provided = config_path.is_some();

    let discovered = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover_config(search_dir),
    };

    let Some(config_file) = discovered else {
        return Ok(Config::default());
    };

    let content = fs::read_to_string(&config_file)
        .with_context(|| format!("Failed reading config file: {}", config_file.display()))?;

    let ext = config_file.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();

    let parsed = match ext.as_str() {
        "toml" => parse_toml_config(&content, &config_file),
        "yaml" | "yml" => parse_yaml_config(&content, &config_file),
        other => Err(anyhow::anyhow!(
            "Unsupported config extension '.{}' for file {}",
            other,
            config_file.display()
        )),
    };

    match parsed {
        Ok(cfg) => {
            tracing::debug!("Loaded config from {}", config_file.display());
            Ok(cfg)
        }
        Err(e) if config_path_provided => Err(e),
        Err(e) => {
            tracing::warn!(
                "Failed to parse auto-discovered config {}: {:#}",
                config_file.display(),
                e
            );
            Ok(Config::default())
        }
    }
}

/// Parse TOML config, supporting a nested `[opps-merge]` section.
fn parse_toml_config(content: &str, config_file: &Path) -> Result<Config> {
    let raw: toml::Value = toml::from_str(content)
        .with_context(|| format!("Invalid TOML syntax: {}", config_file.display()))?;

    let config_val = match raw.get("opps-merge") {
        Some(nested) => nested.clone(),
        None => raw,
    };

    config_val.try_into().with_context(|| format!("Invalid TOML config: {}", config_file.display()))
}

/// Parse YAML config, supporting a nested `opps-merge` section.
fn parse_yaml_config(content: &str, config_file: &Path) -> Result<Config> {
    let raw: serde_yaml::Value = serde_yaml::from_str(content)
        .with_context(|| format!("Invalid YAML syntax: {}", config_file.display()))?;

    let config_val = match raw.get("opps-merge") {
        Some(nested) => nested.clone(),
        None => raw,
    };

    serde_yaml::from_value(config_val)
        .with_context(|| format!("Invalid YAML config: {}", config_file.display()))
}

fn discover_config(search_dir: &Path) -> Option<PathBuf> {
    let candidates = ["opps-merge.toml", ".opps-merge.toml", "opps-merge.yml", "opps-merge.yaml"];

    candidates.iter().map(|c| search_dir.join(c)).find(|path| path.exists())
}
