//! Configuration loading and merging
//!
//! Handles loading from config files, environment variables, and CLI arguments
//! with proper precedence (CLI > Env > File > Defaults).

pub mod loader;

pub use loader::{load_config, Config, MetricsCols, DEFAULT_PREVIEW_ROWS};

use anyhow::Result;

use crate::merge::{parse_header_mapping, HeaderMapping};

/// Header mapping from the CLI/env spec, falling back to the config file.
pub fn resolve_header_mapping(cli_spec: Option<&str>, config: &Config) -> Result<HeaderMapping> {
    match cli_spec {
        Some(spec) => Ok(parse_header_mapping(Some(spec))?),
        None => match &config.metrics_cols {
            Some(cols) => cols.to_mapping(),
            None => Ok(HeaderMapping::new()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_spec_overrides_config() {
        let config = Config {
            metrics_cols: Some(MetricsCols::Spec("channel_id:From Config".to_string())),
            ..Config::default()
        };
        let mapping = resolve_header_mapping(Some("channel_id:From Cli"), &config).unwrap();
        assert_eq!(mapping.get("channel_id"), Some("From Cli"));

        let mapping = resolve_header_mapping(None, &config).unwrap();
        assert_eq!(mapping.get("channel_id"), Some("From Config"));
    }

    #[test]
    fn no_sources_means_empty_mapping() {
        assert!(resolve_header_mapping(None, &Config::default()).unwrap().is_empty());
    }
}
