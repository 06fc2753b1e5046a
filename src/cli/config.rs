//! TOML configuration file support.
//!
//! Settings that would otherwise be passed as flags can live in a file:
//!
//! ```toml
//! # sdfmerge.toml
//! [merge]
//! read_concurrency = 8
//! expand_archives = true
//! max_archive_depth = 2
//! output_dir = "merged"
//! ```
//!
//! Command-line flags take precedence over the file.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use sdfmerge::merge::MergerConfig;

/// Root of an sdfmerge.toml file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Merge settings.
    #[serde(default)]
    pub merge: MergeSection,
}

/// The `[merge]` table.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MergeSection {
    /// Threads reading input files.
    pub read_concurrency: Option<usize>,

    /// Expand ZIP archives inline.
    pub expand_archives: Option<bool>,

    /// Levels of nested archives to expand.
    pub max_archive_depth: Option<usize>,

    /// Directory for generated output files.
    pub output_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content)
    }

    /// Load `path` if given, otherwise the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Merger configuration with file settings applied over the defaults
    pub fn merger_config(&self) -> MergerConfig {
        let mut config = MergerConfig::default();
        if let Some(n) = self.merge.read_concurrency {
            config = config.with_read_concurrency(n);
        }
        if let Some(expand) = self.merge.expand_archives {
            config = config.with_expand_archives(expand);
        }
        if let Some(depth) = self.merge.max_archive_depth {
            config = config.with_max_archive_depth(depth);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [merge]
            read_concurrency = 8
            expand_archives = false
            max_archive_depth = 2
            output_dir = "out"
        "#;

        let config = Config::parse(toml).unwrap();
        assert_eq!(config.merge.read_concurrency, Some(8));
        assert_eq!(config.merge.output_dir, Some(PathBuf::from("out")));

        let merger = config.merger_config();
        assert_eq!(merger.read_concurrency, 8);
        assert!(!merger.expand_archives);
        assert_eq!(merger.max_archive_depth, 2);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = Config::parse("[merge]\nread_concurrency = 0\n").unwrap();
        let merger = config.merger_config();
        assert_eq!(merger.read_concurrency, 1);
        assert_eq!(merger.expand_archives, MergerConfig::default().expand_archives);
    }

    #[test]
    fn test_empty_config() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.merge.read_concurrency, None);
        assert_eq!(config.merger_config(), MergerConfig::default());
    }

    #[test]
    fn test_load_optional_file() {
        assert_eq!(Config::load(None).unwrap().merger_config(), MergerConfig::default());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sdfmerge.toml");
        std::fs::write(&path, "[merge]\nexpand_archives = false\n").unwrap();
        assert!(!Config::load(Some(&path)).unwrap().merger_config().expand_archives);

        assert!(Config::load(Some(&dir.path().join("missing.toml"))).is_err());
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(Config::parse("[merge]\ncompression = 3\n").is_err());
    }
}
