//! TOML configuration for the lookup service.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub cache: CacheConfig,
    pub dataset: DatasetConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    /// Result cache capacity in bytes. Zero disables caching.
    pub capacity_bytes: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatasetConfig {
    pub dir: PathBuf,
    #[serde(default)]
    pub variant: DatasetVariant,
}

/// Which boundary dataset file to bind: the full set or a reduced subset
/// with the same shape and fewer entries.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DatasetVariant {
    #[default]
    Full,
    Reduced,
}

impl DatasetVariant {
    pub fn features_file(&self) -> &'static str {
        match self {
            DatasetVariant::Full => "features.geojson",
            DatasetVariant::Reduced => "features.reduced.geojson",
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }
}
