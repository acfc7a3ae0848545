// File: src/config.rs
//! Configuration loading for the explorer front ends.

use crate::core::matcher::MAX_SUGGESTIONS;
use crate::core::types::{Year, YearRange, MAX_YEAR, MIN_YEAR};
use crate::error::{Result, TrendsError};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "baby-name-trends";

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Config {
    pub data: Option<DataConfig>,
    pub chart: Option<ChartConfig>,
    pub search: Option<SearchConfig>,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct DataConfig {
    /// Directory holding `manifest.json` and the chunk files.
    pub dir: Option<PathBuf>,
    /// Where the merged dataset is cached between runs.
    pub snapshot: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ChartConfig {
    pub start_year: Option<Year>,
    pub end_year: Option<Year>,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    pub max_suggestions: Option<usize>,
}

impl Config {
    pub fn data_dir(&self) -> Option<PathBuf> {
        self.data.as_ref().and_then(|d| d.dir.clone())
    }

    pub fn snapshot_path(&self) -> Option<PathBuf> {
        self.data.as_ref().and_then(|d| d.snapshot.clone())
    }

    /// Initial chart window, clamped to the years the data covers.
    pub fn year_range(&self) -> YearRange {
        let chart = self.chart.as_ref();
        YearRange::new(
            chart.and_then(|c| c.start_year).unwrap_or(MIN_YEAR),
            chart.and_then(|c| c.end_year).unwrap_or(MAX_YEAR),
        )
        .clamped()
    }

    pub fn max_suggestions(&self) -> usize {
        self.search
            .as_ref()
            .and_then(|s| s.max_suggestions)
            .unwrap_or(MAX_SUGGESTIONS)
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
}

pub fn default_snapshot_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join(APP_DIR).join("names.bin"))
}

/// Reads `path`. A missing file is not an error and yields the defaults.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let contents = std::fs::read_to_string(path)?;
    toml::from_str(&contents)
        .map_err(|e| TrendsError::Config(format!("{}: {}", path.display(), e)))
}
