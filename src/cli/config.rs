//! TOML configuration file support.
//!
//! Instead of passing many CLI flags, users can keep a scenario in a file:
//!
//! ```toml
//! # rainfall.toml
//! [projection]
//! region = "Gaziantep"
//! historical_len = 51
//! window = 5
//! threshold = 300.0
//! unit = "mm"
//! table_order = "descending"
//!
//! [series]
//! start_year = 1975
//! end_year = 2055
//! baseline = 550.0
//! decay_rate = 5.5
//! noise_std = 32.0
//! seed = 42
//! precision = 2
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use rainfall_terminal::projection::{ProjectionConfig, TableOrder};

/// Root configuration structure for rainfall.toml files.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Analysis and presentation settings.
    #[serde(default)]
    pub projection: ProjectionSection,

    /// Synthetic series settings.
    #[serde(default)]
    pub series: SeriesSection,
}

/// The `[projection]` table.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectionSection {
    /// Region name used in titles and the export file name.
    pub region: Option<String>,

    /// Number of leading years treated as observed.
    pub historical_len: Option<usize>,

    /// Years in each summary window.
    pub window: Option<usize>,

    /// Values below this are flagged.
    pub threshold: Option<f64>,

    /// Unit label of the values.
    pub unit: Option<String>,

    /// Table and export row order.
    pub table_order: Option<TableOrder>,
}

/// The `[series]` table.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeriesSection {
    /// First year of the series.
    pub start_year: Option<i32>,

    /// Last year of the series.
    pub end_year: Option<i32>,

    /// Value at the first year before noise.
    pub baseline: Option<f64>,

    /// Linear decrease per year.
    pub decay_rate: Option<f64>,

    /// Standard deviation of the yearly noise.
    pub noise_std: Option<f64>,

    /// Seed of the noise generator.
    pub seed: Option<u64>,

    /// Decimal places kept for each value.
    pub precision: Option<u32>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Overwrite the fields of `config` that this file sets.
    pub fn apply(&self, config: &mut ProjectionConfig) {
        let p = &self.projection;
        if let Some(region) = &p.region {
            config.region = region.clone();
        }
        if let Some(len) = p.historical_len {
            config.historical_len = len;
        }
        if let Some(window) = p.window {
            config.window = window;
        }
        if let Some(threshold) = p.threshold {
            config.threshold = threshold;
        }
        if let Some(unit) = &p.unit {
            config.unit = unit.clone();
        }
        if let Some(order) = p.table_order {
            config.table_order = order;
        }

        let s = &self.series;
        let series = &mut config.series;
        if let Some(year) = s.start_year {
            series.start_year = year;
        }
        if let Some(year) = s.end_year {
            series.end_year = year;
        }
        if let Some(baseline) = s.baseline {
            series.baseline = baseline;
        }
        if let Some(rate) = s.decay_rate {
            series.decay_rate = rate;
        }
        if let Some(std) = s.noise_std {
            series.noise_std = std;
        }
        if let Some(seed) = s.seed {
            series.seed = seed;
        }
        if let Some(precision) = s.precision {
            series.precision = precision;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [projection]
            region = "Konya"
            historical_len = 40
            window = 10
            threshold = 250.0
            table_order = "ascending"

            [series]
            start_year = 1980
            end_year = 2060
            noise_std = 0.0
            seed = 7
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.projection.region.as_deref(), Some("Konya"));
        assert_eq!(config.projection.historical_len, Some(40));
        assert_eq!(config.projection.table_order, Some(TableOrder::Ascending));
        assert_eq!(config.series.seed, Some(7));

        let mut resolved = ProjectionConfig::default();
        config.apply(&mut resolved);
        assert_eq!(resolved.region, "Konya");
        assert_eq!(resolved.window, 10);
        assert_eq!(resolved.threshold, 250.0);
        assert_eq!(resolved.series.start_year, 1980);
        assert_eq!(resolved.series.noise_std, 0.0);
        assert_eq!(resolved.series.baseline, 550.0);
    }

    #[test]
    fn test_partial_config() {
        let toml = r#"
            [series]
            seed = 10
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.series.seed, Some(10));
        assert_eq!(config.series.start_year, None);
        assert_eq!(config.projection.window, None);
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_str("").unwrap();
        let mut resolved = ProjectionConfig::default();
        config.apply(&mut resolved);
        assert_eq!(resolved, ProjectionConfig::default());
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(Config::from_str("[series]\nsed = 1\n").is_err());
    }
}
