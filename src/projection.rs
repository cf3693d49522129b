//! # Projection Run
//!
//! One complete analysis pass: generate the series, fit the trend on the
//! historical split, compute the window averages. Every entity is created
//! fresh by [`Projection::run`] and never mutated afterwards.
//!
//! ```rust
//! use rainfall_terminal::projection::{Projection, ProjectionConfig};
//!
//! let projection = Projection::run(ProjectionConfig::default())?;
//! assert_eq!(projection.trend.line.len(), 81);
//! assert_eq!(projection.averages.first_label(), "1975-1979");
//! # Ok::<(), rainfall_terminal::error::ProjectionError>(())
//! ```

use log::info;
use serde::{Deserialize, Serialize};

use crate::classify::{color_for, Tone};
use crate::error::{ProjectionError, Result};
use crate::series::{Series, SeriesConfig, YearValue};
use crate::summary::{window_averages, WindowAverages};
use crate::trend::{fit_trend, TrendFit, MIN_FIT_POINTS};

/// Row order of the table and the CSV export
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableOrder {
    /// Oldest year first
    Ascending,
    /// Newest year first
    #[default]
    Descending,
}

/// Full configuration of an analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Region name shown in titles and used in the export file name
    pub region: String,

    /// Synthetic series parameters
    pub series: SeriesConfig,

    /// Number of leading years treated as observed
    pub historical_len: usize,

    /// Years in each summary window
    pub window: usize,

    /// Values below this are flagged in the table
    pub threshold: f64,

    /// Unit label of the values
    pub unit: String,

    /// Table and export row order
    pub table_order: TableOrder,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            region: "Gaziantep".to_string(),
            series: SeriesConfig::default(),
            historical_len: 51,
            window: 5,
            threshold: 300.0,
            unit: "mm".to_string(),
            table_order: TableOrder::Descending,
        }
    }
}

impl ProjectionConfig {
    /// Check every parameter before any computation starts
    pub fn validate(&self) -> Result<()> {
        self.series.validate()?;

        let len = self.series.len();
        if self.historical_len < MIN_FIT_POINTS {
            return Err(ProjectionError::InsufficientData {
                what: "trend fit",
                needed: MIN_FIT_POINTS,
                available: self.historical_len,
            });
        }
        if self.historical_len > len {
            return Err(ProjectionError::configuration(format!(
                "historical split of {} years exceeds the {}-year range {}..={}",
                self.historical_len, len, self.series.start_year, self.series.end_year
            )));
        }
        if self.window == 0 {
            return Err(ProjectionError::configuration(
                "summary window must cover at least one year",
            ));
        }
        if !self.threshold.is_finite() {
            return Err(ProjectionError::configuration("threshold must be finite"));
        }
        if self.region.trim().is_empty() {
            return Err(ProjectionError::configuration("region must not be empty"));
        }
        Ok(())
    }

    /// Column header of the value column, e.g. `Rainfall (mm)`
    pub fn value_label(&self) -> String {
        format!("Rainfall ({})", self.unit)
    }

    /// Conventional export file name, e.g. `gaziantep_climate_projection.csv`
    pub fn csv_file_name(&self) -> String {
        let slug: String = self
            .region
            .trim()
            .chars()
            .flat_map(|c| {
                let keep = c.is_alphanumeric();
                c.to_lowercase().map(move |l| if keep { l } else { '_' })
            })
            .collect();
        format!("{}_climate_projection.csv", slug)
    }
}

/// A table row with its classification
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TableRow {
    /// Calendar year
    pub year: i32,
    /// Stored value
    pub value: f64,
    /// Threshold classification of `value`
    pub tone: Tone,
    /// Whether the year belongs to the historical split
    pub historical: bool,
}

/// All entities computed by one analysis run
#[derive(Debug, Clone, Serialize)]
pub struct Projection {
    /// Configuration the run was computed from
    pub config: ProjectionConfig,
    /// Generated series
    pub series: Series,
    /// Trend fitted on the historical split
    pub trend: TrendFit,
    /// Leading and trailing window averages
    pub averages: WindowAverages,
}

impl Projection {
    /// Run generation, trend fit and summary statistics
    pub fn run(config: ProjectionConfig) -> Result<Self> {
        config.validate()?;

        let series = config.series.generate()?;
        let trend = fit_trend(&series, config.historical_len)?;
        let averages = window_averages(&series, config.window)?;

        info!(
            "{}: {} years, {} historical, {} avg {:.0} {unit} -> {} avg {:.0} {unit} ({:+.0} {unit})",
            config.region,
            series.len(),
            config.historical_len,
            averages.first_label(),
            averages.first_avg,
            averages.last_label(),
            averages.last_avg,
            averages.delta,
            unit = config.unit
        );

        Ok(Self {
            config,
            series,
            trend,
            averages,
        })
    }

    /// Observed part of the series
    pub fn historical(&self) -> &[YearValue] {
        self.series.split_at(self.config.historical_len).0
    }

    /// Projected part of the series
    pub fn projected(&self) -> &[YearValue] {
        self.series.split_at(self.config.historical_len).1
    }

    /// Rows in the configured table order, classified against the threshold
    pub fn table_rows(&self) -> Vec<TableRow> {
        let split = self.config.historical_len;
        let mut rows: Vec<TableRow> = self
            .series
            .points()
            .iter()
            .enumerate()
            .map(|(i, p)| TableRow {
                year: p.year,
                value: p.value,
                tone: color_for(p.value, self.config.threshold),
                historical: i < split,
            })
            .collect();
        if self.config.table_order == TableOrder::Descending {
            rows.reverse();
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_run() {
        let projection = Projection::run(ProjectionConfig::default()).unwrap();
        assert_eq!(projection.series.len(), 81);
        assert_eq!(projection.trend.line.len(), 81);
        assert_eq!(projection.historical().len(), 51);
        assert_eq!(projection.projected().len(), 30);
        assert_eq!(projection.projected()[0].year, 2026);
    }

    #[test]
    fn test_table_rows_descending_by_default() {
        let projection = Projection::run(ProjectionConfig::default()).unwrap();
        let rows = projection.table_rows();
        assert_eq!(rows.len(), 81);
        assert_eq!(rows[0].year, 2055);
        assert!(!rows[0].historical);
        assert_eq!(rows[80].year, 1975);
        assert!(rows[80].historical);
        for row in &rows {
            assert_eq!(row.tone == Tone::Warning, row.value < 300.0);
        }
    }

    #[test]
    fn test_table_rows_ascending() {
        let config = ProjectionConfig {
            table_order: TableOrder::Ascending,
            ..Default::default()
        };
        let rows = Projection::run(config).unwrap().table_rows();
        assert_eq!(rows[0].year, 1975);
    }

    #[test]
    fn test_historical_split_of_one_rejected() {
        let config = ProjectionConfig {
            historical_len: 1,
            ..Default::default()
        };
        assert!(matches!(
            Projection::run(config),
            Err(ProjectionError::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_inverted_years_rejected() {
        let mut config = ProjectionConfig::default();
        config.series.start_year = 2056;
        assert!(matches!(
            Projection::run(config),
            Err(ProjectionError::Configuration(_))
        ));
    }

    #[test]
    fn test_csv_file_name() {
        assert_eq!(
            ProjectionConfig::default().csv_file_name(),
            "gaziantep_climate_projection.csv"
        );
        let config = ProjectionConfig {
            region: "New York".to_string(),
            ..Default::default()
        };
        assert_eq!(config.csv_file_name(), "new_york_climate_projection.csv");

        let config = ProjectionConfig {
            region: "Şanlıurfa".to_string(),
            ..Default::default()
        };
        assert_eq!(config.csv_file_name(), "şanlıurfa_climate_projection.csv");
    }

    #[test]
    fn test_flat_history_with_inexact_value() {
        let mut config = ProjectionConfig::default();
        config.series.baseline = 300.3;
        config.series.decay_rate = 0.0;
        config.series.noise_std = 0.0;
        let projection = Projection::run(config).unwrap();
        assert!(projection.series.values().all(|v| v == 300.3));
        assert_eq!(projection.trend.r_squared, 1.0);
    }
}
