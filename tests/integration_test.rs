//! Integration tests for rainfall-terminal
//!
//! These tests run the full pipeline from series generation to exported files.

use rainfall_terminal::error::{ExportError, ProjectionError};
use rainfall_terminal::export::{export_csv_file, read_csv, ProjectionSummary};
use rainfall_terminal::projection::{Projection, ProjectionConfig, TableOrder};
use rainfall_terminal::render::html::export_html_file;
use rainfall_terminal::series::SeriesConfig;
use std::fs::{self, File};
use tempfile::tempdir;

/// The reference scenario: 1975-2055, 51 historical years, seed 42
#[test]
fn test_reference_scenario() {
    let projection = Projection::run(ProjectionConfig::default()).unwrap();

    assert_eq!(projection.series.len(), 81);
    assert_eq!(projection.series.first_year(), Some(1975));
    assert_eq!(projection.series.last_year(), Some(2055));
    assert_eq!(projection.trend.line.len(), 81);
    assert_eq!(projection.trend.historical_len, 51);
    assert!((0.0..=1.0).contains(&projection.trend.r_squared));

    let averages = &projection.averages;
    assert_eq!(averages.first_years, (1975, 1979));
    assert_eq!(averages.last_years, (2051, 2055));
    assert_eq!(averages.delta, averages.last_avg - averages.first_avg);

    let first: f64 = projection.series.head(5).iter().map(|p| p.value).sum::<f64>() / 5.0;
    assert_eq!(averages.first_avg, first);
}

/// Noise-free data lie on the generating line and fit it perfectly
#[test]
fn test_noiseless_scenario() {
    let mut config = ProjectionConfig::default();
    config.series.noise_std = 0.0;
    let projection = Projection::run(config).unwrap();

    for point in projection.series.points() {
        assert_eq!(point.value, 550.0 - 5.5 * f64::from(point.year - 1975));
    }
    assert_eq!(projection.trend.r_squared, 1.0);
    assert!((projection.trend.model.slope + 5.5).abs() < 1e-9);
    for point in &projection.trend.line {
        let expected = 550.0 - 5.5 * f64::from(point.year - 1975);
        assert!((point.value - expected).abs() < 1e-6);
    }
}

/// Runs with identical settings are bit-for-bit identical
#[test]
fn test_runs_are_reproducible() {
    let a = Projection::run(ProjectionConfig::default()).unwrap();
    let b = Projection::run(ProjectionConfig::default()).unwrap();
    assert_eq!(a.series, b.series);
    assert_eq!(a.trend.model, b.trend.model);
    assert_eq!(a.averages, b.averages);
}

/// A historical split of one year cannot determine a line
#[test]
fn test_single_year_history_fails() {
    let config = ProjectionConfig {
        historical_len: 1,
        ..Default::default()
    };
    let err = Projection::run(config).unwrap_err();
    assert!(matches!(err, ProjectionError::InsufficientData { .. }));
    assert!(err.to_string().contains("need at least 2"));
}

/// Too short a series for two disjoint summary windows
#[test]
fn test_overlapping_windows_fail() {
    let config = ProjectionConfig {
        series: SeriesConfig {
            start_year: 2000,
            end_year: 2008,
            ..Default::default()
        },
        historical_len: 5,
        window: 5,
        ..Default::default()
    };
    assert!(matches!(
        Projection::run(config),
        Err(ProjectionError::InsufficientData { needed: 10, available: 9, .. })
    ));
}

/// Export to disk and read the file back
#[test]
fn test_csv_file_round_trip() {
    let dir = tempdir().unwrap();
    let projection = Projection::run(ProjectionConfig::default()).unwrap();
    let path = dir.path().join(projection.config.csv_file_name());

    export_csv_file(&projection, &path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("Year,Rainfall (mm)\n2055,"));

    let restored = read_csv(File::open(&path).unwrap()).unwrap();
    assert_eq!(restored, projection.series);
}

/// Ascending exports read back to the same series
#[test]
fn test_ascending_export() {
    let dir = tempdir().unwrap();
    let config = ProjectionConfig {
        table_order: TableOrder::Ascending,
        ..Default::default()
    };
    let projection = Projection::run(config).unwrap();
    let path = dir.path().join("ascending.csv");

    export_csv_file(&projection, &path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.lines().nth(1).unwrap().starts_with("1975,"));
    assert_eq!(read_csv(text.as_bytes()).unwrap(), projection.series);
}

/// Exporting into a missing directory fails without leaving files behind
#[test]
fn test_export_to_missing_directory() {
    let dir = tempdir().unwrap();
    let projection = Projection::run(ProjectionConfig::default()).unwrap();
    let path = dir.path().join("missing").join("out.csv");

    let err = export_csv_file(&projection, &path).unwrap_err();
    assert!(matches!(err, ExportError::IoError(_)));
    assert!(!path.exists());
}

/// The HTML dashboard is a single self-contained file
#[test]
fn test_html_dashboard_file() {
    let dir = tempdir().unwrap();
    let projection = Projection::run(ProjectionConfig::default()).unwrap();
    let path = dir.path().join("dashboard.html");

    export_html_file(&projection, &path).unwrap();

    let page = fs::read_to_string(&path).unwrap();
    assert!(page.contains("GAZIANTEP RAINFALL TERMINAL (1975 - 2055)"));
    assert!(page.contains("FIT SCORE (R²)"));
    assert!(page.contains("1975-1979 AVG."));
    assert!(page.contains("2051-2055 AVG."));
    assert!(page.contains("TOTAL CHANGE"));
    assert!(page.contains("base64,"));
}

/// Summary JSON carries the fitted entities
#[test]
fn test_summary_json() {
    let projection = Projection::run(ProjectionConfig::default()).unwrap();
    let json = ProjectionSummary::new(&projection).to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["seed"], 42);
    assert_eq!(value["threshold"], 300.0);
    let slope = value["trend"]["slope"].as_f64().unwrap();
    assert_eq!(slope, projection.trend.model.slope);
    assert!(value["generated_at"].is_string());
}
