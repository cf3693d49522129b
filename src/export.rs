//! # Export
//!
//! CSV export of the series (`Year,<value label>`, no index column, UTF-8),
//! the matching importer, and a JSON summary of a run.
//!
//! Files are written through a temporary file in the destination directory
//! and renamed into place, so a failed export never leaves a partial file.

use std::io::{Read, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use log::info;
use serde::Serialize;

use crate::error::ExportError;
use crate::projection::{Projection, TableOrder};
use crate::series::{Series, YearValue};
use crate::summary::WindowAverages;
use crate::trend::TrendModel;

/// MIME type of the CSV export
pub const CSV_MIME: &str = "text/csv";

/// Name of the year column
pub const YEAR_HEADER: &str = "Year";

/// Column layout of a CSV export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvLayout {
    /// Row order
    pub order: TableOrder,
    /// Header of the value column
    pub value_header: String,
    /// Decimal places written for each value
    pub precision: usize,
}

impl CsvLayout {
    /// Layout used by the dashboard for `projection`
    pub fn for_projection(projection: &Projection) -> Self {
        Self {
            order: projection.config.table_order,
            value_header: projection.config.value_label(),
            precision: projection.config.series.precision as usize,
        }
    }
}

/// Write `series` as CSV to `writer`
pub fn write_csv<W: Write>(series: &Series, layout: &CsvLayout, writer: W) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record([YEAR_HEADER, layout.value_header.as_str()])?;

    let mut write_row = |p: &YearValue| -> Result<(), csv::Error> {
        csv_writer.write_record([
            p.year.to_string(),
            format!("{:.*}", layout.precision, p.value),
        ])
    };

    match layout.order {
        TableOrder::Ascending => series.points().iter().try_for_each(&mut write_row)?,
        TableOrder::Descending => series.points().iter().rev().try_for_each(&mut write_row)?,
    }

    csv_writer.flush()?;
    Ok(())
}

/// Encode the series of `projection` as UTF-8 CSV bytes
pub fn to_csv_bytes(projection: &Projection) -> Result<Vec<u8>, ExportError> {
    let mut buffer = Vec::new();
    write_csv(
        &projection.series,
        &CsvLayout::for_projection(projection),
        &mut buffer,
    )?;
    Ok(buffer)
}

/// Parse a CSV export back into a [`Series`]
///
/// Rows may be in either order; the result is sorted by year and must form a
/// contiguous range.
pub fn read_csv<R: Read>(reader: R) -> Result<Series, ExportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    if headers.len() != 2 {
        return Err(ExportError::InvalidFormat(format!(
            "expected 2 columns, found {}",
            headers.len()
        )));
    }
    if !headers[0].eq_ignore_ascii_case(YEAR_HEADER) {
        return Err(ExportError::InvalidFormat(format!(
            "first column must be '{}', found '{}'",
            YEAR_HEADER, &headers[0]
        )));
    }

    let mut points = Vec::new();
    for (line, record) in csv_reader.records().enumerate() {
        let record = record?;
        let year = record[0].parse::<i32>().map_err(|e| {
            ExportError::InvalidFormat(format!("row {}: bad year '{}': {}", line + 1, &record[0], e))
        })?;
        let value = record[1].parse::<f64>().map_err(|e| {
            ExportError::InvalidFormat(format!("row {}: bad value '{}': {}", line + 1, &record[1], e))
        })?;
        points.push(YearValue::new(year, value));
    }

    points.sort_by_key(|p| p.year);
    Ok(Series::from_points(points)?)
}

/// Write `bytes` to `path` atomically
pub fn write_file_atomic(path: &Path, bytes: &[u8]) -> Result<(), ExportError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = tempfile::NamedTempFile::new_in(dir)?;
    file.write_all(bytes)?;
    file.flush()?;
    file.persist(path).map_err(|e| ExportError::IoError(e.error))?;

    info!("Wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

/// Export the CSV of `projection` to `path`
pub fn export_csv_file(projection: &Projection, path: &Path) -> Result<(), ExportError> {
    let bytes = to_csv_bytes(projection)?;
    write_file_atomic(path, &bytes)
}

/// Machine-readable digest of a run
#[derive(Debug, Clone, Serialize)]
pub struct ProjectionSummary<'a> {
    /// Region name
    pub region: &'a str,
    /// Unit label of the values
    pub unit: &'a str,
    /// First year of the series
    pub start_year: Option<i32>,
    /// Last year of the series
    pub end_year: Option<i32>,
    /// Number of years in the historical split
    pub historical_len: usize,
    /// Number of projected years
    pub projected_len: usize,
    /// Seed of the noise generator
    pub seed: u64,
    /// Fitted line
    pub trend: TrendModel,
    /// Coefficient of determination over the historical split
    pub r_squared: f64,
    /// Leading and trailing window averages
    pub averages: &'a WindowAverages,
    /// Number of years below the alert threshold
    pub below_threshold: usize,
    /// Alert threshold
    pub threshold: f64,
    /// Time the summary was produced
    pub generated_at: DateTime<Utc>,
}

impl<'a> ProjectionSummary<'a> {
    /// Summarize `projection`
    pub fn new(projection: &'a Projection) -> Self {
        let config = &projection.config;
        Self {
            region: &config.region,
            unit: &config.unit,
            start_year: projection.series.first_year(),
            end_year: projection.series.last_year(),
            historical_len: projection.historical().len(),
            projected_len: projection.projected().len(),
            seed: config.series.seed,
            trend: projection.trend.model,
            r_squared: projection.trend.r_squared,
            averages: &projection.averages,
            below_threshold: projection
                .series
                .values()
                .filter(|v| *v < config.threshold)
                .count(),
            threshold: config.threshold,
            generated_at: Utc::now(),
        }
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::ProjectionConfig;

    fn default_projection() -> Projection {
        Projection::run(ProjectionConfig::default()).unwrap()
    }

    #[test]
    fn test_csv_header_and_order() {
        let projection = default_projection();
        let bytes = to_csv_bytes(&projection).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Year,Rainfall (mm)"));
        assert!(lines.next().unwrap().starts_with("2055,"));
        assert_eq!(text.lines().count(), 82);
        assert!(text.lines().last().unwrap().starts_with("1975,"));
    }

    #[test]
    fn test_csv_round_trip() {
        let projection = default_projection();
        let bytes = to_csv_bytes(&projection).unwrap();
        let restored = read_csv(bytes.as_slice()).unwrap();
        assert_eq!(restored, projection.series);
    }

    #[test]
    fn test_read_rejects_wrong_header() {
        let data = "Date,Value\n2000,1.0\n";
        assert!(matches!(
            read_csv(data.as_bytes()),
            Err(ExportError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_read_rejects_gap() {
        let data = "Year,Rainfall (mm)\n2000,1.0\n2002,2.0\n";
        assert!(matches!(
            read_csv(data.as_bytes()),
            Err(ExportError::Projection(_))
        ));
    }

    #[test]
    fn test_read_rejects_duplicate_years() {
        let data = "Year,Rainfall (mm)\n2001,1.0\n2000,2.0\n2001,3.0\n";
        assert!(matches!(
            read_csv(data.as_bytes()),
            Err(ExportError::Projection(_))
        ));

        let data = "Year,Rainfall (mm)\n2147483647,1.0\n2147483647,2.0\n";
        assert!(matches!(
            read_csv(data.as_bytes()),
            Err(ExportError::Projection(_))
        ));
    }

    #[test]
    fn test_read_accepts_last_representable_year() {
        let data = "Year,Rainfall (mm)\n2147483647,2.0\n2147483646,1.0\n";
        let series = read_csv(data.as_bytes()).unwrap();
        assert_eq!(series.first_year(), Some(2147483646));
        assert_eq!(series.last_year(), Some(i32::MAX));
    }

    #[test]
    fn test_read_rejects_bad_value() {
        let data = "Year,Rainfall (mm)\n2000,wet\n";
        assert!(matches!(
            read_csv(data.as_bytes()),
            Err(ExportError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_summary_json() {
        let projection = default_projection();
        let json = ProjectionSummary::new(&projection).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["region"], "Gaziantep");
        assert_eq!(value["start_year"], 1975);
        assert_eq!(value["end_year"], 2055);
        assert_eq!(value["historical_len"], 51);
        assert_eq!(value["projected_len"], 30);
        assert_eq!(value["averages"]["window"], 5);
    }
}
