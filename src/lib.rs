//! # Rainfall Terminal - Synthetic Rainfall Projection
//!
//! `rainfall_terminal` synthesizes an annual rainfall series for a region,
//! fits a linear trend to its historical part, extrapolates the trend over
//! the future horizon, and presents the result as a dashboard with summary
//! metrics, a classified table and a CSV export.
//!
//! The data are a simulation. They do not reflect real meteorological records.
//!
//! ## Key Features
//!
//! - **Reproducible Series**: Gaussian noise drawn from an explicitly seeded
//!   generator, never from process-wide random state.
//!
//! - **Trend Extrapolation**: Ordinary least squares over the historical split,
//!   evaluated across the whole year range, with R² over the fitted years.
//!
//! - **Window Statistics**: Averages of the first and last N years and their change.
//!
//! - **Dashboards**: Terminal (optionally colorized) and standalone HTML output.
//!
//! - **CSV Export**: `Year,Rainfall (mm)` without an index column, UTF-8.
//!
//! ## Quick Start
//!
//! ```rust
//! use rainfall_terminal::projection::{Projection, ProjectionConfig};
//! use rainfall_terminal::render::{Dashboard, TerminalDashboard};
//!
//! let projection = Projection::run(ProjectionConfig::default())?;
//! println!("R² = {:.4}", projection.trend.r_squared);
//! println!("change = {:+.0} mm", projection.averages.delta);
//!
//! let dashboard = Dashboard::new(&projection);
//! println!("{}", TerminalDashboard::new(&dashboard).with_max_rows(10));
//! # Ok::<(), rainfall_terminal::error::ProjectionError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`series`]: seeded synthetic series generation
//! - [`trend`]: least-squares trend fit and extrapolation
//! - [`summary`]: first/last window averages
//! - [`classify`]: threshold classification for the renderers
//! - [`projection`]: one complete analysis run
//! - [`export`]: CSV export/import and JSON summary
//! - [`render`]: terminal and HTML dashboards

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod classify;
pub mod error;
pub mod export;
pub mod projection;
pub mod render;
pub mod series;
pub mod summary;
pub mod trend;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::classify::{change_tone, color_for, Tone};
    pub use crate::error::{ExportError, ProjectionError};
    pub use crate::export::{
        export_csv_file, read_csv, to_csv_bytes, write_csv, CsvLayout, ProjectionSummary,
    };
    pub use crate::projection::{Projection, ProjectionConfig, TableOrder, TableRow};
    pub use crate::render::{render_html, Dashboard, TerminalDashboard};
    pub use crate::series::{generate_series, Series, SeriesConfig, YearValue};
    pub use crate::summary::{window_averages, WindowAverages};
    pub use crate::trend::{fit_trend, TrendFit, TrendModel};
}
