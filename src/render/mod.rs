//! # Dashboard Rendering
//!
//! Presentation of an already computed [`Projection`]. Nothing in this module
//! performs analysis: [`Dashboard::new`] arranges the run into display items
//! (chart traces, metric tiles, table rows) and the renderers turn those into
//! text.
//!
//! - [`terminal`]: plain or colorized terminal dashboard
//! - [`html`]: standalone dark-theme HTML page with an inline SVG chart and a
//!   CSV download link
//!
//! ```rust
//! use rainfall_terminal::projection::{Projection, ProjectionConfig};
//! use rainfall_terminal::render::Dashboard;
//!
//! let projection = Projection::run(ProjectionConfig::default())?;
//! let dashboard = Dashboard::new(&projection);
//! assert_eq!(dashboard.metrics.len(), 4);
//! assert_eq!(dashboard.traces.len(), 3);
//! # Ok::<(), rainfall_terminal::error::ProjectionError>(())
//! ```

use crate::classify::{change_tone, Tone};
use crate::projection::{Projection, TableRow};
use crate::series::YearValue;

pub mod chart;
pub mod html;
pub mod terminal;


pub use chart::ChartFrame;
pub use html::render_html;
pub use terminal::TerminalDashboard;

/// Notice shown under every dashboard
pub const DISCLAIMER: &str = "LEGAL NOTICE: The data in this terminal are a simulation \
    and do not reflect real meteorological records.";

/// Secondary line of the notice
pub const PROTOTYPE_NOTE: &str =
    "This work is a prototype; it will take its final form with your guidance.";

/// Role of a chart trace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceKind {
    /// Historical actual values
    Observed,
    /// Actual values after the historical split
    Projected,
    /// Fitted line across the full range
    Trend,
}

impl TraceKind {
    /// Legend name
    pub fn name(&self) -> &'static str {
        match self {
            TraceKind::Observed => "Observed",
            TraceKind::Projected => "Projection",
            TraceKind::Trend => "Overall trend",
        }
    }

    /// Hex color used by the HTML renderer
    pub fn hex(&self) -> &'static str {
        match self {
            TraceKind::Observed => "#58a6ff",
            TraceKind::Projected => "#ffa657",
            TraceKind::Trend => "#f85149",
        }
    }

    /// Whether the trace is drawn dashed
    pub fn dashed(&self) -> bool {
        matches!(self, TraceKind::Trend)
    }

    /// Whether hovering shows values for this trace
    pub fn hover(&self) -> bool {
        !matches!(self, TraceKind::Trend)
    }
}

/// Hex color of a classified value
pub fn tone_hex(tone: Tone) -> &'static str {
    match tone {
        Tone::Warning => "#f85149",
        Tone::Normal => "#3fb950",
    }
}

/// One curve of the chart
#[derive(Debug, Clone)]
pub struct Trace {
    /// Role of the curve
    pub kind: TraceKind,
    /// Points in year order
    pub points: Vec<YearValue>,
}

/// A labeled scalar tile
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    /// Caption
    pub label: String,
    /// Formatted value
    pub value: String,
    /// Formatted signed change, if the tile shows one
    pub delta: Option<String>,
    /// Emphasis of the value
    pub tone: Tone,
}

/// Display items of a projection run
#[derive(Debug, Clone)]
pub struct Dashboard<'a> {
    /// Page title
    pub title: String,
    /// Underlying run
    pub projection: &'a Projection,
    /// Observed, projected and trend curves
    pub traces: Vec<Trace>,
    /// Fit quality, both window averages and their change
    pub metrics: Vec<Metric>,
    /// Table rows in the configured order
    pub rows: Vec<TableRow>,
    /// Header of the year column
    pub year_label: &'static str,
    /// Header of the value column
    pub value_label: String,
}

impl<'a> Dashboard<'a> {
    /// Arrange `projection` for display
    pub fn new(projection: &'a Projection) -> Self {
        let config = &projection.config;
        let series = &projection.series;

        let title = format!(
            "{} RAINFALL TERMINAL ({} - {})",
            config.region.to_uppercase(),
            series.first_year().unwrap_or(config.series.start_year),
            series.last_year().unwrap_or(config.series.end_year),
        );

        let traces = vec![
            Trace {
                kind: TraceKind::Observed,
                points: projection.historical().to_vec(),
            },
            Trace {
                kind: TraceKind::Projected,
                points: projection.projected().to_vec(),
            },
            Trace {
                kind: TraceKind::Trend,
                points: projection.trend.line.clone(),
            },
        ];

        Self {
            title,
            projection,
            traces,
            metrics: metrics_for(projection),
            rows: projection.table_rows(),
            year_label: crate::export::YEAR_HEADER,
            value_label: config.value_label(),
        }
    }
}

fn metrics_for(projection: &Projection) -> Vec<Metric> {
    let unit = &projection.config.unit;
    let averages = &projection.averages;
    let delta = format!("{:+.0} {}", averages.delta, unit);

    vec![
        Metric {
            label: "FIT SCORE (R²)".to_string(),
            value: format!("{:.4}", projection.trend.r_squared),
            delta: None,
            tone: Tone::Normal,
        },
        Metric {
            label: format!("{} AVG.", averages.first_label()),
            value: format!("{:.0} {}", averages.first_avg, unit),
            delta: None,
            tone: Tone::Normal,
        },
        Metric {
            label: format!("{} AVG.", averages.last_label()),
            value: format!("{:.0} {}", averages.last_avg, unit),
            delta: None,
            tone: Tone::Normal,
        },
        Metric {
            label: "TOTAL CHANGE".to_string(),
            value: delta.clone(),
            delta: Some(delta),
            tone: change_tone(averages.delta),
        },
    ]
}
