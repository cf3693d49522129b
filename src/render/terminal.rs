//! Terminal dashboard: ASCII chart, metric tiles, classified table, notice.
//!
//! [`TerminalDashboard`] implements [`std::fmt::Display`] for plain output;
//! [`TerminalDashboard::format_colored`] adds ANSI styling when the
//! `colorized_output` feature is enabled.

use std::fmt;

#[cfg(feature = "colorized_output")]
use console::style;

use super::{ChartFrame, Dashboard, TraceKind, DISCLAIMER, PROTOTYPE_NOTE};
use crate::classify::Tone;

/// Rows of the ASCII chart
pub const DEFAULT_CHART_HEIGHT: usize = 16;

const AXIS_LABEL_WIDTH: usize = 7;

/// What a fragment of output represents, for styling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Paint {
    Title,
    Heading,
    Trace(TraceKind),
    Tone(Tone),
    Muted,
    Plain,
}

/// Terminal rendering options around a [`Dashboard`]
#[derive(Debug, Clone)]
pub struct TerminalDashboard<'a> {
    dashboard: &'a Dashboard<'a>,
    max_rows: Option<usize>,
    chart_height: usize,
}

impl<'a> TerminalDashboard<'a> {
    /// Render every table row with the default chart height
    pub fn new(dashboard: &'a Dashboard<'a>) -> Self {
        Self {
            dashboard,
            max_rows: None,
            chart_height: DEFAULT_CHART_HEIGHT,
        }
    }

    /// Print at most `rows` table rows
    pub fn with_max_rows(mut self, rows: usize) -> Self {
        self.max_rows = Some(rows);
        self
    }

    /// Use `height` text rows for the chart (minimum 3)
    pub fn with_chart_height(mut self, height: usize) -> Self {
        self.chart_height = height.max(3);
        self
    }

    /// Format the dashboard with colors (requires console feature)
    pub fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            self.compose(&|text: &str, paint: Paint| match paint {
                Paint::Title => style(text).bold().cyan().to_string(),
                Paint::Heading => style(text).bold().to_string(),
                Paint::Trace(TraceKind::Observed) => style(text).blue().to_string(),
                Paint::Trace(TraceKind::Projected) => style(text).yellow().to_string(),
                Paint::Trace(TraceKind::Trend) => style(text).red().to_string(),
                Paint::Tone(Tone::Warning) => style(text).red().bold().to_string(),
                Paint::Tone(Tone::Normal) => style(text).green().bold().to_string(),
                Paint::Muted => style(text).dim().to_string(),
                Paint::Plain => text.to_string(),
            })
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            format!("{}", self)
        }
    }

    fn compose(&self, paint: &dyn Fn(&str, Paint) -> String) -> String {
        let mut out = String::new();
        let d = self.dashboard;

        out.push_str(&paint(&d.title, Paint::Title));
        out.push('\n');
        out.push_str(&paint(&"=".repeat(d.title.chars().count()), Paint::Title));
        out.push_str("\n\n");

        self.compose_chart(&mut out, paint);
        out.push('\n');

        for metric in &d.metrics {
            out.push_str(&paint(&format!("{:<20}", metric.label), Paint::Heading));
            let value = match &metric.delta {
                Some(_) => paint(&metric.value, Paint::Tone(metric.tone)),
                None => paint(&metric.value, Paint::Plain),
            };
            out.push_str(&value);
            out.push('\n');
        }
        out.push('\n');

        self.compose_table(&mut out, paint);
        out.push('\n');

        out.push_str(&paint(DISCLAIMER, Paint::Tone(Tone::Warning)));
        out.push('\n');
        out.push_str(&paint(PROTOTYPE_NOTE, Paint::Muted));
        out.push('\n');
        out
    }

    fn compose_chart(&self, out: &mut String, paint: &dyn Fn(&str, Paint) -> String) {
        let d = self.dashboard;
        let frame = match ChartFrame::fit(&d.traces, false) {
            Some(frame) => frame,
            None => {
                out.push_str(&paint("(no data)", Paint::Muted));
                out.push('\n');
                return;
            }
        };

        let width = frame.year_count();
        let height = self.chart_height;
        let mut canvas: Vec<Vec<Option<TraceKind>>> = vec![vec![None; width]; height];

        // Trend first so actual values are drawn on top of it.
        let order = [TraceKind::Trend, TraceKind::Observed, TraceKind::Projected];
        for kind in order {
            for trace in d.traces.iter().filter(|t| t.kind == kind) {
                for p in &trace.points {
                    let col = (p.year - frame.min_year) as usize;
                    if kind.dashed() && col % 2 == 1 {
                        continue;
                    }
                    let row = frame.y(p.value, (height - 1) as f64).round();
                    let row = row.clamp(0.0, (height - 1) as f64) as usize;
                    canvas[row][col] = Some(kind);
                }
            }
        }

        for (r, cells) in canvas.iter().enumerate() {
            let label = if r == 0 || r == height - 1 || r == height / 2 {
                let value = frame.max_value
                    - (r as f64 / (height - 1) as f64) * (frame.max_value - frame.min_value);
                format!("{:>w$.0} |", value, w = AXIS_LABEL_WIDTH - 2)
            } else {
                format!("{:>w$}", "|", w = AXIS_LABEL_WIDTH)
            };
            out.push_str(&paint(&label, Paint::Muted));

            for cell in cells {
                match cell {
                    Some(kind) => out.push_str(&paint(glyph(*kind), Paint::Trace(*kind))),
                    None => out.push(' '),
                }
            }
            out.push('\n');
        }

        let axis = format!("{:>w$}{}", "+", "-".repeat(width), w = AXIS_LABEL_WIDTH);
        out.push_str(&paint(&axis, Paint::Muted));
        out.push('\n');

        let mut ticks = vec![' '; width + 4];
        let split_year = d.projection.projected().first().map(|p| p.year);
        let mut labels = vec![frame.min_year];
        labels.extend(split_year);
        labels.push(frame.max_year);
        for (i, year) in labels.into_iter().enumerate() {
            let text: Vec<char> = year.to_string().chars().collect();
            let col = (year - frame.min_year) as usize;
            // Right-align the last label to the end of the axis.
            let start = if i > 0 && year == frame.max_year {
                (col + 1).saturating_sub(text.len())
            } else {
                col
            };
            let end = start + text.len();
            let free = end <= ticks.len()
                && ticks[start.saturating_sub(1)..end.min(ticks.len())]
                    .iter()
                    .all(|c| *c == ' ');
            if free {
                ticks[start..end].copy_from_slice(&text);
            }
        }
        let ticks: String = ticks.into_iter().collect();
        out.push_str(&" ".repeat(AXIS_LABEL_WIDTH));
        out.push_str(&paint(ticks.trim_end(), Paint::Muted));
        out.push('\n');

        out.push_str(&" ".repeat(AXIS_LABEL_WIDTH));
        let legend = [TraceKind::Observed, TraceKind::Projected, TraceKind::Trend];
        for (i, kind) in legend.iter().enumerate() {
            if i > 0 {
                out.push_str("   ");
            }
            out.push_str(&paint(glyph(*kind), Paint::Trace(*kind)));
            out.push(' ');
            out.push_str(kind.name());
        }
        out.push('\n');
    }

    fn compose_table(&self, out: &mut String, paint: &dyn Fn(&str, Paint) -> String) {
        let d = self.dashboard;
        let threshold = d.projection.config.threshold;
        let precision = d.projection.config.series.precision as usize;
        let value_width = d.value_label.chars().count().max(10);

        out.push_str(&paint("ANNUAL DATA TRACKING LIST", Paint::Heading));
        out.push('\n');
        let header = format!(
            "{:<6}  {:>w$}",
            d.year_label,
            d.value_label,
            w = value_width
        );
        out.push_str(&paint(&header, Paint::Heading));
        out.push('\n');

        let shown = self.max_rows.unwrap_or(d.rows.len()).min(d.rows.len());
        for row in &d.rows[..shown] {
            let value = format!("{:>w$.p$}", row.value, w = value_width, p = precision);
            out.push_str(&format!("{:<6}  ", row.year));
            out.push_str(&paint(&value, Paint::Tone(row.tone)));
            if row.tone == Tone::Warning {
                out.push_str(&paint(&format!("  < {}", threshold), Paint::Tone(Tone::Warning)));
            }
            out.push('\n');
        }
        if shown < d.rows.len() {
            let more = format!("... {} more rows", d.rows.len() - shown);
            out.push_str(&paint(&more, Paint::Muted));
            out.push('\n');
        }
    }
}

fn glyph(kind: TraceKind) -> &'static str {
    match kind {
        TraceKind::Observed => "*",
        TraceKind::Projected => "o",
        TraceKind::Trend => "-",
    }
}

impl fmt::Display for TerminalDashboard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.compose(&|text: &str, _: Paint| text.to_string()))
    }
}
