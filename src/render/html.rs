//! Standalone HTML dashboard.
//!
//! The page is a single self-contained file: dark theme styles inline, the
//! chart as inline SVG (horizontally scrollable, one tick per year, unified
//! per-year hover), four metric tiles, the classified table, and the CSV
//! export embedded as a base64 `data:` URI behind a download link.

use std::fmt::{self, Write as _};
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::Utc;

use super::{tone_hex, ChartFrame, Dashboard, TraceKind, DISCLAIMER, PROTOTYPE_NOTE};
use crate::error::ExportError;
use crate::export::{to_csv_bytes, write_file_atomic, CSV_MIME};
use crate::projection::Projection;

const CHART_HEIGHT: f64 = 600.0;
const MIN_CHART_WIDTH: f64 = 1200.0;
const PX_PER_YEAR: f64 = 16.0;
const MARGIN_LEFT: f64 = 20.0;
const MARGIN_RIGHT: f64 = 60.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 60.0;

const STYLE: &str = r#"
body { background-color: #0e1117; color: #e6edf3; font-family: 'Segoe UI', sans-serif; margin: 0; padding: 24px; }
h1 { font-weight: 800; letter-spacing: -1px; }
h3 { margin-top: 32px; }
.chart-scroll { overflow-x: auto; border: 1px solid #30363d; border-radius: 8px; }
.chart-scroll svg { display: block; }
.chart-scroll .hover:hover { fill: rgba(230, 237, 243, 0.06); }
.metrics { display: grid; grid-template-columns: repeat(4, 1fr); gap: 12px; margin-top: 24px; }
.metric { background-color: #161b22; border: 1px solid #30363d; border-radius: 8px; padding: 10px; }
.metric .label { font-size: 14px; color: #8b949e; }
.metric .value { font-size: 32px; font-weight: 600; }
.metric .delta { font-size: 14px; font-weight: 600; }
.download { display: block; text-align: center; background-color: #238636; color: white; border: 1px solid #2ea043; border-radius: 6px; padding: 8px; text-decoration: none; margin-bottom: 12px; }
.table-scroll { height: 400px; overflow-y: auto; border: 1px solid #30363d; border-radius: 8px; }
table { width: 100%; border-collapse: collapse; }
th, td { padding: 4px 12px; border-bottom: 1px solid #21262d; text-align: right; }
th { position: sticky; top: 0; background-color: #161b22; }
td.value { font-weight: bold; }
.warning-box { background-color: #1a0000; border: 2px solid #f85149; color: #ff7b72; padding: 20px; border-radius: 12px; text-align: center; font-weight: bold; margin-top: 30px; box-shadow: 0px 0px 20px rgba(248, 81, 73, 0.4); }
.prof-note { color: #58a6ff; font-size: 20px; display: block; margin-top: 15px; font-style: italic; font-weight: normal; border-top: 1px solid #30363d; padding-top: 10px; }
footer { color: #8b949e; font-size: 12px; margin-top: 16px; text-align: right; }
"#;

/// Render the complete HTML page for `dashboard`, embedding `csv` for download
pub fn render_html(dashboard: &Dashboard<'_>, csv: &[u8]) -> String {
    HtmlPage { dashboard, csv }.to_string()
}

/// Render the dashboard of `projection` and write it to `path`
pub fn export_html_file(projection: &Projection, path: &Path) -> Result<(), ExportError> {
    let csv = to_csv_bytes(projection)?;
    let page = render_html(&Dashboard::new(projection), &csv);
    write_file_atomic(path, page.as_bytes())
}

struct HtmlPage<'a> {
    dashboard: &'a Dashboard<'a>,
    csv: &'a [u8],
}

impl fmt::Display for HtmlPage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.dashboard;
        writeln!(f, "<!DOCTYPE html>")?;
        writeln!(f, "<html lang=\"en\">")?;
        writeln!(f, "<head>")?;
        writeln!(f, "<meta charset=\"utf-8\">")?;
        writeln!(f, "<title>{}</title>", escape(&d.title))?;
        writeln!(f, "<style>{}</style>", STYLE)?;
        writeln!(f, "</head>")?;
        writeln!(f, "<body>")?;
        writeln!(f, "<h1>{}</h1>", escape(&d.title))?;

        self.write_chart(f)?;
        self.write_metrics(f)?;
        self.write_table(f)?;

        writeln!(f, "<div class=\"warning-box\">")?;
        writeln!(f, "{}", escape(DISCLAIMER))?;
        writeln!(f, "<span class=\"prof-note\">{}</span>", escape(PROTOTYPE_NOTE))?;
        writeln!(f, "</div>")?;
        writeln!(
            f,
            "<footer>Generated {} &middot; seed {}</footer>",
            Utc::now().format("%Y-%m-%d %H:%M UTC"),
            d.projection.config.series.seed
        )?;
        writeln!(f, "</body>")?;
        writeln!(f, "</html>")
    }
}

impl HtmlPage<'_> {
    fn write_chart(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.dashboard;
        let frame = match ChartFrame::fit(&d.traces, true) {
            Some(frame) => frame,
            None => return writeln!(f, "<p>No data.</p>"),
        };

        let plot_w = (frame.year_count() as f64 * PX_PER_YEAR).max(MIN_CHART_WIDTH);
        let plot_h = CHART_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
        let width = MARGIN_LEFT + plot_w + MARGIN_RIGHT;
        let px = |year: i32| MARGIN_LEFT + frame.x(year, plot_w);
        let py = |value: f64| MARGIN_TOP + frame.y(value, plot_h);

        writeln!(f, "<div class=\"chart-scroll\">")?;
        writeln!(
            f,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w:.0}\" height=\"{h:.0}\" viewBox=\"0 0 {w:.0} {h:.0}\">",
            w = width,
            h = CHART_HEIGHT
        )?;

        // Value grid, labels on the right.
        for tick in frame.value_ticks(6) {
            let y = py(tick);
            writeln!(
                f,
                "<line x1=\"{:.1}\" y1=\"{y:.1}\" x2=\"{:.1}\" y2=\"{y:.1}\" stroke=\"#30363d\"/>",
                MARGIN_LEFT,
                MARGIN_LEFT + plot_w,
                y = y
            )?;
            writeln!(
                f,
                "<text x=\"{:.1}\" y=\"{:.1}\" fill=\"#8b949e\" font-size=\"12\">{:.0}</text>",
                MARGIN_LEFT + plot_w + 8.0,
                y + 4.0,
                tick
            )?;
        }

        // One vertical tick label per year.
        let baseline = MARGIN_TOP + plot_h;
        for year in frame.min_year..=frame.max_year {
            let x = px(year);
            writeln!(
                f,
                "<line x1=\"{x:.1}\" y1=\"{:.1}\" x2=\"{x:.1}\" y2=\"{:.1}\" stroke=\"#30363d\" stroke-opacity=\"0.4\"/>",
                MARGIN_TOP,
                baseline,
                x = x
            )?;
            writeln!(
                f,
                "<text transform=\"translate({:.1},{:.1}) rotate(-90)\" fill=\"#8b949e\" font-size=\"11\" text-anchor=\"end\">{}</text>",
                x + 4.0,
                baseline + 8.0,
                year
            )?;
        }

        for trace in &d.traces {
            if trace.points.is_empty() {
                continue;
            }
            let points = trace
                .points
                .iter()
                .fold(String::new(), |mut acc, p| {
                    let _ = write!(acc, "{:.1},{:.1} ", px(p.year), py(p.value));
                    acc
                });
            let points = points.trim_end();

            if trace.kind == TraceKind::Observed {
                let first = px(trace.points[0].year);
                let last = px(trace.points[trace.points.len() - 1].year);
                writeln!(
                    f,
                    "<polygon points=\"{first:.1},{zero:.1} {} {last:.1},{zero:.1}\" fill=\"rgba(88, 166, 255, 0.1)\" stroke=\"none\"/>",
                    points,
                    first = first,
                    last = last,
                    zero = py(0.0)
                )?;
            }

            let width = match trace.kind {
                TraceKind::Projected => 3,
                _ => 2,
            };
            let dash = if trace.kind.dashed() {
                " stroke-dasharray=\"8 6\""
            } else {
                ""
            };
            writeln!(
                f,
                "<polyline points=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"{} pointer-events=\"none\"/>",
                points,
                trace.kind.hex(),
                width,
                dash
            )?;
        }

        // Unified hover: one transparent column per year listing every hoverable trace.
        let step = plot_w / frame.year_count().max(1) as f64;
        let unit = &d.projection.config.unit;
        for year in frame.min_year..=frame.max_year {
            let mut tip = year.to_string();
            for trace in d.traces.iter().filter(|t| t.kind.hover()) {
                if let Some(p) = trace.points.iter().find(|p| p.year == year) {
                    let _ = write!(tip, "\n{}: {:.2} {}", trace.kind.name(), p.value, unit);
                }
            }
            writeln!(
                f,
                "<rect class=\"hover\" x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" fill=\"transparent\"><title>{}</title></rect>",
                px(year) - step / 2.0,
                MARGIN_TOP,
                step,
                plot_h,
                escape(&tip)
            )?;
        }

        // Horizontal legend, top right.
        let mut x = width - MARGIN_RIGHT - 360.0;
        for kind in [TraceKind::Observed, TraceKind::Projected, TraceKind::Trend] {
            let dash = if kind.dashed() {
                " stroke-dasharray=\"6 4\""
            } else {
                ""
            };
            writeln!(
                f,
                "<line x1=\"{:.1}\" y1=\"20\" x2=\"{:.1}\" y2=\"20\" stroke=\"{}\" stroke-width=\"3\"{}/>",
                x,
                x + 24.0,
                kind.hex(),
                dash
            )?;
            writeln!(
                f,
                "<text x=\"{:.1}\" y=\"24\" fill=\"#e6edf3\" font-size=\"13\">{}</text>",
                x + 30.0,
                escape(kind.name())
            )?;
            x += 120.0;
        }

        writeln!(f, "</svg>")?;
        writeln!(f, "</div>")
    }

    fn write_metrics(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "<div class=\"metrics\">")?;
        for metric in &self.dashboard.metrics {
            writeln!(f, "<div class=\"metric\">")?;
            writeln!(f, "<div class=\"label\">{}</div>", escape(&metric.label))?;
            writeln!(f, "<div class=\"value\">{}</div>", escape(&metric.value))?;
            if let Some(delta) = &metric.delta {
                writeln!(
                    f,
                    "<div class=\"delta\" style=\"color: {}\">{}</div>",
                    tone_hex(metric.tone),
                    escape(delta)
                )?;
            }
            writeln!(f, "</div>")?;
        }
        writeln!(f, "</div>")
    }

    fn write_table(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.dashboard;
        let precision = d.projection.config.series.precision as usize;

        writeln!(f, "<h3>ANNUAL DATA TRACKING LIST</h3>")?;
        writeln!(
            f,
            "<a class=\"download\" download=\"{}\" href=\"data:{};charset=utf-8;base64,{}\">DOWNLOAD THIS DATASET AS CSV</a>",
            escape(&d.projection.config.csv_file_name()),
            CSV_MIME,
            STANDARD.encode(self.csv)
        )?;
        writeln!(f, "<div class=\"table-scroll\">")?;
        writeln!(f, "<table>")?;
        writeln!(
            f,
            "<thead><tr><th>{}</th><th>{}</th></tr></thead>",
            escape(d.year_label),
            escape(&d.value_label)
        )?;
        writeln!(f, "<tbody>")?;
        for row in &d.rows {
            writeln!(
                f,
                "<tr><td>{}</td><td class=\"value\" style=\"color: {}\">{:.*}</td></tr>",
                row.year,
                tone_hex(row.tone),
                precision,
                row.value
            )?;
        }
        writeln!(f, "</tbody>")?;
        writeln!(f, "</table>")?;
        writeln!(f, "</div>")
    }
}

/// Escape text for HTML element content and attribute values
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
        assert_eq!(escape("plain"), "plain");
    }
}
