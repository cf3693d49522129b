//! Chart geometry shared by the renderers: data bounds, axis ticks and the
//! mapping from (year, value) to a drawing surface.

use super::Trace;

/// Data extent of a chart, with a padded value axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartFrame {
    /// Leftmost year
    pub min_year: i32,
    /// Rightmost year
    pub max_year: i32,
    /// Bottom of the value axis
    pub min_value: f64,
    /// Top of the value axis
    pub max_value: f64,
}

impl ChartFrame {
    /// Frame enclosing every point of `traces`
    ///
    /// With `include_zero` the value axis always reaches down (or up) to zero,
    /// for area fills drawn to the axis. Returns `None` if no trace has points.
    pub fn fit(traces: &[Trace], include_zero: bool) -> Option<Self> {
        let mut points = traces.iter().flat_map(|t| t.points.iter());
        let first = points.next()?;

        let mut frame = Self {
            min_year: first.year,
            max_year: first.year,
            min_value: first.value,
            max_value: first.value,
        };
        for p in points {
            frame.min_year = frame.min_year.min(p.year);
            frame.max_year = frame.max_year.max(p.year);
            frame.min_value = frame.min_value.min(p.value);
            frame.max_value = frame.max_value.max(p.value);
        }
        if include_zero {
            frame.min_value = frame.min_value.min(0.0);
            frame.max_value = frame.max_value.max(0.0);
        }

        let span = frame.max_value - frame.min_value;
        let pad = if span > 0.0 { span * 0.05 } else { 1.0 };
        if frame.min_value != 0.0 {
            frame.min_value -= pad;
        }
        frame.max_value += pad;

        Some(frame)
    }

    /// Number of years on the horizontal axis
    pub fn year_count(&self) -> usize {
        (self.max_year - self.min_year) as usize + 1
    }

    /// Horizontal position of `year` in `[0, width]`
    pub fn x(&self, year: i32, width: f64) -> f64 {
        let span = f64::from(self.max_year - self.min_year);
        if span == 0.0 {
            width / 2.0
        } else {
            f64::from(year - self.min_year) / span * width
        }
    }

    /// Vertical position of `value` in `[0, height]`, zero at the top
    pub fn y(&self, value: f64, height: f64) -> f64 {
        let span = self.max_value - self.min_value;
        (self.max_value - value) / span * height
    }

    /// Round tick values covering the value axis, about `target` of them
    pub fn value_ticks(&self, target: usize) -> Vec<f64> {
        let step = nice_step((self.max_value - self.min_value) / target.max(1) as f64);
        let mut ticks = Vec::new();
        let mut tick = (self.min_value / step).ceil() * step;
        while tick <= self.max_value {
            ticks.push(tick);
            tick += step;
        }
        ticks
    }
}

/// Smallest of 1, 2, 5 or 10 times a power of ten that is at least `raw`
fn nice_step(raw: f64) -> f64 {
    if !raw.is_finite() || raw <= 0.0 {
        return 1.0;
    }
    let magnitude = 10f64.powi(raw.log10().floor() as i32);
    let residual = raw / magnitude;
    let factor = if residual <= 1.0 {
        1.0
    } else if residual <= 2.0 {
        2.0
    } else if residual <= 5.0 {
        5.0
    } else {
        10.0
    };
    factor * magnitude
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::TraceKind;
    use crate::series::YearValue;

    fn trace(points: &[(i32, f64)]) -> Trace {
        Trace {
            kind: TraceKind::Observed,
            points: points.iter().map(|&(y, v)| YearValue::new(y, v)).collect(),
        }
    }

    #[test]
    fn test_frame_bounds() {
        let frame = ChartFrame::fit(&[trace(&[(2000, 100.0), (2010, 200.0)])], false).unwrap();
        assert_eq!(frame.min_year, 2000);
        assert_eq!(frame.max_year, 2010);
        assert_eq!(frame.year_count(), 11);
        assert!(frame.min_value < 100.0);
        assert!(frame.max_value > 200.0);
    }

    #[test]
    fn test_frame_includes_zero() {
        let frame = ChartFrame::fit(&[trace(&[(2000, 100.0), (2001, 200.0)])], true).unwrap();
        assert_eq!(frame.min_value, 0.0);
    }

    #[test]
    fn test_empty_traces() {
        assert!(ChartFrame::fit(&[trace(&[])], true).is_none());
    }

    #[test]
    fn test_mapping_endpoints() {
        let frame = ChartFrame {
            min_year: 2000,
            max_year: 2010,
            min_value: 0.0,
            max_value: 100.0,
        };
        assert_eq!(frame.x(2000, 500.0), 0.0);
        assert_eq!(frame.x(2010, 500.0), 500.0);
        assert_eq!(frame.y(100.0, 300.0), 0.0);
        assert_eq!(frame.y(0.0, 300.0), 300.0);
    }

    #[test]
    fn test_nice_ticks() {
        let frame = ChartFrame {
            min_year: 2000,
            max_year: 2001,
            min_value: 0.0,
            max_value: 630.0,
        };
        assert_eq!(frame.value_ticks(5), vec![0.0, 200.0, 400.0, 600.0]);
        assert_eq!(nice_step(0.0), 1.0);
        assert_eq!(nice_step(37.0), 50.0);
    }
}
