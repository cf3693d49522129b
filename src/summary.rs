//! # Summary Statistics
//!
//! Window averages over the start and the end of a series, and their change.

use log::debug;
use serde::Serialize;

use crate::error::{ProjectionError, Result};
use crate::series::{Series, YearValue};

/// Mean values of the first and last `window` years of a series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowAverages {
    /// Number of years in each window
    pub window: usize,
    /// First and last year of the leading window
    pub first_years: (i32, i32),
    /// First and last year of the trailing window
    pub last_years: (i32, i32),
    /// Mean over the leading window
    pub first_avg: f64,
    /// Mean over the trailing window
    pub last_avg: f64,
    /// `last_avg - first_avg`
    pub delta: f64,
}

impl WindowAverages {
    /// Label of the leading window, e.g. `1975-1979`
    pub fn first_label(&self) -> String {
        format!("{}-{}", self.first_years.0, self.first_years.1)
    }

    /// Label of the trailing window, e.g. `2051-2055`
    pub fn last_label(&self) -> String {
        format!("{}-{}", self.last_years.0, self.last_years.1)
    }
}

/// Average the first and last `window` values of `series`
///
/// The two windows may not overlap: a series shorter than `2 * window`
/// fails with [`ProjectionError::InsufficientData`].
pub fn window_averages(series: &Series, window: usize) -> Result<WindowAverages> {
    if window == 0 {
        return Err(ProjectionError::configuration(
            "summary window must cover at least one year",
        ));
    }
    let needed = window.saturating_mul(2);
    if series.len() < needed {
        return Err(ProjectionError::InsufficientData {
            what: "window averages",
            needed,
            available: series.len(),
        });
    }

    let head = series.head(window);
    let tail = series.tail(window);

    let first_avg = mean(head);
    let last_avg = mean(tail);
    let delta = last_avg - first_avg;

    debug!(
        "Window averages ({} years): first {:.2}, last {:.2}, delta {:+.2}",
        window, first_avg, last_avg, delta
    );

    Ok(WindowAverages {
        window,
        first_years: span(head),
        last_years: span(tail),
        first_avg,
        last_avg,
        delta,
    })
}

fn mean(points: &[YearValue]) -> f64 {
    points.iter().map(|p| p.value).sum::<f64>() / points.len() as f64
}

// Callers guarantee `points` is non-empty.
fn span(points: &[YearValue]) -> (i32, i32) {
    (points[0].year, points[points.len() - 1].year)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::SeriesConfig;

    fn ramp(len: i32) -> Series {
        Series::from_points((0..len).map(|i| YearValue::new(2000 + i, f64::from(i))).collect())
            .unwrap()
    }

    #[test]
    fn test_window_means() {
        let averages = window_averages(&ramp(10), 3).unwrap();
        assert_eq!(averages.first_avg, 1.0);
        assert_eq!(averages.last_avg, 8.0);
        assert_eq!(averages.delta, 7.0);
        assert_eq!(averages.first_label(), "2000-2002");
        assert_eq!(averages.last_label(), "2007-2009");
    }

    #[test]
    fn test_default_scenario_windows() {
        let series = SeriesConfig::default().generate().unwrap();
        let averages = window_averages(&series, 5).unwrap();
        assert_eq!(averages.first_years, (1975, 1979));
        assert_eq!(averages.last_years, (2051, 2055));
        assert_eq!(averages.delta, averages.last_avg - averages.first_avg);
        assert!(averages.delta < 0.0);
    }

    #[test]
    fn test_adjacent_windows_allowed() {
        let averages = window_averages(&ramp(4), 2).unwrap();
        assert_eq!(averages.first_avg, 0.5);
        assert_eq!(averages.last_avg, 2.5);
    }

    #[test]
    fn test_overlapping_windows_rejected() {
        assert!(matches!(
            window_averages(&ramp(9), 5),
            Err(ProjectionError::InsufficientData { needed: 10, available: 9, .. })
        ));
    }

    #[test]
    fn test_zero_window_rejected() {
        assert!(matches!(
            window_averages(&ramp(4), 0),
            Err(ProjectionError::Configuration(_))
        ));
    }
}
