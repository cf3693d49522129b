//! # Trend Estimator
//!
//! Ordinary-least-squares fit of `value = slope * year + intercept` over the
//! historical prefix of a [`Series`], evaluated across the full year range.
//!
//! The fit only ever reads the first `historical_len` points; the projected
//! tail has no influence on the model or on the reported fit quality.

use log::info;
use serde::Serialize;

use crate::error::{ProjectionError, Result};
use crate::series::{Series, YearValue};

/// Minimum number of points that determine a line
pub const MIN_FIT_POINTS: usize = 2;

/// Fitted linear function of the year
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendModel {
    /// Change in value per year
    pub slope: f64,
    /// Value at year zero
    pub intercept: f64,
}

impl TrendModel {
    /// Evaluate the line at `year`
    pub fn predict(&self, year: i32) -> f64 {
        self.slope * f64::from(year) + self.intercept
    }

    /// Fit the line to `points` by ordinary least squares
    ///
    /// Uses the centered closed form, which keeps calendar-year magnitudes
    /// from swamping the sums.
    pub fn fit(points: &[YearValue]) -> Result<Self> {
        if points.len() < MIN_FIT_POINTS {
            return Err(ProjectionError::InsufficientData {
                what: "trend fit",
                needed: MIN_FIT_POINTS,
                available: points.len(),
            });
        }

        let n = points.len() as f64;
        let x_mean = points.iter().map(|p| f64::from(p.year)).sum::<f64>() / n;
        let y_mean = points.iter().map(|p| p.value).sum::<f64>() / n;

        let (sxx, sxy) = points.iter().fold((0.0, 0.0), |(sxx, sxy), p| {
            let dx = f64::from(p.year) - x_mean;
            (sxx + dx * dx, sxy + dx * (p.value - y_mean))
        });

        if sxx == 0.0 {
            return Err(ProjectionError::DegenerateFit(
                "all historical points share the same year".to_string(),
            ));
        }

        let slope = sxy / sxx;
        let intercept = y_mean - slope * x_mean;

        if !slope.is_finite() || !intercept.is_finite() {
            return Err(ProjectionError::DegenerateFit(format!(
                "non-finite parameters (slope {}, intercept {})",
                slope, intercept
            )));
        }

        Ok(Self { slope, intercept })
    }
}

/// Result of fitting a trend to the historical split of a series
#[derive(Debug, Clone, Serialize)]
pub struct TrendFit {
    /// The fitted line
    pub model: TrendModel,
    /// Coefficient of determination over the historical split
    pub r_squared: f64,
    /// Number of leading points used for the fit
    pub historical_len: usize,
    /// Model evaluated at every year of the full series
    pub line: Vec<YearValue>,
}

/// Fit a trend on the first `historical_len` points of `series` and extrapolate it
///
/// # Errors
///
/// - [`ProjectionError::InsufficientData`] if `historical_len < 2`
/// - [`ProjectionError::Configuration`] if `historical_len` exceeds the series length
/// - [`ProjectionError::DegenerateFit`] if the solver produces non-finite parameters
pub fn fit_trend(series: &Series, historical_len: usize) -> Result<TrendFit> {
    if historical_len < MIN_FIT_POINTS {
        return Err(ProjectionError::InsufficientData {
            what: "trend fit",
            needed: MIN_FIT_POINTS,
            available: historical_len,
        });
    }
    if historical_len > series.len() {
        return Err(ProjectionError::configuration(format!(
            "historical split of {} years exceeds series length {}",
            historical_len,
            series.len()
        )));
    }

    let (historical, _) = series.split_at(historical_len);
    let model = TrendModel::fit(historical)?;
    let r_squared = r_squared(historical, &model);

    info!(
        "Trend fit over {} years: slope {:.4}/yr, intercept {:.4}, R² {:.4}",
        historical_len, model.slope, model.intercept, r_squared
    );

    let line = series
        .years()
        .map(|year| YearValue::new(year, model.predict(year)))
        .collect();

    Ok(TrendFit {
        model,
        r_squared,
        historical_len,
        line,
    })
}

/// Coefficient of determination `1 - SS_res / SS_tot` of `model` over `points`
///
/// Constant observations are explained exactly by the fitted flat line and
/// report 1.0. They are detected on the values themselves, since a mean that is
/// off by one ulp leaves `SS_tot` tiny but non-zero. Any fit whose residual sum
/// is zero to within machine precision of `SS_tot` also reports 1.0.
pub fn r_squared(points: &[YearValue], model: &TrendModel) -> f64 {
    let Some(first) = points.first() else {
        return 1.0;
    };
    if points.iter().all(|p| p.value == first.value) {
        return 1.0;
    }

    let mean = points.iter().map(|p| p.value).sum::<f64>() / points.len() as f64;
    let (ss_res, ss_tot) = points.iter().fold((0.0, 0.0), |(res, tot), p| {
        let residual = p.value - model.predict(p.year);
        let deviation = p.value - mean;
        (res + residual * residual, tot + deviation * deviation)
    });

    if ss_tot == 0.0 || ss_res <= ss_tot * f64::EPSILON {
        1.0
    } else {
        1.0 - ss_res / ss_tot
    }
}
