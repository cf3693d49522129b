//! # Series Generator
//!
//! Produces the synthetic annual rainfall sequence: a linear decay from a
//! baseline plus zero-mean Gaussian noise, one value per year, rounded to a
//! fixed number of decimals.
//!
//! The noise source is an explicitly constructed generator. [`SeriesConfig::generate`]
//! seeds a fresh [`StdRng`] from `seed` for every call, so no process-wide random
//! state is touched and identical configurations always yield identical series.
//!
//! ```rust
//! use rainfall_terminal::series::SeriesConfig;
//!
//! let series = SeriesConfig::default().generate()?;
//! assert_eq!(series.len(), 81);
//! assert_eq!(series.first_year(), Some(1975));
//! # Ok::<(), rainfall_terminal::error::ProjectionError>(())
//! ```

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::error::{ProjectionError, Result};

/// Largest supported rounding precision (decimal places)
pub const MAX_PRECISION: u32 = 10;

/// Longest year range a single series may span
pub const MAX_SERIES_LEN: usize = 100_000;

/// Parameters of the synthetic series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesConfig {
    /// First year of the range (inclusive)
    pub start_year: i32,

    /// Last year of the range (inclusive)
    pub end_year: i32,

    /// Value at `start_year` before noise
    pub baseline: f64,

    /// Linear decrease per year
    pub decay_rate: f64,

    /// Standard deviation of the Gaussian noise
    pub noise_std: f64,

    /// Seed for the noise generator
    pub seed: u64,

    /// Decimal places kept when storing values
    pub precision: u32,
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self {
            start_year: 1975,
            end_year: 2055,
            baseline: 550.0,
            decay_rate: 5.5,
            noise_std: 32.0,
            seed: 42,
            precision: 2,
        }
    }
}

impl SeriesConfig {
    /// Number of years in the configured range, or 0 if the range is inverted
    pub fn len(&self) -> usize {
        if self.start_year > self.end_year {
            0
        } else {
            (i64::from(self.end_year) - i64::from(self.start_year) + 1) as usize
        }
    }

    /// True when the configured range contains no years
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check the parameters without generating anything
    pub fn validate(&self) -> Result<()> {
        if self.start_year > self.end_year {
            return Err(ProjectionError::configuration(format!(
                "start_year {} is after end_year {}",
                self.start_year, self.end_year
            )));
        }
        if self.len() > MAX_SERIES_LEN {
            return Err(ProjectionError::configuration(format!(
                "year range {}..={} spans {} years, more than the supported {}",
                self.start_year,
                self.end_year,
                self.len(),
                MAX_SERIES_LEN
            )));
        }
        if !self.baseline.is_finite() {
            return Err(ProjectionError::configuration("baseline must be finite"));
        }
        if !self.decay_rate.is_finite() {
            return Err(ProjectionError::configuration("decay_rate must be finite"));
        }
        if !self.noise_std.is_finite() || self.noise_std < 0.0 {
            return Err(ProjectionError::configuration(format!(
                "noise_std must be a finite, non-negative number (got {})",
                self.noise_std
            )));
        }
        if self.precision > MAX_PRECISION {
            return Err(ProjectionError::configuration(format!(
                "precision must be at most {} decimal places (got {})",
                MAX_PRECISION, self.precision
            )));
        }
        Ok(())
    }

    /// Noise-free value for `year`
    pub fn expected_value(&self, year: i32) -> f64 {
        self.baseline - self.decay_rate * f64::from(year - self.start_year)
    }

    /// Generate the series with a generator seeded from `self.seed`
    pub fn generate(&self) -> Result<Series> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        generate_series(self, &mut rng)
    }
}

/// One (year, value) observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearValue {
    /// Calendar year
    pub year: i32,
    /// Measured or generated value
    pub value: f64,
}

impl YearValue {
    /// Create a new observation
    pub fn new(year: i32, value: f64) -> Self {
        Self { year, value }
    }
}

/// Ordered, contiguous, year-indexed sequence of values
///
/// Years are strictly increasing with a step of one; the type cannot be
/// constructed otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    points: Vec<YearValue>,
}

impl Series {
    /// Build a series from points, checking that years are contiguous and increasing
    pub fn from_points(points: Vec<YearValue>) -> Result<Self> {
        for pair in points.windows(2) {
            if pair[0].year.checked_add(1) != Some(pair[1].year) {
                return Err(ProjectionError::configuration(format!(
                    "years must be contiguous and increasing: {} followed by {}",
                    pair[0].year, pair[1].year
                )));
            }
        }
        Ok(Self { points })
    }

    /// Number of years in the series
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if the series holds no years
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All observations in year order
    pub fn points(&self) -> &[YearValue] {
        &self.points
    }

    /// First year of the series
    pub fn first_year(&self) -> Option<i32> {
        self.points.first().map(|p| p.year)
    }

    /// Last year of the series
    pub fn last_year(&self) -> Option<i32> {
        self.points.last().map(|p| p.year)
    }

    /// Iterator over the years
    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.points.iter().map(|p| p.year)
    }

    /// Iterator over the values
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.value)
    }

    /// The first `n` observations (all of them if `n` exceeds the length)
    pub fn head(&self, n: usize) -> &[YearValue] {
        &self.points[..n.min(self.points.len())]
    }

    /// The last `n` observations (all of them if `n` exceeds the length)
    pub fn tail(&self, n: usize) -> &[YearValue] {
        let start = self.points.len().saturating_sub(n);
        &self.points[start..]
    }

    /// Split into the first `at` observations and the rest
    pub fn split_at(&self, at: usize) -> (&[YearValue], &[YearValue]) {
        self.points.split_at(at.min(self.points.len()))
    }
}

/// Generate a series drawing noise from `rng` in year order
///
/// `raw(year) = baseline - decay_rate * (year - start_year) + noise(year)`,
/// with each value rounded to `config.precision` decimals.
pub fn generate_series<R: Rng + ?Sized>(config: &SeriesConfig, rng: &mut R) -> Result<Series> {
    config.validate()?;

    let noise = Normal::new(0.0, config.noise_std).map_err(|e| {
        ProjectionError::configuration(format!("invalid noise distribution: {}", e))
    })?;

    debug!(
        "Generating series {}..={} (baseline {}, decay {}/yr, noise std {}, seed {})",
        config.start_year,
        config.end_year,
        config.baseline,
        config.decay_rate,
        config.noise_std,
        config.seed
    );

    let points = (config.start_year..=config.end_year)
        .map(|year| {
            let raw = config.expected_value(year) + noise.sample(rng);
            YearValue::new(year, round_to(raw, config.precision))
        })
        .collect();

    Ok(Series { points })
}

/// Round `value` to `decimals` decimal places
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
