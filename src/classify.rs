//! Value classification consumed by the renderers.
//!
//! These functions decide *whether* a number deserves attention; mapping a
//! [`Tone`] to a color or a style is left to [`crate::render`].

use serde::Serialize;

/// Visual emphasis of a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// Value is below the alert threshold, or a change in the bad direction
    Warning,
    /// Anything else
    Normal,
}

/// Classify a table value against the alert threshold
///
/// Values strictly below `threshold` are warnings; values at or above it are normal.
pub fn color_for(value: f64, threshold: f64) -> Tone {
    if value < threshold {
        Tone::Warning
    } else {
        Tone::Normal
    }
}

/// Classify a change in rainfall; a loss is the bad direction
pub fn change_tone(delta: f64) -> Tone {
    if delta < 0.0 {
        Tone::Warning
    } else {
        Tone::Normal
    }
}
