//! Error types shared by the analysis pipeline and the export layer.

/// Errors that abort an analysis run
#[derive(Debug, thiserror::Error)]
pub enum ProjectionError {
    /// Invalid year range or generation parameters
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Too few points to fit a line or to compute window statistics
    #[error("Insufficient data for {what}: need at least {needed} points, got {available}")]
    InsufficientData {
        /// Which computation ran short of data
        what: &'static str,
        /// Minimum number of points required
        needed: usize,
        /// Number of points actually available
        available: usize,
    },

    /// The least-squares solver could not produce finite parameters
    #[error("Degenerate fit: {0}")]
    DegenerateFit(String),
}

impl ProjectionError {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        ProjectionError::Configuration(message.into())
    }
}

/// Errors that can occur while exporting or re-importing a series
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// I/O error writing or persisting an output file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV encoding/decoding error
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Input does not have the expected `Year,<value>` layout
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Imported rows do not form a valid series
    #[error(transparent)]
    Projection(#[from] ProjectionError),
}

/// Result alias for analysis operations
pub type Result<T, E = ProjectionError> = std::result::Result<T, E>;
