//! Error types for weight validation, configuration and measurements.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ChamferError>;

/// Errors raised while building a transform or a measurement.
/// The transform itself never fails once its weights are valid.
#[derive(Debug, Error)]
pub enum ChamferError {
    /// Weights, resolutions or preset names that cannot be used.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A configuration file could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration document could not be parsed.
    #[error("failed to parse config: {0}")]
    Config(#[from] serde_json::Error),
}

impl ChamferError {
    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_configuration(details: impl Into<String>) -> Self {
        Self::InvalidConfiguration(details.into())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display(){
        let err = ChamferError::invalid_configuration("expected at least 2 weights");
        assert!(format!("{err}").contains("at least 2 weights"));

        let err = ChamferError::from(serde_json::from_str::<u32>("nope").unwrap_err());
        assert!(format!("{err}").starts_with("failed to parse config"));
    }
}
