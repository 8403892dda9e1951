//! Loader errors

use std::path::PathBuf;

use iaqrank_core::{IaqError, SensorType};
use thiserror::Error;

/// Result type for loading operations
pub type LoadResult<T> = Result<T, LoadError>;

/// Errors raised while reading tables or configuration
#[derive(Debug, Error)]
pub enum LoadError {
    /// File could not be opened or read
    #[error("cannot read {}: {source}", path.display())]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Malformed configuration
    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),

    /// File has no header row
    #[error("table has no header row")]
    NoHeader,
}

impl LoadError {
    /// Convert into the core error for `sensor`
    pub fn into_unavailable(self, sensor: SensorType) -> IaqError {
        IaqError::source_unavailable(sensor, self.to_string())
    }
}
