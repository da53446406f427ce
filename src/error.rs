//! Error types for the fallible boundaries (loading inputs, running projections)
//!
//! The calculators themselves never fail: malformed numbers are coerced to zero
//! before they reach them.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading scenario files and equipment tables
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl LoadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LoadError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors raised by the multi-year projection
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    #[error("projection horizon must be at least one year, got {0}")]
    InvalidHorizon(u32),

    #[error("projection horizon of {0} years exceeds the {max} year limit", max = crate::projection::MAX_HORIZON_YEARS)]
    HorizonTooLong(u32),
}
