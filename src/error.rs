//! Centralized error handling for carsales.
//!
//! Loading and configuration return the typed [`SalesError`] so callers can
//! tell a missing file from a missing column. Query and flow code works with
//! `anyhow` and converts these errors with `?`.
//!
//! ```no_run
//! use carsales::error::{Result, ResultExt as _};
//! use std::fs;
//!
//! fn read_header(path: &str) -> Result<String> {
//!     let content = fs::read_to_string(path).context("Failed to read dataset")?;
//!     Ok(content.lines().next().unwrap_or_default().to_owned())
//! }
//! ```

use std::fmt;

/// Main error type for carsales operations.
#[derive(Debug)]
pub enum SalesError {
    /// I/O errors (file operations)
    Io(std::io::Error),

    /// Errors raised by the dataframe engine (parsing, planning, execution)
    DataProcessing(String),

    /// A column the projection needs is absent from the loaded table
    MissingColumn(String),

    /// Configuration errors
    Config(String),

    /// File not found or invalid path
    InvalidPath(String),

    /// Generic error with context
    Other(String),
}

impl fmt::Display for SalesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::DataProcessing(msg) => write!(f, "Data processing error: {msg}"),
            Self::MissingColumn(name) => write!(f, "Missing column: {name}"),
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
            Self::InvalidPath(msg) => write!(f, "Invalid path: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for SalesError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SalesError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for SalesError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(format!("JSON error: {err}"))
    }
}

impl From<polars::error::PolarsError> for SalesError {
    fn from(err: polars::error::PolarsError) -> Self {
        Self::DataProcessing(err.to_string())
    }
}

/// Result type alias for carsales operations.
pub type Result<T> = std::result::Result<T, SalesError>;

/// Extension trait to add context to results.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> Result<T>;

    /// Add context using a closure (lazy evaluation).
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<SalesError>,
{
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err: SalesError = e.into();
            SalesError::Other(format!("{}: {}", msg.into(), err))
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err: SalesError = e.into();
            SalesError::Other(format!("{}: {}", f(), err))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SalesError::MissingColumn("sellingprice".to_owned());
        assert_eq!(err.to_string(), "Missing column: sellingprice");
    }

    #[test]
    fn test_polars_error_maps_to_data_processing() {
        let err: SalesError =
            polars::error::PolarsError::ComputeError("bad csv".into()).into();
        assert!(matches!(err, SalesError::DataProcessing(_)));
        assert!(err.to_string().contains("bad csv"));
    }

    #[test]
    fn test_result_context() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "car_prices.csv",
        ));

        let result: Result<()> = result.context("Failed to read dataset");
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to read dataset")
        );
    }
}
