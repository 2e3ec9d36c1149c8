//! Error types.

use thiserror::Error;

use crate::export::ExportError;

/// Errors raised while reading samples, loading trees or writing rules.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Line {line}: cannot parse `{value}` as a number")]
    Parse { line: usize, value: String },

    #[error("Line {line}: expected {expected} columns, got {got}")]
    Ragged { line: usize, expected: usize, got: usize },

    #[error("The column \"{column}\" has {got} values, expected {expected}")]
    LengthMismatch { column: String, expected: usize, got: usize },

    #[error("The column \"{0}\" does not exist")]
    UnknownColumn(String),

    #[error("The column \"{column}\" has {count} missing values")]
    MissingValues { column: String, count: usize },

    #[error("Target values must be non-negative integers. Got {0}")]
    InvalidTarget(f64),

    #[error("The sample has no rows")]
    EmptySample,

    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Result type used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_01() {
        let err = Error::Parse { line: 3, value: "abc".to_string() };
        let res = format!("{err}");
        assert!(res.contains("Line 3"), "got {res}.");
        assert!(res.contains("abc"), "got {res}.");
    }

    #[test]
    fn test_error_display_02() {
        let err = Error::UnknownColumn("class".to_string());
        let res = format!("{err}");
        let exp = "The column \"class\" does not exist";
        assert_eq!(exp, res, "expected {exp:?}, got {res:?}.");
    }

    #[test]
    fn test_error_from_export() {
        let err: Error = ExportError::EmptyTree.into();
        assert!(matches!(err, Error::Export(ExportError::EmptyTree)));
    }
}
