//! Feature Engineering Error Types

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors during feature engineering
#[derive(Debug, Error)]
pub enum FeatureError {
    /// Input frame is missing a required column
    #[error("column '{0}' not found in frame")]
    MissingColumn(String),

    /// Column has a dtype the transform cannot handle
    #[error("column '{column}' has dtype {dtype}, unsupported for {operation}")]
    UnsupportedDtype {
        column: String,
        dtype: String,
        operation: &'static str,
    },

    /// Date value does not parse as YYYY-MM-DD
    #[error("invalid date value '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    /// Underlying dataframe operation failed
    #[error("dataframe operation failed: {0}")]
    Frame(#[from] PolarsError),
}
