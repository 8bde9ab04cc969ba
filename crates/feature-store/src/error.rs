//! Feature Store Error Types

use thiserror::Error;

/// Errors from the service seams
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("feature view '{name}' version {version} not found")]
    ViewNotFound { name: String, version: u32 },

    #[error("model '{name}' version {version} not found")]
    ModelNotFound { name: String, version: u32 },

    #[error("query embedding has {actual} dimensions, index expects {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("backend request failed: {0}")]
    Backend(String),
}
