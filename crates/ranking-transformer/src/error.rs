//! Transformer Error Types

use feature_store::StoreError;
use thiserror::Error;

/// Errors while assembling ranking model inputs
#[derive(Debug, Error)]
pub enum TransformerError {
    #[error("request contains no instances")]
    EmptyRequest,

    #[error("customer '{0}' not present in the customers view")]
    UnknownCustomer(String),

    #[error("ranking model expects feature '{0}' which was not assembled")]
    MissingFeature(String),

    #[error("row for key '{key}' in view '{view}' has {actual} values, expected {expected}")]
    MalformedRow {
        view: String,
        key: String,
        expected: usize,
        actual: usize,
    },

    #[error("service call failed: {0}")]
    Store(#[from] StoreError),
}
