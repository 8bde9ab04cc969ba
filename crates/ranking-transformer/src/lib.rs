//! Ranking Transformer
//!
//! Serving-time orchestration for the ranking model: retrieves candidate
//! items from the vector index, filters out a customer's purchase history,
//! enriches the survivors with feature-store data and assembles the input
//! matrix in the ranking model's declared column order.

mod error;
mod transformer;
mod types;

pub use error::TransformerError;
pub use transformer::{RankingTransformer, TransformerConfig};
pub use types::{InferenceInputs, InferenceRequest, RankingInputs, RankingInstance};
