//! Serving Payload Types
//!
//! Shapes mirror what the model server delivers to and expects back from the
//! transformer.

use feature_store::FeatureValue;
use serde::{Deserialize, Serialize};

/// One ranking request: a customer, their query embedding and the cyclical
/// month encoding of the request time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingInstance {
    pub customer_id: String,
    pub query_emb: Vec<f32>,
    pub month_sin: f64,
    pub month_cos: f64,
}

/// Request envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceRequest {
    pub instances: Vec<RankingInstance>,
}

/// Assembled inputs for one instance: one feature row per surviving
/// candidate, column-ordered per the ranking model schema, plus the
/// candidate ids in row order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingInputs {
    pub ranking_features: Vec<Vec<FeatureValue>>,
    pub article_ids: Vec<String>,
}

/// Envelope handed to the ranking model server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceInputs {
    pub inputs: Vec<RankingInputs>,
}
