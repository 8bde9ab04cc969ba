//! Service Trait Seams
//!
//! Everything substantive (storage, similarity search, schema management)
//! lives behind these traits in the managed services; the crate only defines
//! the boundary the serving path calls through.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::value::{FeatureValue, ModelSchema};

/// A named, versioned feature view exposing row lookups by primary key.
#[async_trait]
pub trait FeatureView: Send + Sync + std::fmt::Debug {
    /// Feature names of this view, in row order
    fn feature_names(&self) -> &[String];

    /// Fetch one row by primary key; `None` when the key is absent
    async fn feature_vector(&self, key: &str) -> Result<Option<Vec<FeatureValue>>, StoreError>;
}

/// Connection to the feature store.
#[async_trait]
pub trait FeatureStore: Send + Sync {
    /// Resolve a named, versioned feature view
    async fn feature_view(
        &self,
        name: &str,
        version: u32,
    ) -> Result<Arc<dyn FeatureView>, StoreError>;

    /// Article ids present in a customer's transaction history
    async fn purchased_article_ids(&self, customer_id: &str) -> Result<Vec<String>, StoreError>;
}

/// One nearest-neighbor match from the vector index
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbor {
    /// Item id of the match
    pub id: String,
    /// Similarity score, larger is closer
    pub score: f32,
}

/// Nearest-neighbor index over candidate item embeddings.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// The `top_k` most similar items to the query embedding, best first
    async fn query(&self, embedding: &[f32], top_k: usize) -> Result<Vec<Neighbor>, StoreError>;
}

/// Model registry exposing declared input schemas.
#[async_trait]
pub trait ModelRegistry: Send + Sync {
    /// Declared input schema of a named, versioned model
    async fn model_schema(&self, name: &str, version: u32) -> Result<ModelSchema, StoreError>;
}
