//! In-Memory Backends
//!
//! HashMap-backed implementations of the service seams for tests and
//! development deployments with no managed services attached.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::StoreError;
use crate::store::{FeatureStore, FeatureView, ModelRegistry, Neighbor, VectorIndex};
use crate::value::{FeatureValue, ModelSchema};

fn lock_error<T>(e: std::sync::PoisonError<T>) -> StoreError {
    StoreError::Backend(format!("lock poisoned: {e}"))
}

/// Feature view backed by a key-to-row map
#[derive(Debug)]
pub struct InMemoryFeatureView {
    name: String,
    feature_names: Vec<String>,
    rows: RwLock<HashMap<String, Vec<FeatureValue>>>,
}

impl InMemoryFeatureView {
    /// Create an empty view with the given feature names
    pub fn new(name: impl Into<String>, feature_names: Vec<String>) -> Self {
        Self {
            name: name.into(),
            feature_names,
            rows: RwLock::new(HashMap::new()),
        }
    }

    /// View name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Insert or replace a row. The row must have one value per feature.
    pub fn insert(&self, key: impl Into<String>, values: Vec<FeatureValue>) -> Result<(), StoreError> {
        if values.len() != self.feature_names.len() {
            return Err(StoreError::Backend(format!(
                "row for view '{}' has {} values, expected {}",
                self.name,
                values.len(),
                self.feature_names.len()
            )));
        }

        let mut rows = self.rows.write().map_err(lock_error)?;
        rows.insert(key.into(), values);
        Ok(())
    }

    /// Number of stored rows
    pub fn len(&self) -> usize {
        self.rows.read().map(|r| r.len()).unwrap_or(0)
    }

    /// Whether the view holds no rows
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl FeatureView for InMemoryFeatureView {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    async fn feature_vector(&self, key: &str) -> Result<Option<Vec<FeatureValue>>, StoreError> {
        let rows = self.rows.read().map_err(lock_error)?;
        Ok(rows.get(key).cloned())
    }
}

/// Feature store holding named, versioned in-memory views and a purchase log
pub struct InMemoryFeatureStore {
    views: RwLock<HashMap<(String, u32), Arc<InMemoryFeatureView>>>,
    purchases: RwLock<HashMap<String, Vec<String>>>,
}

impl InMemoryFeatureStore {
    pub fn new() -> Self {
        info!("creating in-memory feature store");
        Self {
            views: RwLock::new(HashMap::new()),
            purchases: RwLock::new(HashMap::new()),
        }
    }

    /// Register a view under its name and the given version
    pub fn register_view(
        &self,
        version: u32,
        view: InMemoryFeatureView,
    ) -> Result<Arc<InMemoryFeatureView>, StoreError> {
        let view = Arc::new(view);
        let mut views = self.views.write().map_err(lock_error)?;
        debug!("registering view '{}' version {}", view.name(), version);
        views.insert((view.name().to_string(), version), Arc::clone(&view));
        Ok(view)
    }

    /// Append an article to a customer's transaction history
    pub fn record_purchase(
        &self,
        customer_id: &str,
        article_id: &str,
    ) -> Result<(), StoreError> {
        let mut purchases = self.purchases.write().map_err(lock_error)?;
        purchases
            .entry(customer_id.to_string())
            .or_default()
            .push(article_id.to_string());
        Ok(())
    }
}

impl Default for InMemoryFeatureStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FeatureStore for InMemoryFeatureStore {
    async fn feature_view(
        &self,
        name: &str,
        version: u32,
    ) -> Result<Arc<dyn FeatureView>, StoreError> {
        let views = self.views.read().map_err(lock_error)?;
        views
            .get(&(name.to_string(), version))
            .map(|v| Arc::clone(v) as Arc<dyn FeatureView>)
            .ok_or_else(|| StoreError::ViewNotFound {
                name: name.to_string(),
                version,
            })
    }

    async fn purchased_article_ids(&self, customer_id: &str) -> Result<Vec<String>, StoreError> {
        let purchases = self.purchases.read().map_err(lock_error)?;
        Ok(purchases.get(customer_id).cloned().unwrap_or_default())
    }
}

/// Brute-force cosine-similarity index over item embeddings
pub struct InMemoryVectorIndex {
    dimension: usize,
    entries: RwLock<Vec<(String, Vec<f32>)>>,
}

impl InMemoryVectorIndex {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Insert or replace an item embedding
    pub fn upsert(&self, id: impl Into<String>, embedding: Vec<f32>) -> Result<(), StoreError> {
        if embedding.len() != self.dimension {
            return Err(StoreError::DimensionMismatch {
                expected: self.dimension,
                actual: embedding.len(),
            });
        }

        let id = id.into();
        let mut entries = self.entries.write().map_err(lock_error)?;
        if let Some(entry) = entries.iter_mut().find(|(existing, _)| *existing == id) {
            entry.1 = embedding;
        } else {
            entries.push((id, embedding));
        }
        Ok(())
    }

    /// Number of indexed items
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    /// Whether the index holds no items
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn cosine(a: &[f32], b: &[f32]) -> f32 {
        let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
        let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }
        dot / (norm_a * norm_b)
    }
}

#[async_trait]
impl VectorIndex for InMemoryVectorIndex {
    async fn query(&self, embedding: &[f32], top_k: usize) -> Result<Vec<Neighbor>, StoreError> {
        if embedding.len() != self.dimension {
            return Err(StoreError::DimensionMismatch {
                expected: self.dimension,
                actual: embedding.len(),
            });
        }

        let entries = self.entries.read().map_err(lock_error)?;
        let mut matches: Vec<Neighbor> = entries
            .iter()
            .map(|(id, stored)| Neighbor {
                id: id.clone(),
                score: Self::cosine(embedding, stored),
            })
            .collect();

        matches.sort_by(|a, b| b.score.total_cmp(&a.score));
        matches.truncate(top_k);

        debug!("index query returned {} matches", matches.len());
        Ok(matches)
    }
}

/// Model registry backed by a map of declared schemas
pub struct InMemoryModelRegistry {
    models: RwLock<HashMap<(String, u32), ModelSchema>>,
}

impl InMemoryModelRegistry {
    pub fn new() -> Self {
        Self {
            models: RwLock::new(HashMap::new()),
        }
    }

    /// Register a model's declared input schema
    pub fn register(
        &self,
        name: impl Into<String>,
        version: u32,
        schema: ModelSchema,
    ) -> Result<(), StoreError> {
        let mut models = self.models.write().map_err(lock_error)?;
        models.insert((name.into(), version), schema);
        Ok(())
    }
}

impl Default for InMemoryModelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ModelRegistry for InMemoryModelRegistry {
    async fn model_schema(&self, name: &str, version: u32) -> Result<ModelSchema, StoreError> {
        let models = self.models.read().map_err(lock_error)?;
        models
            .get(&(name.to_string(), version))
            .cloned()
            .ok_or_else(|| StoreError::ModelNotFound {
                name: name.to_string(),
                version,
            })
    }
}
