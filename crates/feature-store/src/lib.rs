//! Feature Store Seams
//!
//! Trait boundaries for the external managed services the serving path talks
//! to (feature store, vector index, model registry), the scalar feature data
//! model, and in-memory backends for tests and development deployments.

mod error;
mod memory;
mod store;
mod value;

pub use error::StoreError;
pub use memory::{
    InMemoryFeatureStore, InMemoryFeatureView, InMemoryModelRegistry, InMemoryVectorIndex,
};
pub use store::{FeatureStore, FeatureView, ModelRegistry, Neighbor, VectorIndex};
pub use value::{ColumnSpec, FeatureValue, ModelSchema};
