//! Development Backends
//!
//! Seeds the in-memory services with a small catalog so the serving surface
//! runs without managed services attached.

use std::sync::Arc;

use feature_store::{
    ColumnSpec, InMemoryFeatureStore, InMemoryFeatureView, InMemoryModelRegistry,
    InMemoryVectorIndex, ModelSchema, StoreError,
};
use tracing::info;

use crate::config::ServiceConfig;

/// Handles to the seeded in-memory services
pub struct DemoBackends {
    pub store: Arc<InMemoryFeatureStore>,
    pub index: Arc<InMemoryVectorIndex>,
    pub registry: Arc<InMemoryModelRegistry>,
}

const DEMO_ARTICLES: &[(&str, i64, i64)] = &[
    ("108775015", 9, 11),
    ("108775044", 6, 24),
    ("110065001", 14, 52),
    ("111565001", 8, 33),
    ("111586001", 12, 47),
    ("111593001", 10, 29),
];

const DEMO_CUSTOMERS: &[(&str, i64, &str)] = &[
    ("c-001", 24, "ACTIVE"),
    ("c-002", 61, "ABSENT"),
];

/// Build and seed in-memory backends matching the configured view, model and
/// index names.
pub fn seeded_backends(config: &ServiceConfig) -> Result<DemoBackends, StoreError> {
    let store = Arc::new(InMemoryFeatureStore::new());
    let index = Arc::new(InMemoryVectorIndex::new(config.embedding_dimension));
    let registry = Arc::new(InMemoryModelRegistry::new());

    let articles = InMemoryFeatureView::new(
        config.articles_view.clone(),
        vec![
            "article_id".to_string(),
            "prod_name_length".to_string(),
            "detail_desc_length".to_string(),
        ],
    );
    for (seed, (article_id, prod_len, desc_len)) in DEMO_ARTICLES.iter().enumerate() {
        articles.insert(
            *article_id,
            vec![(*article_id).into(), (*prod_len).into(), (*desc_len).into()],
        )?;
        index.upsert(
            *article_id,
            demo_embedding(seed, config.embedding_dimension),
        )?;
    }
    store.register_view(config.articles_version, articles)?;

    let customers = InMemoryFeatureView::new(
        config.customers_view.clone(),
        vec![
            "customer_id".to_string(),
            "age".to_string(),
            "club_member_status".to_string(),
        ],
    );
    for (customer_id, age, status) in DEMO_CUSTOMERS {
        customers.insert(
            *customer_id,
            vec![(*customer_id).into(), (*age).into(), (*status).into()],
        )?;
    }
    store.register_view(config.customers_version, customers)?;

    store.record_purchase("c-001", "108775015")?;

    registry.register(
        config.model_name.clone(),
        config.model_version,
        ModelSchema::new(vec![
            ColumnSpec::new("age", "int64"),
            ColumnSpec::new("month_sin", "float64"),
            ColumnSpec::new("month_cos", "float64"),
            ColumnSpec::new("prod_name_length", "int64"),
            ColumnSpec::new("detail_desc_length", "int64"),
        ]),
    )?;

    info!(
        "seeded development backends: {} articles, {} customers",
        DEMO_ARTICLES.len(),
        DEMO_CUSTOMERS.len()
    );

    Ok(DemoBackends {
        store,
        index,
        registry,
    })
}

fn demo_embedding(seed: usize, dimension: usize) -> Vec<f32> {
    (0..dimension)
        .map(|j| ((seed * 31 + j * 7) % 13) as f32 / 13.0)
        .collect()
}
