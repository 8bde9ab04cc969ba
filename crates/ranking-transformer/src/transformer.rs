//! Ranking Transformer Implementation

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use feature_store::{FeatureStore, FeatureValue, FeatureView, ModelRegistry, VectorIndex};
use tracing::{debug, info};

use crate::error::TransformerError;
use crate::types::{InferenceInputs, InferenceRequest, RankingInputs};

/// Transformer configuration: which views, model and candidate budget to use
#[derive(Debug, Clone)]
pub struct TransformerConfig {
    /// Articles feature view name
    pub articles_view: String,
    /// Articles feature view version
    pub articles_version: u32,
    /// Customers feature view name
    pub customers_view: String,
    /// Customers feature view version
    pub customers_version: u32,
    /// Ranking model name in the registry
    pub model_name: String,
    /// Ranking model version
    pub model_version: u32,
    /// Candidates to retrieve from the vector index per request
    pub candidate_count: usize,
}

impl Default for TransformerConfig {
    fn default() -> Self {
        Self {
            articles_view: "articles".to_string(),
            articles_version: 1,
            customers_view: "customers".to_string(),
            customers_version: 1,
            model_name: "ranking_model".to_string(),
            model_version: 1,
            candidate_count: 100,
        }
    }
}

/// Serving-time transformer bundling the service handles it orchestrates
pub struct RankingTransformer {
    store: Arc<dyn FeatureStore>,
    index: Arc<dyn VectorIndex>,
    articles_fv: Arc<dyn FeatureView>,
    customers_fv: Arc<dyn FeatureView>,
    article_features: Vec<String>,
    ranking_feature_names: Vec<String>,
    config: TransformerConfig,
}

impl std::fmt::Debug for RankingTransformer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RankingTransformer")
            .field("article_features", &self.article_features)
            .field("ranking_feature_names", &self.ranking_feature_names)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl RankingTransformer {
    /// Connect the transformer: resolve both feature views and capture the
    /// ranking model's declared input column order from the registry.
    pub async fn connect(
        store: Arc<dyn FeatureStore>,
        index: Arc<dyn VectorIndex>,
        registry: Arc<dyn ModelRegistry>,
        config: TransformerConfig,
    ) -> Result<Self, TransformerError> {
        let articles_fv = store
            .feature_view(&config.articles_view, config.articles_version)
            .await?;
        let customers_fv = store
            .feature_view(&config.customers_view, config.customers_version)
            .await?;
        let article_features = articles_fv.feature_names().to_vec();

        let schema = registry
            .model_schema(&config.model_name, config.model_version)
            .await?;
        let ranking_feature_names = schema.input_names();

        info!(
            "transformer connected: model '{}' v{} expects {} input columns",
            config.model_name,
            config.model_version,
            ranking_feature_names.len()
        );

        Ok(Self {
            store,
            index,
            articles_fv,
            customers_fv,
            article_features,
            ranking_feature_names,
            config,
        })
    }

    /// Input column names the ranking model declared, in model order
    pub fn ranking_feature_names(&self) -> &[String] {
        &self.ranking_feature_names
    }

    /// Assemble ranking model inputs for the first instance of a request.
    ///
    /// Candidates come from the vector index, minus the customer's purchase
    /// history; each survivor is enriched with its article features, the
    /// customer's age and the request's cyclical month encoding, then laid
    /// out in the model's declared column order.
    pub async fn preprocess(
        &self,
        request: &InferenceRequest,
    ) -> Result<InferenceInputs, TransformerError> {
        let instance = request
            .instances
            .first()
            .ok_or(TransformerError::EmptyRequest)?;

        let neighbors = self
            .index
            .query(&instance.query_emb, self.config.candidate_count)
            .await?;

        let already_bought: HashSet<String> = self
            .store
            .purchased_article_ids(&instance.customer_id)
            .await?
            .into_iter()
            .collect();

        let mut seen = HashSet::new();
        let candidates: Vec<String> = neighbors
            .into_iter()
            .map(|n| n.id)
            .filter(|id| !already_bought.contains(id))
            .filter(|id| seen.insert(id.clone()))
            .collect();

        debug!(
            "customer '{}': {} candidates after excluding {} purchased items",
            instance.customer_id,
            candidates.len(),
            already_bought.len()
        );

        let customer = self
            .customers_fv
            .feature_vector(&instance.customer_id)
            .await?
            .ok_or_else(|| TransformerError::UnknownCustomer(instance.customer_id.clone()))?;
        let age = self
            .customer_value(&customer, "age")
            .ok_or_else(|| TransformerError::MissingFeature("age".to_string()))?;

        let mut article_ids = Vec::with_capacity(candidates.len());
        let mut rows = Vec::with_capacity(candidates.len());

        for candidate in candidates {
            let Some(article_row) = self.articles_fv.feature_vector(&candidate).await? else {
                debug!("candidate '{}' missing from articles view, skipping", candidate);
                continue;
            };
            if article_row.len() != self.article_features.len() {
                return Err(TransformerError::MalformedRow {
                    view: self.config.articles_view.clone(),
                    key: candidate,
                    expected: self.article_features.len(),
                    actual: article_row.len(),
                });
            }

            let mut features: HashMap<&str, FeatureValue> = self
                .article_features
                .iter()
                .map(String::as_str)
                .zip(article_row)
                .collect();
            features.insert("age", age.clone());
            features.insert("month_sin", FeatureValue::Float(instance.month_sin));
            features.insert("month_cos", FeatureValue::Float(instance.month_cos));

            let row: Vec<FeatureValue> = self
                .ranking_feature_names
                .iter()
                .map(|name| {
                    features
                        .get(name.as_str())
                        .cloned()
                        .ok_or_else(|| TransformerError::MissingFeature(name.clone()))
                })
                .collect::<Result<_, _>>()?;

            article_ids.push(candidate);
            rows.push(row);
        }

        debug!(
            "assembled {} ranking rows for customer '{}'",
            rows.len(),
            instance.customer_id
        );

        Ok(InferenceInputs {
            inputs: vec![RankingInputs {
                ranking_features: rows,
                article_ids,
            }],
        })
    }

    /// Model server output passes through unchanged.
    pub fn postprocess(&self, outputs: serde_json::Value) -> serde_json::Value {
        outputs
    }

    fn customer_value(&self, row: &[FeatureValue], name: &str) -> Option<FeatureValue> {
        self.customers_fv
            .feature_names()
            .iter()
            .position(|n| n == name)
            .and_then(|i| row.get(i))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RankingInstance;
    use feature_store::{
        ColumnSpec, InMemoryFeatureStore, InMemoryFeatureView, InMemoryModelRegistry,
        InMemoryVectorIndex, ModelSchema,
    };

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    async fn connected_transformer() -> (Arc<InMemoryFeatureStore>, Arc<InMemoryVectorIndex>, RankingTransformer)
    {
        let store = Arc::new(InMemoryFeatureStore::new());
        let index = Arc::new(InMemoryVectorIndex::new(2));
        let registry = Arc::new(InMemoryModelRegistry::new());

        let articles = InMemoryFeatureView::new(
            "articles",
            names(&["article_id", "prod_name_length", "detail_desc_length"]),
        );
        articles
            .insert("item-a", vec!["item-a".into(), 9i64.into(), 11i64.into()])
            .unwrap();
        articles
            .insert("item-b", vec!["item-b".into(), 6i64.into(), 24i64.into()])
            .unwrap();
        articles
            .insert("item-c", vec!["item-c".into(), 12i64.into(), 40i64.into()])
            .unwrap();
        store.register_view(1, articles).unwrap();

        let customers = InMemoryFeatureView::new(
            "customers",
            names(&["customer_id", "age", "club_member_status"]),
        );
        customers
            .insert("c-1", vec!["c-1".into(), 24i64.into(), "ACTIVE".into()])
            .unwrap();
        store.register_view(1, customers).unwrap();

        index.upsert("item-a", vec![1.0, 0.0]).unwrap();
        index.upsert("item-b", vec![0.9, 0.1]).unwrap();
        index.upsert("item-c", vec![0.0, 1.0]).unwrap();

        registry
            .register(
                "ranking_model",
                1,
                ModelSchema::new(vec![
                    ColumnSpec::new("age", "int64"),
                    ColumnSpec::new("month_sin", "float64"),
                    ColumnSpec::new("month_cos", "float64"),
                    ColumnSpec::new("prod_name_length", "int64"),
                    ColumnSpec::new("detail_desc_length", "int64"),
                ]),
            )
            .unwrap();

        let transformer = RankingTransformer::connect(
            store.clone(),
            index.clone(),
            registry,
            TransformerConfig::default(),
        )
        .await
        .unwrap();

        (store, index, transformer)
    }

    fn request(customer_id: &str) -> InferenceRequest {
        InferenceRequest {
            instances: vec![RankingInstance {
                customer_id: customer_id.to_string(),
                query_emb: vec![1.0, 0.0],
                month_sin: 0.5,
                month_cos: -0.5,
            }],
        }
    }

    #[tokio::test]
    async fn test_preprocess_assembles_schema_ordered_rows() {
        let (_, _, transformer) = connected_transformer().await;

        let out = transformer.preprocess(&request("c-1")).await.unwrap();
        let inputs = &out.inputs[0];

        assert_eq!(inputs.article_ids.len(), 3);
        // Best match first, per index similarity
        assert_eq!(inputs.article_ids[0], "item-a");

        let row = &inputs.ranking_features[0];
        assert_eq!(row.len(), 5);
        assert_eq!(row[0], FeatureValue::Int(24)); // age
        assert_eq!(row[1], FeatureValue::Float(0.5)); // month_sin
        assert_eq!(row[2], FeatureValue::Float(-0.5)); // month_cos
        assert_eq!(row[3], FeatureValue::Int(9)); // prod_name_length of item-a
    }

    #[tokio::test]
    async fn test_purchased_candidates_excluded() {
        let (store, _, transformer) = connected_transformer().await;
        store.record_purchase("c-1", "item-a").unwrap();

        let out = transformer.preprocess(&request("c-1")).await.unwrap();
        let inputs = &out.inputs[0];

        assert!(!inputs.article_ids.contains(&"item-a".to_string()));
        assert_eq!(inputs.article_ids.len(), 2);
        assert_eq!(inputs.ranking_features.len(), 2);
    }

    #[tokio::test]
    async fn test_candidates_missing_from_view_are_skipped() {
        let (_, index, transformer) = connected_transformer().await;
        index.upsert("stale-item", vec![0.95, 0.05]).unwrap();

        let out = transformer.preprocess(&request("c-1")).await.unwrap();
        let inputs = &out.inputs[0];

        assert!(!inputs.article_ids.contains(&"stale-item".to_string()));
        assert_eq!(inputs.article_ids.len(), 3);
    }

    #[tokio::test]
    async fn test_unknown_customer_is_an_error() {
        let (_, _, transformer) = connected_transformer().await;

        let err = transformer.preprocess(&request("c-404")).await.unwrap_err();
        assert!(matches!(err, TransformerError::UnknownCustomer(id) if id == "c-404"));
    }

    #[tokio::test]
    async fn test_empty_request_is_an_error() {
        let (_, _, transformer) = connected_transformer().await;

        let empty = InferenceRequest { instances: vec![] };
        let err = transformer.preprocess(&empty).await.unwrap_err();
        assert!(matches!(err, TransformerError::EmptyRequest));
    }

    #[tokio::test]
    async fn test_unassembled_schema_column_is_an_error() {
        let store = Arc::new(InMemoryFeatureStore::new());
        let index = Arc::new(InMemoryVectorIndex::new(2));
        let registry = Arc::new(InMemoryModelRegistry::new());

        let articles = InMemoryFeatureView::new("articles", names(&["article_id"]));
        articles.insert("item-a", vec!["item-a".into()]).unwrap();
        store.register_view(1, articles).unwrap();

        let customers = InMemoryFeatureView::new("customers", names(&["customer_id", "age"]));
        customers
            .insert("c-1", vec!["c-1".into(), 24i64.into()])
            .unwrap();
        store.register_view(1, customers).unwrap();

        index.upsert("item-a", vec![1.0, 0.0]).unwrap();
        registry
            .register(
                "ranking_model",
                1,
                ModelSchema::new(vec![ColumnSpec::new("garment_group", "string")]),
            )
            .unwrap();

        let transformer = RankingTransformer::connect(
            store,
            index,
            registry,
            TransformerConfig::default(),
        )
        .await
        .unwrap();

        let err = transformer.preprocess(&request("c-1")).await.unwrap_err();
        assert!(matches!(err, TransformerError::MissingFeature(name) if name == "garment_group"));
    }

    #[tokio::test]
    async fn test_missing_view_fails_connect() {
        let store = Arc::new(InMemoryFeatureStore::new());
        let index = Arc::new(InMemoryVectorIndex::new(2));
        let registry = Arc::new(InMemoryModelRegistry::new());

        let err = RankingTransformer::connect(store, index, registry, TransformerConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, TransformerError::Store(_)));
    }

    #[tokio::test]
    async fn test_postprocess_is_identity() {
        let (_, _, transformer) = connected_transformer().await;

        let outputs = serde_json::json!({"predictions": [[0.1, 0.9]]});
        assert_eq!(transformer.postprocess(outputs.clone()), outputs);
    }
}
