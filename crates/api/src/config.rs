//! Service Configuration

use ranking_transformer::TransformerConfig;
use serde::{Deserialize, Serialize};

/// Serving configuration, loadable from `RANKER_`-prefixed environment
/// variables with defaults for local development.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listen address for the HTTP server
    pub listen_addr: String,
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
    /// Candidates to retrieve per request
    pub candidate_count: usize,
    /// Embedding dimension of the candidate index
    pub embedding_dimension: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        let transformer = TransformerConfig::default();
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            articles_view: transformer.articles_view,
            articles_version: transformer.articles_version,
            customers_view: transformer.customers_view,
            customers_version: transformer.customers_version,
            model_name: transformer.model_name,
            model_version: transformer.model_version,
            candidate_count: transformer.candidate_count,
            embedding_dimension: 16,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from the environment over the defaults
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("RANKER").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// The transformer slice of the configuration
    pub fn transformer(&self) -> TransformerConfig {
        TransformerConfig {
            articles_view: self.articles_view.clone(),
            articles_version: self.articles_version,
            customers_view: self.customers_view.clone(),
            customers_version: self.customers_version,
            model_name: self.model_name.clone(),
            model_version: self.model_version,
            candidate_count: self.candidate_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_transformer_defaults() {
        let cfg = ServiceConfig::default();
        assert_eq!(cfg.listen_addr, "0.0.0.0:8080");
        assert_eq!(cfg.articles_view, "articles");
        assert_eq!(cfg.model_name, "ranking_model");
        assert_eq!(cfg.candidate_count, 100);

        let transformer = cfg.transformer();
        assert_eq!(transformer.model_version, 1);
        assert_eq!(transformer.candidate_count, 100);
    }
}
