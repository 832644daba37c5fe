//! Application configuration file.
//!
//! A single JSON document with optional sections; anything left out keeps
//! its default.
//!
//! ```json
//! {
//!   "index":   { "eligibility": { "max_features": 2000 } },
//!   "ranking": { "weights": { "eligibility": 0.7, "benefits": 0.2, "category": 0.1 } },
//!   "policy":  { "fallback_top_n": 20 }
//! }
//! ```

use schemefit_core::{Error, IndexConfig, Result};
use schemefit_ranking::{KeywordTables, RankingConfig, RecommendationPolicy};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub index: IndexConfig,
    pub ranking: RankingConfig,
    pub policy: RecommendationPolicy,
    pub keywords: KeywordTables,
}

impl AppConfig {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| Error::Serialization(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        for tfidf in [&self.index.eligibility, &self.index.benefits, &self.index.category] {
            tfidf.validate()?;
        }
        self.ranking
            .validate()
            .map_err(|e| Error::InvalidConfig(e.to_string()))?;
        self.keywords
            .validate()
            .map_err(|e| Error::InvalidConfig(e.to_string()))
    }
}
