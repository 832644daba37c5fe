//! # schemefit
//!
//! Matches a citizen profile against a catalog of government welfare
//! schemes and ranks the schemes by how likely the applicant is to qualify.
//!
//! Ranking blends three TF-IDF spaces (eligibility, benefits and category
//! text, weighted 0.60/0.25/0.15), applies age and income boosts keyed on
//! the eligibility text, and maps the result to a 35-98 confidence.
//!
//! ## Quick Start
//!
//! ### From the command line
//!
//! ```bash
//! schemefit build --catalog schemes.csv --model-dir ./model
//! schemefit match --model-dir ./model --age 67 --income 80000 --occupation retired
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use schemefit::prelude::*;
//!
//! let catalog = Catalog::from_path("schemes.csv").unwrap();
//! let engine = RankingEngine::new(catalog).unwrap();
//!
//! let profile = UserProfile {
//!     age: 67,
//!     income: 80_000.0,
//!     occupation: "Retired".to_string(),
//!     ..Default::default()
//! };
//! for result in engine.rank(&profile, 10, 0.0) {
//!     println!("{} {:.1}% {}", result.scheme_id, result.probability, result.scheme_name);
//! }
//! ```
//!
//! ## Crate Structure
//!
//! - [`schemefit-core`](schemefit_core) - Catalog, normalization, TF-IDF vector spaces
//! - [`schemefit-ranking`](schemefit_ranking) - Profile encoding, boosts, confidence, ranking
//! - [`schemefit-storage`](schemefit_storage) - Fitted model persistence

pub mod config;

// Re-export core types
pub use schemefit_core::{
    Catalog, CatalogStats, Error, IndexConfig, Level, Normalize, NormalizedText, Result, Scheme,
    SchemeId, SchemeIndex, SchemeRecord, TfidfConfig,
};

// Re-export ranking
pub use schemefit_ranking::{
    recommend, KeywordTables, MatchQuality, MatchResult, MatchSummary, RankingConfig,
    RankingEngine, Recommendation, RecommendationPolicy, ScoreBreakdown, SocialCategory,
    UserProfile,
};

// Re-export storage
pub use schemefit_storage::{ModelMetadata, ModelStore, StorageError};

pub use config::AppConfig;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        recommend, AppConfig, Catalog, IndexConfig, MatchResult, MatchSummary, ModelStore,
        RankingConfig, RankingEngine, RecommendationPolicy, SchemeId, SocialCategory, UserProfile,
    };
}
