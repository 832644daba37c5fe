//! # schemefit Ranking
//!
//! Profile-to-scheme ranking on top of the schemefit core vector spaces.
//!
//! ## Features
//!
//! - **Profile Encoding**: Structured profiles expanded into keyword pseudo-documents
//! - **Weighted Ensemble**: Eligibility, benefits and category similarities blended 0.60/0.25/0.15
//! - **Rule-based Boosts**: Age and income multipliers keyed on eligibility text
//! - **Confidence Scaling**: Piecewise-linear bands mapped to a 35-98 range
//! - **Explainability**: Per-space score breakdown for every result
//!
//! ## Example
//!
//! ```rust
//! use schemefit_core::{Catalog, SchemeRecord};
//! use schemefit_ranking::{RankingEngine, UserProfile};
//!
//! let catalog = Catalog::from_schemes(vec![
//!     SchemeRecord {
//!         name: "Old Age Pension".to_string(),
//!         eligibility: "Elderly persons above 60 years".to_string(),
//!         benefits: "Monthly pension".to_string(),
//!         ..Default::default()
//!     },
//!     SchemeRecord {
//!         name: "Kisan Credit".to_string(),
//!         eligibility: "Farmers with cultivable land".to_string(),
//!         benefits: "Crop loan".to_string(),
//!         ..Default::default()
//!     },
//! ])
//! .unwrap();
//!
//! let engine = RankingEngine::new(catalog).unwrap();
//! let profile = UserProfile { age: 67, ..Default::default() };
//! let results = engine.rank(&profile, 5, 0.0);
//! assert_eq!(results[0].scheme_name, "Old Age Pension");
//! ```

pub mod boost;
pub mod confidence;
pub mod config;
pub mod encoder;
pub mod engine;
pub mod error;
pub mod explain;
pub mod keywords;
pub mod policy;
pub mod profile;

pub use confidence::MatchQuality;
pub use config::{
    AgeBoost, ConfidenceBand, ConfidenceScale, EnsembleWeights, IncomeBoost, RankingConfig,
    Thresholds,
};
pub use encoder::ProfileEncoder;
pub use engine::RankingEngine;
pub use error::{ConfigError, Error, Result};
pub use explain::{MatchResult, MatchSummary, ScoreBreakdown};
pub use keywords::{Bracket, KeywordBurst, KeywordTables, TaggedBurst};
pub use policy::{recommend, Recommendation, RecommendationPolicy};
pub use profile::{SocialCategory, UserProfile};
