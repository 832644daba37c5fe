//! # schemefit Core
//!
//! Core library for the schemefit scheme matcher.
//!
//! This crate provides the catalog and the text machinery the ranking engine
//! is built on:
//!
//! - [`Catalog`] - Scheme catalog loaded from CSV, filtered and normalized
//! - [`normalize`](normalize()) - Shared text pipeline with abbreviation expansion
//! - [`TfidfVectorizer`] - scikit-learn compatible TF-IDF
//! - [`VectorSpace`] / [`SchemeIndex`] - Fitted spaces, one row per scheme
//! - [`SparseVector`] - Sparse term-weight vector with cosine similarity
//! - [`CatalogStats`] - Descriptive statistics over a catalog
//!
//! ## Example
//!
//! ```rust
//! use schemefit_core::{Catalog, IndexConfig, Normalize, SchemeIndex, SchemeRecord};
//!
//! let catalog = Catalog::from_schemes(vec![
//!     SchemeRecord {
//!         name: "Old Age Pension".to_string(),
//!         eligibility: "Elderly persons above 60 years".to_string(),
//!         benefits: "Monthly pension".to_string(),
//!         category: "Social welfare".to_string(),
//!         ..Default::default()
//!     },
//!     SchemeRecord {
//!         name: "Kisan Credit".to_string(),
//!         eligibility: "Farmers with cultivable land".to_string(),
//!         benefits: "Crop loan".to_string(),
//!         category: "Agriculture".to_string(),
//!         ..Default::default()
//!     },
//! ])
//! .unwrap();
//!
//! let index = SchemeIndex::build(&catalog, &IndexConfig::default()).unwrap();
//! let sims = index.similarities(&"elderly pension".normalize());
//! assert!(sims.eligibility[0] > sims.eligibility[1]);
//! ```

pub mod catalog;
pub mod error;
pub mod normalize;
pub mod space;
pub mod stats;
pub mod stopwords;
pub mod tfidf;
pub mod vector;

pub use catalog::{Catalog, Level, Scheme, SchemeId, SchemeRecord};
pub use error::{Error, Result};
pub use normalize::{clean, normalize, Normalize, NormalizedText};
pub use space::{IndexConfig, SchemeIndex, SpaceSimilarities, VectorSpace};
pub use stats::{CatalogStats, LengthStats};
pub use tfidf::{StopWords, TfidfConfig, TfidfVectorizer};
pub use vector::SparseVector;
