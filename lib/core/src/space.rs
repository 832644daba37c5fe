//! Fitted TF-IDF spaces over the catalog.
//!
//! A [`VectorSpace`] holds one L2-normalised row per scheme, row `i` being
//! scheme `SchemeId(i)`. [`SchemeIndex`] bundles the eligibility, benefits
//! and category spaces the ranking engine blends.

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::normalize::NormalizedText;
use crate::tfidf::{analyze, StopWords, TfidfConfig, TfidfVectorizer};
use crate::vector::SparseVector;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorSpace {
    name: String,
    vectorizer: TfidfVectorizer,
    rows: Vec<SparseVector>,
}

impl VectorSpace {
    /// Fit a space over `documents`.
    ///
    /// A corpus in which no document yields a single token (say, every
    /// category cell blank) becomes an empty space whose rows are all zero
    /// vectors. Any other corpus that leaves no terms after pruning is an
    /// [`Error::EmptyVocabulary`].
    pub fn fit<S: AsRef<str> + Sync>(
        name: impl Into<String>,
        config: TfidfConfig,
        documents: &[S],
    ) -> Result<Self> {
        let name = name.into();

        let all_blank = !documents.is_empty()
            && documents
                .iter()
                .all(|doc| analyze(&config, doc.as_ref()).is_empty());
        if all_blank {
            config.validate()?;
            warn!(
                "Space '{}' has no terms in any of {} documents; all similarities will be 0",
                name,
                documents.len()
            );
            return Ok(Self {
                name,
                vectorizer: TfidfVectorizer::empty(config),
                rows: vec![SparseVector::empty(); documents.len()],
            });
        }

        let (vectorizer, rows) = TfidfVectorizer::fit_transform(config, documents)?;
        info!(
            "Fitted space '{}': {} documents, {} terms",
            name,
            rows.len(),
            vectorizer.vocabulary_len()
        );

        Ok(Self {
            name,
            vectorizer,
            rows,
        })
    }

    #[inline]
    pub fn transform(&self, text: &NormalizedText) -> SparseVector {
        self.vectorizer.transform(text.as_str())
    }

    /// Cosine similarity of `query` against every row, in row order.
    pub fn similarities(&self, query: &SparseVector) -> Vec<f64> {
        if query.is_empty() {
            return vec![0.0; self.rows.len()];
        }
        self.rows
            .par_iter()
            .map(|row| row.cosine_similarity(query))
            .collect()
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn vocabulary_len(&self) -> usize {
        self.vectorizer.vocabulary_len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    pub eligibility: TfidfConfig,
    pub benefits: TfidfConfig,
    pub category: TfidfConfig,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            eligibility: TfidfConfig {
                max_features: Some(1500),
                ngram_range: (1, 4),
                max_df: 0.85,
                min_df: 1,
                sublinear_tf: true,
                stop_words: StopWords::English,
            },
            benefits: TfidfConfig {
                max_features: Some(800),
                ngram_range: (1, 3),
                max_df: 1.0,
                min_df: 1,
                sublinear_tf: true,
                stop_words: StopWords::English,
            },
            category: TfidfConfig {
                max_features: Some(300),
                ngram_range: (1, 2),
                max_df: 1.0,
                min_df: 1,
                sublinear_tf: true,
                stop_words: StopWords::None,
            },
        }
    }
}

/// Similarities of one query against every scheme, per space.
#[derive(Debug, Clone, PartialEq)]
pub struct SpaceSimilarities {
    pub eligibility: Vec<f64>,
    pub benefits: Vec<f64>,
    pub category: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemeIndex {
    eligibility: VectorSpace,
    benefits: VectorSpace,
    category: VectorSpace,
}

impl SchemeIndex {
    pub fn build(catalog: &Catalog, config: &IndexConfig) -> Result<Self> {
        let eligibility: Vec<&str> = catalog
            .iter()
            .map(|s| s.normalized_eligibility.as_str())
            .collect();
        let benefits: Vec<&str> = catalog
            .iter()
            .map(|s| s.normalized_benefits.as_str())
            .collect();
        let category: Vec<&str> = catalog
            .iter()
            .map(|s| s.normalized_category.as_str())
            .collect();

        Ok(Self {
            eligibility: VectorSpace::fit("eligibility", config.eligibility.clone(), &eligibility)?,
            benefits: VectorSpace::fit("benefits", config.benefits.clone(), &benefits)?,
            category: VectorSpace::fit("category", config.category.clone(), &category)?,
        })
    }

    /// Number of scheme rows; all three spaces agree on it.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.eligibility.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.eligibility.is_empty()
    }

    /// Check that every space has exactly `expected` rows.
    pub fn check_rows(&self, expected: usize) -> Result<()> {
        for space in [&self.eligibility, &self.benefits, &self.category] {
            if space.len() != expected {
                return Err(Error::IndexMismatch {
                    expected,
                    actual: space.len(),
                });
            }
        }
        Ok(())
    }

    pub fn similarities(&self, document: &NormalizedText) -> SpaceSimilarities {
        SpaceSimilarities {
            eligibility: self
                .eligibility
                .similarities(&self.eligibility.transform(document)),
            benefits: self.benefits.similarities(&self.benefits.transform(document)),
            category: self.category.similarities(&self.category.transform(document)),
        }
    }

    #[inline]
    #[must_use]
    pub fn eligibility(&self) -> &VectorSpace {
        &self.eligibility
    }

    #[inline]
    #[must_use]
    pub fn benefits(&self) -> &VectorSpace {
        &self.benefits
    }

    #[inline]
    #[must_use]
    pub fn category(&self) -> &VectorSpace {
        &self.category
    }
}
