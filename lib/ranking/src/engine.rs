//! Ranking engine
//!
//! Scores every scheme in the catalog against an encoded profile, applies
//! boosts, and converts the top scores into confidence-labelled results.
//! The engine is immutable once built and can be shared across threads.

use crate::boost;
use crate::confidence::{confidence, MatchQuality};
use crate::config::RankingConfig;
use crate::encoder::ProfileEncoder;
use crate::error::Result;
use crate::explain::{MatchResult, ScoreBreakdown};
use crate::keywords::KeywordTables;
use crate::profile::UserProfile;
use schemefit_core::{Catalog, IndexConfig, Scheme, SchemeId, SchemeIndex};
use std::cmp::Ordering;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct RankingEngine {
    catalog: Catalog,
    index: SchemeIndex,
    encoder: ProfileEncoder,
    config: RankingConfig,
}

impl RankingEngine {
    /// Build with the default index, keyword tables and ranking config
    pub fn new(catalog: Catalog) -> Result<Self> {
        Self::build(
            catalog,
            &IndexConfig::default(),
            KeywordTables::default(),
            RankingConfig::default(),
        )
    }

    /// Fit the vector spaces over `catalog` and assemble an engine
    pub fn build(
        catalog: Catalog,
        index_config: &IndexConfig,
        keywords: KeywordTables,
        config: RankingConfig,
    ) -> Result<Self> {
        config.validate()?;
        keywords.validate()?;
        let index = SchemeIndex::build(&catalog, index_config)?;
        Self::from_parts(catalog, index, keywords, config)
    }

    /// Assemble from an already fitted index, e.g. one loaded from disk
    pub fn from_parts(
        catalog: Catalog,
        index: SchemeIndex,
        keywords: KeywordTables,
        config: RankingConfig,
    ) -> Result<Self> {
        config.validate()?;
        keywords.validate()?;
        index.check_rows(catalog.len())?;

        info!(
            "Ranking engine ready: {} schemes, vocabulary {}/{}/{}",
            catalog.len(),
            index.eligibility().vocabulary_len(),
            index.benefits().vocabulary_len(),
            index.category().vocabulary_len()
        );

        Ok(Self {
            catalog,
            index,
            encoder: ProfileEncoder::new(keywords),
            config,
        })
    }

    /// Score breakdown for every scheme, indexed by [`SchemeId`]
    pub fn score_all(&self, profile: &UserProfile) -> Vec<ScoreBreakdown> {
        let document = self.encoder.encode(profile);
        let sims = self.index.similarities(&document);
        let weights = &self.config.weights;

        self.catalog
            .iter()
            .enumerate()
            .map(|(i, scheme)| {
                let (eligibility, benefits, category) =
                    (sims.eligibility[i], sims.benefits[i], sims.category[i]);
                ScoreBreakdown {
                    eligibility,
                    benefits,
                    category,
                    blended: weights.blend(eligibility, benefits, category),
                    boost: boost::multiplier(&self.config, profile, &scheme.eligibility_lower),
                }
            })
            .collect()
    }

    /// Rank schemes for `profile`.
    ///
    /// Takes the `top_n` highest scores (ties keep catalog order), then drops
    /// results below `min_confidence` when it is positive.
    pub fn rank(&self, profile: &UserProfile, top_n: usize, min_confidence: f64) -> Vec<MatchResult> {
        if top_n == 0 {
            return Vec::new();
        }

        let breakdowns = self.score_all(profile);
        let scores: Vec<f64> = breakdowns.iter().map(ScoreBreakdown::score).collect();

        let mut order: Vec<usize> = (0..scores.len()).collect();
        order.sort_by(|&a, &b| scores[b].partial_cmp(&scores[a]).unwrap_or(Ordering::Equal));
        order.truncate(top_n);

        log_distribution(&order, &scores, top_n);

        let thresholds = &self.config.thresholds;
        let mut results: Vec<MatchResult> = order
            .into_iter()
            .map(|i| {
                let probability = confidence(&self.config.confidence, scores[i]);
                MatchResult::new(
                    &self.catalog.schemes()[i],
                    breakdowns[i],
                    probability,
                    probability >= thresholds.eligible,
                    MatchQuality::from_confidence(thresholds, probability),
                )
            })
            .collect();

        if min_confidence > 0.0 {
            results.retain(|r| r.probability >= min_confidence);
            debug!(
                "Kept {} schemes with confidence >= {}",
                results.len(),
                min_confidence
            );
        }

        results
    }

    #[inline]
    pub fn total_schemes(&self) -> usize {
        self.catalog.len()
    }

    #[inline]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[inline]
    pub fn scheme(&self, id: SchemeId) -> Option<&Scheme> {
        self.catalog.get(id)
    }

    #[inline]
    pub fn index(&self) -> &SchemeIndex {
        &self.index
    }

    #[inline]
    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    #[inline]
    pub fn keywords(&self) -> &KeywordTables {
        self.encoder.tables()
    }

    #[inline]
    pub fn encoder(&self) -> &ProfileEncoder {
        &self.encoder
    }
}

fn log_distribution(order: &[usize], scores: &[f64], top_n: usize) {
    let (Some(&first), Some(&last)) = (order.first(), order.last()) else {
        return;
    };
    let mean = order.iter().map(|&i| scores[i]).sum::<f64>() / order.len() as f64;
    debug!(
        "Score distribution (top {}): highest {:.4}, lowest {:.4}, mean {:.4}",
        top_n, scores[first], scores[last], mean
    );
}
