// Caller-side retry: when a strict query finds nothing, fall back to a
// looser one so the applicant always sees something.
use crate::engine::RankingEngine;
use crate::explain::{MatchResult, MatchSummary};
use crate::profile::UserProfile;
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationPolicy {
    pub primary_top_n: usize,
    pub primary_min_confidence: f64,
    pub fallback_top_n: usize,
    pub fallback_min_confidence: f64,
}

impl Default for RecommendationPolicy {
    fn default() -> Self {
        Self {
            primary_top_n: 500,
            primary_min_confidence: 60.0,
            fallback_top_n: 10,
            fallback_min_confidence: 50.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub results: Vec<MatchResult>,
    pub summary: MatchSummary,
    pub used_fallback: bool,
}

pub fn recommend(
    engine: &RankingEngine,
    profile: &UserProfile,
    policy: &RecommendationPolicy,
) -> Recommendation {
    let mut results = engine.rank(profile, policy.primary_top_n, policy.primary_min_confidence);
    let used_fallback = results.is_empty();

    if used_fallback {
        warn!(
            "No schemes at confidence >= {}; retrying with top {} at >= {}",
            policy.primary_min_confidence, policy.fallback_top_n, policy.fallback_min_confidence
        );
        results = engine.rank(profile, policy.fallback_top_n, policy.fallback_min_confidence);
    }

    let summary = MatchSummary::compute(&results, engine.total_schemes());
    Recommendation {
        results,
        summary,
        used_fallback,
    }
}
