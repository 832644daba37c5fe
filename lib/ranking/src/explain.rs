//! Explainability for ranked schemes
//!
//! Output structures that carry the per-space similarities behind each
//! score, plus summary counts for a whole result list.

use crate::confidence::MatchQuality;
use schemefit_core::{Level, Scheme, SchemeId};
use serde::{Serialize, Serializer};

pub const NAME_LIMIT: usize = 100;
pub const TEXT_LIMIT: usize = 300;

/// Per-space cosine similarities and how they combined
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub eligibility: f64,
    pub benefits: f64,
    pub category: f64,
    /// Weighted blend before boosts
    pub blended: f64,
    /// Product of the boosts that fired, 1.0 when none
    pub boost: f64,
}

impl ScoreBreakdown {
    #[inline]
    pub fn score(&self) -> f64 {
        self.blended * self.boost
    }

    /// Space that contributed most to the blend, by raw similarity
    pub fn dominant_space(&self) -> &'static str {
        let mut best = ("eligibility", self.eligibility);
        for candidate in [("benefits", self.benefits), ("category", self.category)] {
            if candidate.1 > best.1 {
                best = candidate;
            }
        }
        best.0
    }
}

/// A scheme as shown to the applicant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    #[serde(serialize_with = "serialize_display")]
    pub scheme_id: SchemeId,
    pub scheme_name: String,
    pub slug: String,
    pub details: String,
    pub benefits: String,
    pub eligibility: String,
    pub level: Level,
    pub category: String,
    /// Confidence in percent
    pub probability: f64,
    pub eligible: bool,
    /// Blended and boosted similarity the ranking sorted on
    pub similarity_score: f64,
    pub match_quality: MatchQuality,
    /// Space with the highest raw similarity for this scheme
    pub dominant_space: &'static str,
    pub breakdown: ScoreBreakdown,
}

impl MatchResult {
    pub fn new(
        scheme: &Scheme,
        breakdown: ScoreBreakdown,
        probability: f64,
        eligible: bool,
        match_quality: MatchQuality,
    ) -> Self {
        Self {
            scheme_id: scheme.id,
            scheme_name: scheme.name.chars().take(NAME_LIMIT).collect(),
            slug: scheme.slug.clone(),
            details: preview(&scheme.details),
            benefits: preview(&scheme.benefits),
            eligibility: preview(&scheme.eligibility),
            level: scheme.level,
            category: scheme.category.clone(),
            probability,
            eligible,
            similarity_score: breakdown.score(),
            match_quality,
            dominant_space: breakdown.dominant_space(),
            breakdown,
        }
    }
}

fn serialize_display<T: std::fmt::Display, S: Serializer>(value: &T, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(value)
}

/// First [`TEXT_LIMIT`] chars, with `...` appended when anything was cut
pub fn preview(text: &str) -> String {
    match text.char_indices().nth(TEXT_LIMIT) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Summary statistics for a result list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchSummary {
    pub results_count: usize,
    pub eligible_count: usize,
    /// Mean probability, one decimal place
    pub average_confidence: f64,
    pub central_count: usize,
    /// Everything not central, including unspecified levels
    pub state_count: usize,
    pub total_schemes: usize,
}

impl MatchSummary {
    pub fn compute(results: &[MatchResult], total_schemes: usize) -> Self {
        let results_count = results.len();
        let average_confidence = if results.is_empty() {
            0.0
        } else {
            let mean = results.iter().map(|r| r.probability).sum::<f64>() / results_count as f64;
            (mean * 10.0).round() / 10.0
        };
        let central_count = results.iter().filter(|r| r.level == Level::Central).count();

        Self {
            results_count,
            eligible_count: results.iter().filter(|r| r.eligible).count(),
            average_confidence,
            central_count,
            state_count: results_count - central_count,
            total_schemes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemefit_core::{Catalog, SchemeRecord};

    fn scheme(name: &str, details: &str, level: &str) -> Scheme {
        let catalog = Catalog::from_schemes(vec![SchemeRecord {
            name: name.to_string(),
            details: details.to_string(),
            level: level.to_string(),
            eligibility: "farmers".to_string(),
            ..Default::default()
        }])
        .unwrap();
        catalog.schemes()[0].clone()
    }

    fn breakdown() -> ScoreBreakdown {
        ScoreBreakdown {
            eligibility: 0.5,
            benefits: 0.1,
            category: 0.0,
            blended: 0.325,
            boost: 1.5,
        }
    }

    fn result(probability: f64, level: &str) -> MatchResult {
        MatchResult::new(
            &scheme("S", "", level),
            breakdown(),
            probability,
            probability >= 70.0,
            MatchQuality::Good,
        )
    }

    #[test]
    fn test_preview_truncation() {
        let exact = "x".repeat(300);
        assert_eq!(preview(&exact), exact);

        let long = "é".repeat(301);
        let cut = preview(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 303);
    }

    #[test]
    fn test_name_hard_cut() {
        let name = "n".repeat(150);
        let r = MatchResult::new(&scheme(&name, "", "Central"), breakdown(), 50.0, false, MatchQuality::Fair);
        assert_eq!(r.scheme_name.chars().count(), 100);
        assert!(!r.scheme_name.ends_with("..."));
    }

    #[test]
    fn test_result_serialization() {
        let r = result(75.0, "Central");
        assert!((r.similarity_score - 0.4875).abs() < 1e-12);

        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["scheme_id"], "SCH0000");
        assert_eq!(json["level"], "Central");
        assert_eq!(json["match_quality"], "Good");
        assert!(json["breakdown"]["eligibility"].is_number());
        assert_eq!(json["dominant_space"], "eligibility");
    }

    #[test]
    fn test_dominant_space() {
        assert_eq!(breakdown().dominant_space(), "eligibility");
        let b = ScoreBreakdown {
            category: 0.9,
            ..breakdown()
        };
        assert_eq!(b.dominant_space(), "category");
    }

    #[test]
    fn test_summary() {
        let results = vec![result(80.0, "Central"), result(65.0, "State"), result(70.04, "")];
        let summary = MatchSummary::compute(&results, 3400);
        assert_eq!(summary.results_count, 3);
        assert_eq!(summary.eligible_count, 2);
        assert_eq!(summary.average_confidence, 71.7);
        assert_eq!(summary.central_count, 1);
        assert_eq!(summary.state_count, 2);
        assert_eq!(summary.total_schemes, 3400);
    }

    #[test]
    fn test_empty_summary() {
        let summary = MatchSummary::compute(&[], 10);
        assert_eq!(summary.results_count, 0);
        assert_eq!(summary.average_confidence, 0.0);
    }
}
