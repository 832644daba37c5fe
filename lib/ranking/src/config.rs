//! Ranking configuration
//!
//! Ensemble weights, rule-based boosts and the confidence scale. The
//! defaults are the calibrated production values; overrides are validated
//! before an engine accepts them.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Weight of each vector space in the blended score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnsembleWeights {
    pub eligibility: f64,
    pub benefits: f64,
    pub category: f64,
}

impl Default for EnsembleWeights {
    fn default() -> Self {
        Self {
            eligibility: 0.60,
            benefits: 0.25,
            category: 0.15,
        }
    }
}

impl EnsembleWeights {
    #[inline]
    pub fn blend(&self, eligibility: f64, benefits: f64, category: f64) -> f64 {
        eligibility * self.eligibility + benefits * self.benefits + category * self.category
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, weight) in [
            ("eligibility", self.eligibility),
            ("benefits", self.benefits),
            ("category", self.category),
        ] {
            if weight < 0.0 {
                return Err(ConfigError::NegativeWeight(name));
            }
        }

        let sum = self.eligibility + self.benefits + self.category;
        if (sum - 1.0).abs() > 0.001 {
            return Err(ConfigError::WeightSum(sum));
        }
        Ok(())
    }
}

/// Multiplies the score of schemes whose eligibility text mentions any
/// trigger, for applicants aged `min_age..=max_age`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeBoost {
    pub name: String,
    pub min_age: u32,
    /// Inclusive; `None` is unbounded
    pub max_age: Option<u32>,
    pub triggers: Vec<String>,
    pub multiplier: f64,
}

impl AgeBoost {
    fn new(name: &str, min_age: u32, max_age: Option<u32>, triggers: &[&str], multiplier: f64) -> Self {
        Self {
            name: name.to_string(),
            min_age,
            max_age,
            triggers: triggers.iter().map(|t| (*t).to_string()).collect(),
            multiplier,
        }
    }

    #[inline]
    pub fn applies_to(&self, age: u32) -> bool {
        age >= self.min_age && self.max_age.map_or(true, |max| age <= max)
    }
}

/// Applies to applicants earning strictly less than `below`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeBoost {
    pub below: f64,
    pub triggers: Vec<String>,
    pub multiplier: f64,
}

impl Default for IncomeBoost {
    fn default() -> Self {
        Self {
            below: 100_000.0,
            triggers: ["bpl", "poor", "poverty", "low income", "ews"]
                .iter()
                .map(|t| (*t).to_string())
                .collect(),
            multiplier: 1.4,
        }
    }
}

/// Linear map `base + slope * score` used for scores above `above`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceBand {
    pub above: f64,
    pub base: f64,
    pub slope: f64,
}

impl ConfidenceBand {
    pub fn new(above: f64, base: f64, slope: f64) -> Self {
        Self { above, base, slope }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceScale {
    /// Checked in order; the first band whose threshold the score exceeds wins
    pub bands: Vec<ConfidenceBand>,
    /// Scores that clear no band
    pub floor_base: f64,
    pub floor_slope: f64,
    pub min: f64,
    pub max: f64,
}

impl Default for ConfidenceScale {
    fn default() -> Self {
        Self {
            bands: vec![
                ConfidenceBand::new(0.40, 80.0, 30.0),
                ConfidenceBand::new(0.30, 70.0, 35.0),
                ConfidenceBand::new(0.20, 60.0, 40.0),
                ConfidenceBand::new(0.10, 50.0, 50.0),
            ],
            floor_base: 35.0,
            floor_slope: 100.0,
            min: 35.0,
            max: 98.0,
        }
    }
}

impl ConfidenceScale {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bands.windows(2).any(|w| w[0].above <= w[1].above) || self.min > self.max {
            return Err(ConfigError::BandOrder);
        }
        Ok(())
    }
}

/// Confidence cut-offs for the eligibility flag and quality labels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub eligible: f64,
    pub excellent: f64,
    pub very_good: f64,
    pub good: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            eligible: 70.0,
            excellent: 80.0,
            very_good: 70.0,
            good: 60.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    pub weights: EnsembleWeights,
    /// First boost whose age range and triggers both match is applied
    pub age_boosts: Vec<AgeBoost>,
    pub income_boost: IncomeBoost,
    pub confidence: ConfidenceScale,
    pub thresholds: Thresholds,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            weights: EnsembleWeights::default(),
            age_boosts: vec![
                AgeBoost::new("senior", 60, None, &["60", "senior", "elderly", "pension", "old"], 1.5),
                AgeBoost::new("minor", 0, Some(17), &["minor", "child", "below 18", "under 18"], 1.5),
                AgeBoost::new("youth", 18, Some(35), &["youth", "young", "18-35", "student"], 1.3),
            ],
            income_boost: IncomeBoost::default(),
            confidence: ConfidenceScale::default(),
            thresholds: Thresholds::default(),
        }
    }
}

impl RankingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.weights.validate()?;

        for boost in &self.age_boosts {
            if boost.triggers.is_empty() {
                return Err(ConfigError::EmptyTriggers(boost.name.clone()));
            }
            if boost.multiplier <= 0.0 {
                return Err(ConfigError::NonPositiveMultiplier(boost.name.clone()));
            }
        }
        if self.income_boost.triggers.is_empty() {
            return Err(ConfigError::EmptyTriggers("income".to_string()));
        }
        if self.income_boost.multiplier <= 0.0 {
            return Err(ConfigError::NonPositiveMultiplier("income".to_string()));
        }

        self.confidence.validate()
    }
}
