// Piecewise-linear mapping from boosted similarity to a 35-98 confidence.
use crate::config::{ConfidenceScale, Thresholds};
use serde::{Deserialize, Serialize};
use std::fmt;

pub fn confidence(scale: &ConfidenceScale, score: f64) -> f64 {
    let raw = scale
        .bands
        .iter()
        .find(|band| score > band.above)
        .map_or(scale.floor_base + scale.floor_slope * score, |band| {
            band.base + band.slope * score
        });
    raw.clamp(scale.min, scale.max)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchQuality {
    Excellent,
    #[serde(rename = "Very Good")]
    VeryGood,
    Good,
    Fair,
}

impl MatchQuality {
    pub fn from_confidence(thresholds: &Thresholds, confidence: f64) -> Self {
        if confidence >= thresholds.excellent {
            MatchQuality::Excellent
        } else if confidence >= thresholds.very_good {
            MatchQuality::VeryGood
        } else if confidence >= thresholds.good {
            MatchQuality::Good
        } else {
            MatchQuality::Fair
        }
    }
}

impl fmt::Display for MatchQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MatchQuality::Excellent => "Excellent",
            MatchQuality::VeryGood => "Very Good",
            MatchQuality::Good => "Good",
            MatchQuality::Fair => "Fair",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_bands() {
        let scale = ConfidenceScale::default();
        assert!(approx(confidence(&scale, 0.5), 95.0));
        assert!(approx(confidence(&scale, 0.35), 82.25));
        assert!(approx(confidence(&scale, 0.25), 70.0));
        assert!(approx(confidence(&scale, 0.15), 57.5));
        assert!(approx(confidence(&scale, 0.05), 40.0));
    }

    #[test]
    fn test_band_edges_use_lower_band() {
        let scale = ConfidenceScale::default();
        // 0.40 is not above 0.40
        assert!(approx(confidence(&scale, 0.40), 70.0 + 35.0 * 0.40));
        assert!(approx(confidence(&scale, 0.10), 35.0 + 100.0 * 0.10));
    }

    #[test]
    fn test_clamped() {
        let scale = ConfidenceScale::default();
        assert_eq!(confidence(&scale, 0.0), 35.0);
        assert_eq!(confidence(&scale, 1.2), 98.0);
        assert_eq!(confidence(&scale, 5.0), 98.0);
    }

    #[test]
    fn test_quality_labels() {
        let t = Thresholds::default();
        assert_eq!(MatchQuality::from_confidence(&t, 80.0), MatchQuality::Excellent);
        assert_eq!(MatchQuality::from_confidence(&t, 79.9), MatchQuality::VeryGood);
        assert_eq!(MatchQuality::from_confidence(&t, 60.0), MatchQuality::Good);
        assert_eq!(MatchQuality::from_confidence(&t, 59.9), MatchQuality::Fair);
    }

    #[test]
    fn test_quality_serializes_with_space() {
        assert_eq!(serde_json::to_string(&MatchQuality::VeryGood).unwrap(), "\"Very Good\"");
        assert_eq!(MatchQuality::VeryGood.to_string(), "Very Good");
    }
}
