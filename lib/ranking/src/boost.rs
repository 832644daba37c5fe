// Rule-based score multipliers driven by the applicant's age and income.
use crate::config::RankingConfig;
use crate::profile::UserProfile;

#[inline]
fn mentions_any(text: &str, triggers: &[String]) -> bool {
    triggers.iter().any(|t| text.contains(t.as_str()))
}

/// Combined multiplier for one scheme. `eligibility_lower` is the scheme's
/// raw eligibility text, lowercased.
///
/// At most one age boost applies: the first whose age range holds and
/// whose triggers occur in the text. The income boost stacks on top.
pub fn multiplier(config: &RankingConfig, profile: &UserProfile, eligibility_lower: &str) -> f64 {
    let mut factor = config
        .age_boosts
        .iter()
        .find(|b| b.applies_to(profile.age) && mentions_any(eligibility_lower, &b.triggers))
        .map_or(1.0, |b| b.multiplier);

    let income = &config.income_boost;
    if profile.income < income.below && mentions_any(eligibility_lower, &income.triggers) {
        factor *= income.multiplier;
    }

    factor
}
