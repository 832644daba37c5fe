//! Profile encoder
//!
//! Turns a structured [`UserProfile`] into a keyword pseudo-document that
//! lives in the same vocabulary as catalog eligibility text. Repetition is
//! how the encoder weights a signal: a bracket repeated six times outweighs
//! one repeated twice once TF-IDF is applied.

use crate::keywords::KeywordTables;
use crate::profile::UserProfile;
use schemefit_core::{normalize, NormalizedText};

#[derive(Debug, Clone, Default)]
pub struct ProfileEncoder {
    tables: KeywordTables,
}

impl ProfileEncoder {
    pub fn new(tables: KeywordTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &KeywordTables {
        &self.tables
    }

    /// Keyword sequence before normalization, in contribution order
    pub fn keywords<'a>(&'a self, profile: &'a UserProfile, scratch: &'a mut Scratch) -> Vec<&'a str> {
        let t = &self.tables;
        scratch.fill(profile);
        let scratch: &'a Scratch = scratch;
        let mut out: Vec<&'a str> = Vec::new();

        if let Some(bracket) = t.age.iter().find(|b| b.contains(f64::from(profile.age))) {
            bracket.burst.extend_into(&mut out);
        }
        if let Some(bracket) = t.income.iter().find(|b| b.contains(profile.income)) {
            bracket.burst.extend_into(&mut out);
        }

        out.extend(std::iter::repeat(scratch.occupation.as_str()).take(t.occupation_repeat));
        for entry in t.occupation.iter().filter(|e| scratch.occupation.contains(e.tag.as_str())) {
            entry.burst.extend_into(&mut out);
        }

        out.extend(std::iter::repeat(scratch.category_lower.as_str()).take(t.category_repeat));
        if let Some(entry) = t.category.iter().find(|e| e.tag == scratch.category_tag) {
            entry.burst.extend_into(&mut out);
        }

        out.extend(std::iter::repeat(scratch.education.as_str()).take(t.education_repeat));
        for entry in t.education.iter().filter(|e| scratch.education.contains(e.tag.as_str())) {
            entry.burst.extend_into(&mut out);
        }

        for _ in 0..t.location_repeat {
            out.push(profile.location.as_str());
            out.push(scratch.location_lower.as_str());
            out.extend(t.location_words.iter().map(String::as_str));
        }

        let family = &t.family;
        if profile.family_size > family.large_above {
            family.large.extend_into(&mut out);
        } else if profile.family_size > family.household_above {
            family.household.extend_into(&mut out);
        }

        let exp = &t.experience;
        let years = profile.years_experience;
        if years == 0 {
            exp.fresher.extend_into(&mut out);
        } else if years < exp.junior_below {
            exp.junior.extend_into(&mut out);
        } else if years < exp.experienced_below {
            exp.experienced.extend_into(&mut out);
        } else {
            exp.senior.extend_into(&mut out);
        }

        out
    }

    /// Encode a profile into a normalized pseudo-document
    pub fn encode(&self, profile: &UserProfile) -> NormalizedText {
        let mut scratch = Scratch::default();
        let document = self.keywords(profile, &mut scratch).join(" ");
        normalize(&document)
    }
}

/// Lowercased profile values the keyword sequence borrows from
#[derive(Debug, Default)]
pub struct Scratch {
    occupation: String,
    category_tag: String,
    category_lower: String,
    education: String,
    location_lower: String,
}

impl Scratch {
    fn fill(&mut self, profile: &UserProfile) {
        self.occupation = profile.occupation.to_lowercase();
        self.category_tag = profile.category.tag();
        self.category_lower = self.category_tag.to_lowercase();
        self.education = profile.education.to_lowercase();
        self.location_lower = profile.location.to_lowercase();
    }
}
