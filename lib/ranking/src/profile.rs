//! Applicant profile as submitted by callers.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Social category of the applicant. Parsing ignores case; values outside
/// the known set are kept verbatim in [`SocialCategory::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SocialCategory {
    #[default]
    General,
    SC,
    ST,
    OBC,
    Women,
    Minority,
    Other(String),
}

impl SocialCategory {
    /// Upper-case tag used to look up category keywords
    pub fn tag(&self) -> String {
        match self {
            SocialCategory::General => "GENERAL".to_string(),
            SocialCategory::SC => "SC".to_string(),
            SocialCategory::ST => "ST".to_string(),
            SocialCategory::OBC => "OBC".to_string(),
            SocialCategory::Women => "WOMEN".to_string(),
            SocialCategory::Minority => "MINORITY".to_string(),
            SocialCategory::Other(value) => value.to_uppercase(),
        }
    }
}

impl FromStr for SocialCategory {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let category = match s.trim().to_uppercase().as_str() {
            "GENERAL" => SocialCategory::General,
            "SC" => SocialCategory::SC,
            "ST" => SocialCategory::ST,
            "OBC" => SocialCategory::OBC,
            "WOMEN" => SocialCategory::Women,
            "MINORITY" => SocialCategory::Minority,
            _ => SocialCategory::Other(s.trim().to_string()),
        };
        Ok(category)
    }
}

impl From<String> for SocialCategory {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(category) => category,
            Err(never) => match never {},
        }
    }
}

impl From<SocialCategory> for String {
    fn from(value: SocialCategory) -> Self {
        value.to_string()
    }
}

impl fmt::Display for SocialCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SocialCategory::Other(value) => f.write_str(value),
            known => f.write_str(&known.tag()),
        }
    }
}

/// Applicant profile. Every field is required when deserializing;
/// [`Default`] is only a starting point for struct-update syntax.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub age: u32,
    /// Annual income in rupees
    pub income: f64,
    pub occupation: String,
    pub category: SocialCategory,
    pub location: String,
    pub education: String,
    pub family_size: u32,
    pub years_experience: u32,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            age: 0,
            income: 0.0,
            occupation: String::new(),
            category: SocialCategory::General,
            location: String::new(),
            education: String::new(),
            family_size: 1,
            years_experience: 0,
        }
    }
}
