//! Keyword tables the profile encoder expands a profile with.
//!
//! Every rule is plain data so deployments can retune the vocabulary
//! through configuration without touching the encoder.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// A word sequence contributed `repeat` times, as a whole: `[a, b] x 2`
/// yields `a b a b`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordBurst {
    pub words: Vec<String>,
    pub repeat: usize,
}

impl KeywordBurst {
    pub fn new(words: &[&str], repeat: usize) -> Self {
        Self {
            words: words.iter().map(|w| (*w).to_string()).collect(),
            repeat,
        }
    }

    pub fn extend_into<'a>(&'a self, out: &mut Vec<&'a str>) {
        for _ in 0..self.repeat {
            out.extend(self.words.iter().map(String::as_str));
        }
    }
}

/// Half-open numeric range `[min, max)`; `max = None` is unbounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bracket {
    pub min: f64,
    pub max: Option<f64>,
    pub burst: KeywordBurst,
}

impl Bracket {
    pub fn new(min: f64, max: Option<f64>, words: &[&str], repeat: usize) -> Self {
        Self {
            min,
            max,
            burst: KeywordBurst::new(words, repeat),
        }
    }

    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && self.max.map_or(true, |max| value < max)
    }
}

/// A burst keyed by a tag the profile value is matched against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedBurst {
    pub tag: String,
    pub burst: KeywordBurst,
}

impl TaggedBurst {
    pub fn new(tag: &str, words: &[&str], repeat: usize) -> Self {
        Self {
            tag: tag.to_string(),
            burst: KeywordBurst::new(words, repeat),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyRules {
    /// Used when family size is above `large_above`
    pub large_above: u32,
    pub large: KeywordBurst,
    /// Used when family size is above `household_above` but not large
    pub household_above: u32,
    pub household: KeywordBurst,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceRules {
    pub fresher: KeywordBurst,
    /// Below this many years (and above zero)
    pub junior_below: u32,
    pub junior: KeywordBurst,
    pub experienced_below: u32,
    pub experienced: KeywordBurst,
    pub senior: KeywordBurst,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordTables {
    pub age: Vec<Bracket>,
    pub income: Vec<Bracket>,
    pub occupation_repeat: usize,
    /// Every entry whose tag occurs in the lowercase occupation fires, in order
    pub occupation: Vec<TaggedBurst>,
    pub category_repeat: usize,
    /// At most one entry fires: the one whose tag equals the upper-case category
    pub category: Vec<TaggedBurst>,
    pub education_repeat: usize,
    pub education: Vec<TaggedBurst>,
    /// Appended after the location itself and its lowercase form
    pub location_words: Vec<String>,
    pub location_repeat: usize,
    pub family: FamilyRules,
    pub experience: ExperienceRules,
}

impl KeywordTables {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let bursts = self
            .age
            .iter()
            .map(|b| ("age", &b.burst))
            .chain(self.income.iter().map(|b| ("income", &b.burst)))
            .chain(self.occupation.iter().map(|t| (t.tag.as_str(), &t.burst)))
            .chain(self.category.iter().map(|t| (t.tag.as_str(), &t.burst)))
            .chain(self.education.iter().map(|t| (t.tag.as_str(), &t.burst)))
            .chain([
                ("family", &self.family.large),
                ("family", &self.family.household),
                ("experience", &self.experience.fresher),
                ("experience", &self.experience.junior),
                ("experience", &self.experience.experienced),
                ("experience", &self.experience.senior),
            ]);

        for (name, burst) in bursts {
            if burst.repeat == 0 {
                return Err(ConfigError::ZeroRepeat(name.to_string()));
            }
        }
        Ok(())
    }
}

impl Default for KeywordTables {
    fn default() -> Self {
        Self {
            age: vec![
                Bracket::new(
                    0.0,
                    Some(5.0),
                    &["infant", "baby", "toddler", "child", "newborn", "below 5", "under 5"],
                    5,
                ),
                Bracket::new(
                    5.0,
                    Some(14.0),
                    &["child", "minor", "kid", "school student", "primary", "elementary", "below 14"],
                    5,
                ),
                Bracket::new(
                    14.0,
                    Some(18.0),
                    &["minor", "teenager", "adolescent", "school", "secondary", "below 18", "14-18"],
                    5,
                ),
                Bracket::new(
                    18.0,
                    Some(25.0),
                    &[
                        "youth", "young", "student", "college", "university", "undergraduate",
                        "young adult", "scholarship", "education", "training", "skill", "fresher",
                        "entry level", "18-25",
                    ],
                    5,
                ),
                Bracket::new(
                    25.0,
                    Some(35.0),
                    &[
                        "young adult", "youth", "professional", "employee", "entrepreneur",
                        "startup", "career", "job", "employment", "skilled", "25-35",
                        "young professional",
                    ],
                    4,
                ),
                Bracket::new(
                    35.0,
                    Some(45.0),
                    &["adult", "professional", "experienced", "skilled", "employee", "worker", "35-45"],
                    3,
                ),
                Bracket::new(
                    45.0,
                    Some(60.0),
                    &["middle aged", "adult", "experienced", "professional", "senior employee", "45-60"],
                    3,
                ),
                Bracket::new(
                    60.0,
                    None,
                    &[
                        "senior citizen", "elderly", "old age", "aged", "pension", "pensioner",
                        "retired", "above 60", "60 plus", "60 years", "old person", "geriatric",
                        "super senior",
                    ],
                    6,
                ),
            ],
            income: vec![
                Bracket::new(
                    0.0,
                    Some(50_000.0),
                    &[
                        "below poverty line", "bpl", "extremely poor", "very low income",
                        "destitute", "economically weaker section", "ews", "poorest", "needy",
                        "underprivileged",
                    ],
                    6,
                ),
                Bracket::new(
                    50_000.0,
                    Some(100_000.0),
                    &[
                        "low income", "poor", "below poverty", "bpl", "economically weak",
                        "disadvantaged", "lower income", "limited income",
                    ],
                    5,
                ),
                Bracket::new(
                    100_000.0,
                    Some(200_000.0),
                    &[
                        "lower middle income", "modest income", "limited resources",
                        "lower middle class", "economically moderate",
                    ],
                    4,
                ),
                Bracket::new(
                    200_000.0,
                    Some(300_000.0),
                    &["middle income", "middle class", "moderate income", "average income"],
                    3,
                ),
                Bracket::new(
                    300_000.0,
                    Some(500_000.0),
                    &["upper middle income", "comfortable income", "decent income"],
                    2,
                ),
                Bracket::new(
                    500_000.0,
                    None,
                    &["high income", "well off", "affluent", "comfortable"],
                    1,
                ),
            ],
            occupation_repeat: 5,
            occupation: vec![
                TaggedBurst::new(
                    "student",
                    &[
                        "student", "learner", "pupil", "scholar", "studying", "education", "school",
                        "college", "university", "academic", "trainee",
                    ],
                    5,
                ),
                TaggedBurst::new(
                    "farmer",
                    &[
                        "farmer", "agriculture", "farming", "cultivator", "agricultural worker",
                        "rural", "crop", "land", "kisan", "krishi", "farming community", "agrarian",
                    ],
                    5,
                ),
                TaggedBurst::new(
                    "government",
                    &[
                        "government employee", "govt worker", "public sector", "civil servant",
                        "sarkari", "government job", "public service", "govt staff",
                    ],
                    4,
                ),
                TaggedBurst::new(
                    "private",
                    &[
                        "private employee", "private sector", "company", "corporate", "salaried",
                        "employed", "private job", "company employee",
                    ],
                    4,
                ),
                TaggedBurst::new(
                    "msme",
                    &[
                        "msme", "entrepreneur", "business owner", "small business", "startup",
                        "micro enterprise", "small scale", "self employed business", "businessman",
                    ],
                    5,
                ),
                TaggedBurst::new(
                    "self-employed",
                    &[
                        "self employed", "own business", "independent", "freelancer", "consultant",
                        "self reliant", "own work",
                    ],
                    4,
                ),
                TaggedBurst::new(
                    "unemployed",
                    &[
                        "unemployed", "jobless", "without job", "seeking employment", "job seeker",
                        "looking for work", "no job", "unemployment",
                    ],
                    5,
                ),
                TaggedBurst::new(
                    "retired",
                    &[
                        "retired", "pension", "pensioner", "ex employee", "superannuated",
                        "retirement", "former employee", "ex service",
                    ],
                    5,
                ),
                TaggedBurst::new(
                    "worker",
                    &[
                        "worker", "labour", "labourer", "daily wage", "wage earner", "construction",
                        "manual worker", "unorganized sector", "laborer",
                    ],
                    5,
                ),
            ],
            category_repeat: 5,
            category: vec![
                TaggedBurst::new(
                    "SC",
                    &[
                        "scheduled caste", "sc", "dalit", "scheduled castes", "socially backward",
                        "socially disadvantaged", "reserved category",
                    ],
                    5,
                ),
                TaggedBurst::new(
                    "ST",
                    &[
                        "scheduled tribe", "st", "tribal", "adivasi", "indigenous",
                        "scheduled tribes", "tribal community", "tribe",
                    ],
                    5,
                ),
                TaggedBurst::new(
                    "OBC",
                    &[
                        "other backward class", "obc", "backward class", "backward caste",
                        "socially and educationally backward",
                    ],
                    5,
                ),
                TaggedBurst::new(
                    "WOMEN",
                    &[
                        "woman", "women", "female", "girl", "lady", "mother", "wife", "daughter",
                        "widow", "mahila", "women empowerment", "girl child", "ladies",
                    ],
                    6,
                ),
                TaggedBurst::new(
                    "MINORITY",
                    &["minority", "religious minority", "minority community", "minorities"],
                    4,
                ),
                TaggedBurst::new(
                    "GENERAL",
                    &["general", "general category", "unreserved", "open category"],
                    2,
                ),
            ],
            education_repeat: 3,
            education: vec![
                TaggedBurst::new(
                    "primary",
                    &[
                        "primary", "basic education", "elementary", "literacy",
                        "minimal education", "school", "below 10th",
                    ],
                    3,
                ),
                TaggedBurst::new(
                    "high school",
                    &[
                        "high school", "secondary", "matriculation", "10th", "12th",
                        "school education", "intermediate",
                    ],
                    3,
                ),
                TaggedBurst::new(
                    "undergraduate",
                    &[
                        "undergraduate", "graduation", "college", "pursuing degree",
                        "graduate student", "ug", "bachelor pursuing",
                    ],
                    4,
                ),
                TaggedBurst::new(
                    "graduate",
                    &[
                        "graduate", "graduated", "degree holder", "bachelor", "degree",
                        "higher education", "college graduate", "qualified",
                    ],
                    4,
                ),
                TaggedBurst::new(
                    "postgraduate",
                    &[
                        "postgraduate", "masters", "post graduate", "pg", "higher degree",
                        "advanced degree", "masters degree",
                    ],
                    4,
                ),
                TaggedBurst::new(
                    "diploma",
                    &[
                        "diploma", "iti", "polytechnic", "technical", "vocational",
                        "skill training", "certificate",
                    ],
                    4,
                ),
                TaggedBurst::new(
                    "professional",
                    &[
                        "professional", "engineering", "medical", "technical degree",
                        "specialized degree", "professional qualification",
                    ],
                    3,
                ),
            ],
            location_words: ["India", "Indian", "citizen", "resident"]
                .iter()
                .map(|w| (*w).to_string())
                .collect(),
            location_repeat: 3,
            family: FamilyRules {
                large_above: 5,
                large: KeywordBurst::new(&["large family", "big family", "many dependents", "family"], 3),
                household_above: 3,
                household: KeywordBurst::new(&["family", "dependents", "household"], 2),
            },
            experience: ExperienceRules {
                fresher: KeywordBurst::new(
                    &["fresher", "no experience", "beginner", "entry level", "new"],
                    3,
                ),
                junior_below: 3,
                junior: KeywordBurst::new(
                    &["less experience", "junior", "early career", "inexperienced"],
                    2,
                ),
                experienced_below: 10,
                experienced: KeywordBurst::new(
                    &["experienced", "skilled", "professional", "qualified"],
                    2,
                ),
                senior: KeywordBurst::new(
                    &["highly experienced", "senior", "expert", "veteran"],
                    2,
                ),
            },
        }
    }
}
