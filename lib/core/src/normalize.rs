//! Text normalization shared by catalog fields and profile documents.
//!
//! Both sides of every comparison go through the same pipeline so that they
//! land in the same vocabulary:
//!
//! 1. lowercase
//! 2. replace anything that is not a word character, whitespace, `-` or `/`
//!    with a space
//! 3. collapse whitespace
//! 4. expand abbreviations from [`ABBREVIATIONS`], in table order
//!
//! Step 4 is a plain substring replacement. Later entries can match text
//! produced by earlier ones (`sc` → `scheduled caste sc`, then `st` hits
//! `caste`). The confidence bands downstream were calibrated against exactly
//! this output, so the order and the expansion strings must not change.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;
use std::sync::LazyLock;

/// Abbreviation expansions, applied top to bottom.
pub const ABBREVIATIONS: &[(&str, &str)] = &[
    ("sc", "scheduled caste sc"),
    ("st", "scheduled tribe st"),
    ("sc/st", "scheduled caste scheduled tribe sc st"),
    ("obc", "other backward class obc"),
    ("bpl", "below poverty line bpl poor low income economically weaker"),
    ("apl", "above poverty line apl"),
    ("pwd", "person with disability pwd disabled handicapped"),
    ("ews", "economically weaker section ews poor low income"),
    ("msme", "micro small medium enterprise msme sme business"),
    ("sme", "small medium enterprise sme business"),
    ("iti", "industrial training institute iti technical diploma"),
    ("ngo", "non government organization ngo"),
    ("govt", "government govt public sector"),
    ("pvt", "private pvt"),
    ("₹", "rupees rs money amount"),
    ("rs", "rupees rs money"),
    ("lakh", "lakh 100000 one hundred thousand"),
    ("crore", "crore 10000000 ten million"),
];

/// Output of the normalization pipeline.
///
/// Holding a `NormalizedText` means the abbreviation pass has already run.
/// Normalizing it again through [`Normalize`] returns it unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedText(String);

impl NormalizedText {
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for NormalizedText {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NormalizedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Anything that can be brought into the shared vocabulary.
pub trait Normalize {
    fn normalize(&self) -> NormalizedText;
}

impl Normalize for str {
    fn normalize(&self) -> NormalizedText {
        normalize(self)
    }
}

impl Normalize for String {
    fn normalize(&self) -> NormalizedText {
        normalize(self)
    }
}

impl Normalize for NormalizedText {
    fn normalize(&self) -> NormalizedText {
        self.clone()
    }
}

/// Word characters are letters, numbers and `_` by general category.
/// Combining marks are not word characters.
pub const WORD_CLASS: &str = r"\p{L}\p{N}_";

static NON_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"[^{WORD_CLASS}\s/-]")).expect("non-word regex is valid")
});

/// Lexical part of the pipeline: lowercase, strip punctuation, collapse
/// whitespace. Idempotent.
pub fn clean(text: &str) -> String {
    let lower = text.to_lowercase();
    NON_WORD
        .replace_all(&lower, " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Full pipeline: [`clean`] followed by abbreviation expansion.
pub fn normalize(text: &str) -> NormalizedText {
    let mut text = clean(text);
    if text.is_empty() {
        return NormalizedText(text);
    }

    for (abbr, full) in ABBREVIATIONS {
        if text.contains(abbr) {
            text = text.replace(abbr, full);
        }
    }

    NormalizedText(text)
}
