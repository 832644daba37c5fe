// TF-IDF vectorizer over normalized text.
// Tokenization, pruning, idf smoothing and row normalization follow the
// scikit-learn `TfidfVectorizer` conventions so weights match catalogs
// tuned against it.
use crate::error::{Error, Result};
use crate::normalize::WORD_CLASS;
use crate::stopwords::is_english_stop_word;
use crate::vector::SparseVector;
use ahash::AHashMap;
use rayon::prelude::*;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StopWords {
    #[default]
    None,
    English,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TfidfConfig {
    /// Keep at most this many terms, ranked by total corpus count
    pub max_features: Option<usize>,
    /// Inclusive (min, max) n-gram lengths
    pub ngram_range: (usize, usize),
    /// Drop terms found in more than this fraction of documents
    pub max_df: f64,
    /// Drop terms found in fewer than this many documents
    pub min_df: usize,
    pub sublinear_tf: bool,
    pub stop_words: StopWords,
}

impl Default for TfidfConfig {
    fn default() -> Self {
        Self {
            max_features: None,
            ngram_range: (1, 1),
            max_df: 1.0,
            min_df: 1,
            sublinear_tf: false,
            stop_words: StopWords::None,
        }
    }
}

impl TfidfConfig {
    pub fn validate(&self) -> Result<()> {
        let (lo, hi) = self.ngram_range;
        if lo == 0 || lo > hi {
            return Err(Error::InvalidConfig(format!(
                "ngram_range ({lo}, {hi}) must satisfy 1 <= min <= max"
            )));
        }
        if !(self.max_df > 0.0 && self.max_df <= 1.0) {
            return Err(Error::InvalidConfig(format!(
                "max_df {} must be in (0, 1]",
                self.max_df
            )));
        }
        if self.max_features == Some(0) {
            return Err(Error::InvalidConfig("max_features must be positive".to_string()));
        }
        Ok(())
    }
}

static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("[{WORD_CLASS}]{{2,}}")).expect("token regex is valid"));

/// Maximal runs of two or more word characters, the same tokens as
/// scikit-learn's `(?u)\b\w\w+\b`.
pub fn tokenize(text: &str) -> Vec<&str> {
    TOKEN.find_iter(text).map(|m| m.as_str()).collect()
}

/// Tokens, minus stop words, expanded into space-joined n-grams.
pub fn analyze(config: &TfidfConfig, text: &str) -> Vec<String> {
    let tokens: Vec<&str> = tokenize(text)
        .into_iter()
        .filter(|t| match config.stop_words {
            StopWords::English => !is_english_stop_word(t),
            StopWords::None => true,
        })
        .collect();

    let (min_n, max_n) = config.ngram_range;
    let mut terms = Vec::new();
    for n in min_n..=max_n {
        if n == 0 || n > tokens.len() {
            continue;
        }
        for window in tokens.windows(n) {
            terms.push(window.join(" "));
        }
    }
    terms
}

fn count_terms(config: &TfidfConfig, text: &str) -> AHashMap<String, u32> {
    let mut counts: AHashMap<String, u32> = AHashMap::new();
    for term in analyze(config, text) {
        *counts.entry(term).or_insert(0) += 1;
    }
    counts
}

/// A fitted vocabulary with its idf weights.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    config: TfidfConfig,
    vocabulary: AHashMap<String, u32>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// A vectorizer that knows no terms; every transform yields a zero vector.
    #[must_use]
    pub fn empty(config: TfidfConfig) -> Self {
        Self {
            config,
            vocabulary: AHashMap::new(),
            idf: Vec::new(),
        }
    }

    pub fn fit<S: AsRef<str> + Sync>(config: TfidfConfig, documents: &[S]) -> Result<Self> {
        Self::fit_transform(config, documents).map(|(vectorizer, _)| vectorizer)
    }

    /// Fit on `documents` and return the L2-normalised row for each one, in order.
    pub fn fit_transform<S: AsRef<str> + Sync>(
        config: TfidfConfig,
        documents: &[S],
    ) -> Result<(Self, Vec<SparseVector>)> {
        config.validate()?;
        let n_docs = documents.len();
        if n_docs == 0 {
            return Err(Error::EmptyVocabulary { documents: 0 });
        }

        let doc_counts: Vec<AHashMap<String, u32>> = documents
            .par_iter()
            .map(|doc| count_terms(&config, doc.as_ref()))
            .collect();

        // term -> (document frequency, total count)
        let mut stats: AHashMap<&str, (usize, u64)> = AHashMap::new();
        for counts in &doc_counts {
            for (term, &count) in counts {
                let entry = stats.entry(term.as_str()).or_insert((0, 0));
                entry.0 += 1;
                entry.1 += u64::from(count);
            }
        }

        let max_doc_count = config.max_df * n_docs as f64;
        let mut kept: Vec<(&str, usize, u64)> = stats
            .into_iter()
            .filter(|(_, (df, _))| (*df as f64) <= max_doc_count && *df >= config.min_df)
            .map(|(term, (df, total))| (term, df, total))
            .collect();

        if let Some(limit) = config.max_features {
            if kept.len() > limit {
                kept.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| a.0.cmp(b.0)));
                kept.truncate(limit);
            }
        }

        if kept.is_empty() {
            return Err(Error::EmptyVocabulary { documents: n_docs });
        }

        kept.sort_by(|a, b| a.0.cmp(b.0));

        let mut vocabulary = AHashMap::with_capacity(kept.len());
        let mut idf = Vec::with_capacity(kept.len());
        for (column, (term, df, _)) in kept.into_iter().enumerate() {
            vocabulary.insert(term.to_string(), column as u32);
            idf.push(((1.0 + n_docs as f64) / (1.0 + df as f64)).ln() + 1.0);
        }

        let vectorizer = Self {
            config,
            vocabulary,
            idf,
        };
        let rows = doc_counts
            .par_iter()
            .map(|counts| vectorizer.weigh(counts))
            .collect();

        Ok((vectorizer, rows))
    }

    /// Vectorize `text` against the fitted vocabulary. Unknown terms are ignored.
    pub fn transform(&self, text: &str) -> SparseVector {
        if self.vocabulary.is_empty() {
            return SparseVector::empty();
        }
        self.weigh(&count_terms(&self.config, text))
    }

    fn weigh(&self, counts: &AHashMap<String, u32>) -> SparseVector {
        let pairs = counts
            .iter()
            .filter_map(|(term, &count)| {
                let column = *self.vocabulary.get(term)?;
                let tf = if self.config.sublinear_tf {
                    1.0 + f64::from(count).ln()
                } else {
                    f64::from(count)
                };
                Some((column, tf * self.idf[column as usize]))
            })
            .collect();

        let mut row = SparseVector::from_pairs(pairs);
        row.normalize();
        row
    }

    #[inline]
    #[must_use]
    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    #[must_use]
    pub fn column(&self, term: &str) -> Option<u32> {
        self.vocabulary.get(term).copied()
    }

    #[must_use]
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.column(term).map(|c| self.idf[c as usize])
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &TfidfConfig {
        &self.config
    }
}
