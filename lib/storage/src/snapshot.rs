// On-disk layout of a fitted model: the catalog, the three fitted spaces and
// the configuration the engine was built with.
use chrono::{DateTime, Utc};
use schemefit_core::{Catalog, SchemeIndex};
use schemefit_ranking::{KeywordTables, RankingConfig, RankingEngine};
use serde::{Deserialize, Serialize};

/// Bumped whenever the encoded layout changes
pub const FORMAT_VERSION: u32 = 1;

pub const MODEL_VERSION: &str = "3.0 - High Accuracy";

/// Borrowed view used for encoding, so saving never clones the engine.
/// Field order must match [`ModelSnapshot`].
#[derive(Serialize)]
pub(crate) struct SnapshotRef<'a> {
    pub format_version: u32,
    pub catalog: &'a Catalog,
    pub index: &'a SchemeIndex,
    pub config: &'a RankingConfig,
    pub keywords: &'a KeywordTables,
}

impl<'a> SnapshotRef<'a> {
    pub fn of(engine: &'a RankingEngine) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            catalog: engine.catalog(),
            index: engine.index(),
            config: engine.config(),
            keywords: engine.keywords(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ModelSnapshot {
    pub format_version: u32,
    pub catalog: Catalog,
    pub index: SchemeIndex,
    pub config: RankingConfig,
    pub keywords: KeywordTables,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabularySizes {
    pub eligibility: usize,
    pub benefits: usize,
    pub category: usize,
}

/// Human-readable description written next to the model file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub model_version: String,
    pub format_version: u32,
    pub total_schemes: usize,
    pub vocabulary: VocabularySizes,
    pub techniques: Vec<String>,
    pub created_at: DateTime<Utc>,
    /// SHA-256 of the compressed model file, lowercase hex
    pub checksum: String,
    /// Compressed size in bytes
    pub size: u64,
}

impl ModelMetadata {
    pub fn describe(engine: &RankingEngine, checksum: String, size: u64) -> Self {
        let index = engine.index();
        let weights = &engine.config().weights;
        let features = [
            index.eligibility().vocabulary_len(),
            index.benefits().vocabulary_len(),
            index.category().vocabulary_len(),
        ];

        let techniques = vec![
            "Triple vectorization ensemble".to_string(),
            format!(
                "Weighted scoring ({:.0}-{:.0}-{:.0})",
                weights.eligibility * 100.0,
                weights.benefits * 100.0,
                weights.category * 100.0
            ),
            "Enhanced text preprocessing".to_string(),
            "Comprehensive keyword expansion".to_string(),
            "Rule-based age/income boosts".to_string(),
            "Advanced confidence scaling".to_string(),
            format!(
                "Maximum feature extraction ({}+{}+{})",
                features[0], features[1], features[2]
            ),
        ];

        Self {
            model_version: MODEL_VERSION.to_string(),
            format_version: FORMAT_VERSION,
            total_schemes: engine.total_schemes(),
            vocabulary: VocabularySizes {
                eligibility: features[0],
                benefits: features[1],
                category: features[2],
            },
            techniques,
            created_at: Utc::now(),
            checksum,
            size,
        }
    }
}
