//! Scheme catalog loading.
//!
//! The catalog is read once from CSV, filtered, normalized and then never
//! mutated. A scheme's [`SchemeId`] is its position in the filtered catalog,
//! which is also its row in every fitted vector space.

use crate::error::{Error, Result};
use crate::normalize::{normalize, NormalizedText};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

pub const REQUIRED_COLUMNS: [&str; 7] = [
    "scheme_name",
    "slug",
    "level",
    "schemeCategory",
    "eligibility",
    "benefits",
    "details",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemeId(pub u32);

impl SchemeId {
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SchemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SCH{:04}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Level {
    Central,
    State,
    #[default]
    Unspecified,
}

impl Level {
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.eq_ignore_ascii_case("central") {
            Level::Central
        } else if value.eq_ignore_ascii_case("state") {
            Level::State
        } else {
            Level::Unspecified
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Level::Central => "Central",
            Level::State => "State",
            Level::Unspecified => "Unspecified",
        };
        f.write_str(s)
    }
}

/// One raw catalog row, before filtering and normalization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemeRecord {
    pub name: String,
    pub slug: String,
    pub level: String,
    pub category: String,
    pub eligibility: String,
    pub benefits: String,
    pub details: String,
}

impl SchemeRecord {
    fn is_usable(&self) -> bool {
        !self.name.trim().is_empty() && !self.eligibility.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scheme {
    pub id: SchemeId,
    /// 1-based data row in the source, for diagnostics
    pub source_row: usize,
    pub name: String,
    pub slug: String,
    pub level: Level,
    pub category: String,
    pub eligibility: String,
    pub benefits: String,
    pub details: String,
    pub normalized_eligibility: NormalizedText,
    pub normalized_benefits: NormalizedText,
    pub normalized_category: NormalizedText,
    /// Lowercased raw eligibility, matched against boost triggers
    pub eligibility_lower: String,
}

impl Scheme {
    fn from_record(id: SchemeId, source_row: usize, record: SchemeRecord) -> Self {
        Self {
            id,
            source_row,
            level: Level::parse(&record.level),
            normalized_eligibility: normalize(&record.eligibility),
            normalized_benefits: normalize(&record.benefits),
            normalized_category: normalize(&record.category),
            eligibility_lower: record.eligibility.to_lowercase(),
            name: record.name,
            slug: record.slug,
            category: record.category,
            eligibility: record.eligibility,
            benefits: record.benefits,
            details: record.details,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    schemes: Vec<Scheme>,
    skipped: usize,
}

impl Catalog {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let catalog = Self::from_reader(file)?;
        info!("Loaded catalog from {:?}", path);
        Ok(catalog)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let mut positions = [0usize; REQUIRED_COLUMNS.len()];
        for (slot, column) in positions.iter_mut().zip(REQUIRED_COLUMNS) {
            *slot = headers
                .iter()
                .position(|h| h.trim() == column)
                .ok_or_else(|| Error::MissingColumn(column.to_string()))?;
        }

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            let cell = |i: usize| row.get(positions[i]).unwrap_or("").to_string();
            records.push(SchemeRecord {
                name: cell(0),
                slug: cell(1),
                level: cell(2),
                category: cell(3),
                eligibility: cell(4),
                benefits: cell(5),
                details: cell(6),
            });
        }

        Self::from_schemes(records)
    }

    /// Filter and normalize in-memory records. Rows without a name or an
    /// eligibility text are skipped.
    pub fn from_schemes(records: Vec<SchemeRecord>) -> Result<Self> {
        let total = records.len();
        let mut schemes = Vec::with_capacity(total);
        let mut skipped = 0;

        for (row, record) in records.into_iter().enumerate() {
            if !record.is_usable() {
                debug!("Skipping catalog row {}: missing scheme name or eligibility", row + 1);
                skipped += 1;
                continue;
            }
            let id = SchemeId(schemes.len() as u32);
            schemes.push(Scheme::from_record(id, row + 1, record));
        }

        if schemes.is_empty() {
            return Err(Error::EmptyCatalog { skipped });
        }

        info!(
            "Catalog ready: {} schemes ({} of {} rows skipped)",
            schemes.len(),
            skipped,
            total
        );
        Ok(Self { schemes, skipped })
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.schemes.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemes.is_empty()
    }

    /// Rows dropped while loading
    #[inline]
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    #[inline]
    #[must_use]
    pub fn get(&self, id: SchemeId) -> Option<&Scheme> {
        self.schemes.get(id.index())
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Scheme> {
        self.schemes.iter()
    }

    #[inline]
    #[must_use]
    pub fn schemes(&self) -> &[Scheme] {
        &self.schemes
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Scheme;
    type IntoIter = std::slice::Iter<'a, Scheme>;

    fn into_iter(self) -> Self::IntoIter {
        self.schemes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "scheme_name,slug,details,benefits,eligibility,level,schemeCategory\n";

    #[test]
    fn test_scheme_id_display() {
        assert_eq!(SchemeId(42).to_string(), "SCH0042");
        assert_eq!(SchemeId(12345).to_string(), "SCH12345");
    }

    #[test]
    fn test_level_parse() {
        assert_eq!(Level::parse("Central"), Level::Central);
        assert_eq!(Level::parse(" state "), Level::State);
        assert_eq!(Level::parse(""), Level::Unspecified);
        assert_eq!(Level::parse("UT"), Level::Unspecified);
    }

    #[test]
    fn test_load_from_reader() {
        let csv = format!(
            "{HEADER}\
             Old Age Pension,oap,Monthly pension,Rs 1000 per month,Elderly women aged 60+,Central,Social welfare\n\
             Farm Aid,farm-aid,Support,Cash,Small farmers,State,Agriculture\n"
        );
        let catalog = Catalog::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(catalog.len(), 2);

        let first = catalog.get(SchemeId(0)).unwrap();
        assert_eq!(first.name, "Old Age Pension");
        assert_eq!(first.level, Level::Central);
        assert_eq!(first.category, "Social welfare");
        assert_eq!(first.eligibility_lower, "elderly women aged 60+");
        assert_eq!(first.normalized_eligibility.as_str(), "elderly women aged 60");
        assert_eq!(catalog.get(SchemeId(1)).unwrap().level, Level::State);
    }

    #[test]
    fn test_skips_rows_without_name_or_eligibility() {
        let csv = format!(
            "{HEADER}\
             ,no-name,d,b,Anyone,Central,X\n\
             No Eligibility,ne,d,b,   ,Central,X\n\
             Kept,kept,d,b,Farmers,State,Agriculture\n"
        );
        let catalog = Catalog::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.skipped(), 2);

        let kept = catalog.get(SchemeId(0)).unwrap();
        assert_eq!(kept.name, "Kept");
        assert_eq!(kept.source_row, 3);
    }

    #[test]
    fn test_short_rows_fill_blank() {
        let csv = "scheme_name,eligibility,slug,level,schemeCategory,benefits,details\n\
                   Short,Farmers\n";
        let catalog = Catalog::from_reader(csv.as_bytes()).unwrap();
        let scheme = catalog.get(SchemeId(0)).unwrap();
        assert_eq!(scheme.details, "");
        assert_eq!(scheme.level, Level::Unspecified);
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let csv = "scheme_name,slug,level,eligibility,benefits,details\nA,a,Central,x,y,z\n";
        match Catalog::from_reader(csv.as_bytes()) {
            Err(Error::MissingColumn(column)) => assert_eq!(column, "schemeCategory"),
            other => panic!("expected missing column, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_catalog_is_fatal() {
        let csv = format!("{HEADER},x,d,b,,Central,X\n");
        assert!(matches!(
            Catalog::from_reader(csv.as_bytes()),
            Err(Error::EmptyCatalog { skipped: 1 })
        ));
        assert!(matches!(
            Catalog::from_schemes(Vec::new()),
            Err(Error::EmptyCatalog { skipped: 0 })
        ));
    }

    #[test]
    fn test_load_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schemes.csv");
        std::fs::write(&path, format!("{HEADER}A,a,d,b,Farmers,Central,Agri\n")).unwrap();
        assert_eq!(Catalog::from_path(&path).unwrap().len(), 1);

        assert!(matches!(
            Catalog::from_path(dir.path().join("missing.csv")),
            Err(Error::Io(_))
        ));
    }
}
