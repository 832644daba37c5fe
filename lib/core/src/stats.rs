// Descriptive statistics over a loaded catalog.
use crate::catalog::{Catalog, Level, Scheme};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LengthStats {
    pub mean: f64,
    pub median: f64,
    pub max: usize,
}

impl LengthStats {
    /// Stats over character counts. Median of an even-sized sample is the
    /// mean of the two middle values.
    pub fn from_lengths(mut lengths: Vec<usize>) -> Self {
        if lengths.is_empty() {
            return Self::default();
        }
        lengths.sort_unstable();

        let n = lengths.len();
        let mean = lengths.iter().sum::<usize>() as f64 / n as f64;
        let median = if n % 2 == 1 {
            lengths[n / 2] as f64
        } else {
            (lengths[n / 2 - 1] + lengths[n / 2]) as f64 / 2.0
        };

        Self {
            mean,
            median,
            max: lengths[n - 1],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogStats {
    pub total_schemes: usize,
    pub central_schemes: usize,
    pub state_schemes: usize,
    pub skipped_rows: usize,
    /// (category, count), most common first
    pub top_categories: Vec<(String, usize)>,
    pub details_length: LengthStats,
    pub eligibility_length: LengthStats,
    pub benefits_length: LengthStats,
}

impl CatalogStats {
    pub const DEFAULT_TOP_CATEGORIES: usize = 15;

    pub fn compute(catalog: &Catalog, top_categories: usize) -> Self {
        let mut counts: AHashMap<&str, usize> = AHashMap::new();
        for scheme in catalog {
            *counts.entry(scheme.category.as_str()).or_insert(0) += 1;
        }
        let mut categories: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(name, count)| (name.to_string(), count))
            .collect();
        categories.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        categories.truncate(top_categories);

        Self {
            total_schemes: catalog.len(),
            central_schemes: catalog.iter().filter(|s| s.level == Level::Central).count(),
            state_schemes: catalog.iter().filter(|s| s.level == Level::State).count(),
            skipped_rows: catalog.skipped(),
            top_categories: categories,
            details_length: field_lengths(catalog, |s| &s.details),
            eligibility_length: field_lengths(catalog, |s| &s.eligibility),
            benefits_length: field_lengths(catalog, |s| &s.benefits),
        }
    }
}

fn field_lengths(catalog: &Catalog, field: fn(&Scheme) -> &str) -> LengthStats {
    LengthStats::from_lengths(catalog.iter().map(|s| field(s).chars().count()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SchemeRecord;

    fn record(category: &str, level: &str, details: &str) -> SchemeRecord {
        SchemeRecord {
            name: "Scheme".to_string(),
            level: level.to_string(),
            category: category.to_string(),
            eligibility: "Farmers".to_string(),
            details: details.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_length_stats() {
        let stats = LengthStats::from_lengths(vec![4, 1, 3, 2]);
        assert_eq!(stats.max, 4);
        assert!((stats.mean - 2.5).abs() < 1e-12);
        assert!((stats.median - 2.5).abs() < 1e-12);

        let odd = LengthStats::from_lengths(vec![10, 1, 3]);
        assert_eq!(odd.median, 3.0);
        assert_eq!(LengthStats::from_lengths(Vec::new()), LengthStats::default());
    }

    #[test]
    fn test_catalog_stats() {
        let catalog = Catalog::from_schemes(vec![
            record("Agriculture", "Central", "ab"),
            record("Education", "State", "abcd"),
            record("Agriculture", "State", "₹₹₹₹₹₹"),
            record("Health", "", ""),
        ])
        .unwrap();

        let stats = CatalogStats::compute(&catalog, 2);
        assert_eq!(stats.total_schemes, 4);
        assert_eq!(stats.central_schemes, 1);
        assert_eq!(stats.state_schemes, 2);
        assert_eq!(
            stats.top_categories,
            vec![("Agriculture".to_string(), 2), ("Education".to_string(), 1)]
        );
        assert_eq!(stats.details_length.max, 6);
        assert_eq!(stats.eligibility_length.max, 7);
    }
}
