use serde::{Deserialize, Serialize};
use std::ops::Mul;

/// A sparse vector of term weights, entries sorted by column
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SparseVector {
    indices: Vec<u32>,
    values: Vec<f64>,
}

impl SparseVector {
    /// Build from (column, weight) pairs in any order.
    /// Duplicate columns are summed and zero weights dropped.
    #[must_use]
    pub fn from_pairs(mut pairs: Vec<(u32, f64)>) -> Self {
        pairs.sort_by_key(|(idx, _)| *idx);

        let mut indices = Vec::with_capacity(pairs.len());
        let mut values: Vec<f64> = Vec::with_capacity(pairs.len());
        for (idx, value) in pairs {
            if indices.last() == Some(&idx) {
                if let Some(last) = values.last_mut() {
                    *last += value;
                }
            } else {
                indices.push(idx);
                values.push(value);
            }
        }

        let mut vector = Self { indices, values };
        vector.prune_zeros();
        vector
    }

    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of non-zero entries
    #[inline]
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    /// Weight stored at `column`, zero when absent
    #[must_use]
    pub fn get(&self, column: u32) -> f64 {
        self.indices
            .binary_search(&column)
            .map(|pos| self.values[pos])
            .unwrap_or(0.0)
    }

    /// Dot product by merging the two sorted index lists
    #[must_use]
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.indices.len() && j < other.indices.len() {
            match self.indices[i].cmp(&other.indices[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += self.values[i] * other.values[j];
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    #[inline]
    #[must_use]
    pub fn norm(&self) -> f64 {
        self.values.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    /// Compute cosine similarity with another vector.
    /// Zero vectors are similar to nothing.
    #[inline]
    pub fn cosine_similarity(&self, other: &SparseVector) -> f64 {
        if self.is_empty() || other.is_empty() {
            return 0.0;
        }

        let norm_a = self.norm();
        let norm_b = other.norm();
        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }

        self.dot(other) / (norm_a * norm_b)
    }

    /// Normalize the vector to unit length
    #[inline]
    pub fn normalize(&mut self) {
        let norm = self.norm();
        if norm > f64::EPSILON {
            let inv_norm = 1.0 / norm;
            for x in &mut self.values {
                *x *= inv_norm;
            }
        }
    }

    fn prune_zeros(&mut self) {
        if self.values.iter().all(|v| *v != 0.0) {
            return;
        }
        let (indices, values) = self
            .iter()
            .filter(|(_, v)| *v != 0.0)
            .unzip();
        self.indices = indices;
        self.values = values;
    }
}

impl Mul<f64> for &SparseVector {
    type Output = SparseVector;

    fn mul(self, scalar: f64) -> SparseVector {
        let mut out = SparseVector {
            indices: self.indices.clone(),
            values: self.values.iter().map(|x| x * scalar).collect(),
        };
        out.prune_zeros();
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity() {
        let v1 = SparseVector::from_pairs(vec![(0, 1.0)]);
        let v2 = SparseVector::from_pairs(vec![(0, 1.0)]);
        assert!((v1.cosine_similarity(&v2) - 1.0).abs() < 1e-12);

        let v3 = SparseVector::from_pairs(vec![(0, 1.0)]);
        let v4 = SparseVector::from_pairs(vec![(7, 1.0)]);
        assert!(v3.cosine_similarity(&v4).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_ignores_magnitude() {
        let v1 = SparseVector::from_pairs(vec![(1, 3.0), (4, 4.0)]);
        let v2 = &v1 * 10.0;
        assert!((v1.cosine_similarity(&v2) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_vector_similarity() {
        let v1 = SparseVector::empty();
        let v2 = SparseVector::from_pairs(vec![(2, 1.0)]);
        assert_eq!(v1.cosine_similarity(&v2), 0.0);
        assert_eq!(v1.cosine_similarity(&v1), 0.0);
    }

    #[test]
    fn test_from_pairs_merges_and_sorts() {
        let v = SparseVector::from_pairs(vec![(5, 1.0), (2, 2.0), (5, 0.5), (9, 0.0)]);
        assert_eq!(v.nnz(), 2);
        assert_eq!(v.get(2), 2.0);
        assert_eq!(v.get(5), 1.5);
        assert_eq!(v.get(9), 0.0);
    }

    #[test]
    fn test_normalize() {
        let mut v = SparseVector::from_pairs(vec![(0, 3.0), (1, 4.0)]);
        v.normalize();
        assert!((v.norm() - 1.0).abs() < 1e-12);
        assert!((v.get(0) - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_dot_partial_overlap() {
        let a = SparseVector::from_pairs(vec![(0, 1.0), (2, 2.0), (4, 3.0)]);
        let b = SparseVector::from_pairs(vec![(1, 5.0), (2, 1.0), (4, 2.0)]);
        assert!((a.dot(&b) - 8.0).abs() < 1e-12);
    }
}
