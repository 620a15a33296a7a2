use serde::{Deserialize, Serialize};

pub type TermId = u32;

/// What ranking needs from a vector representation.
pub trait Similarity {
    fn dot(&self, other: &Self) -> f64;
    fn norm(&self) -> f64;

    /// Cosine of the angle between two vectors; 0 when either is the zero vector.
    fn cosine(&self, other: &Self) -> f64 {
        let denom = self.norm() * other.norm();
        if denom == 0.0 { return 0.0; }
        (self.dot(other) / denom).clamp(-1.0, 1.0)
    }
}

/// Sparse weights keyed by term id, sorted by term id with no duplicates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SparseVector {
    entries: Vec<(TermId, f64)>,
}

impl SparseVector {
    /// Build from unordered entries; repeated term ids are summed and zero weights dropped.
    pub fn from_entries(mut entries: Vec<(TermId, f64)>) -> Self {
        entries.sort_by_key(|(t, _)| *t);
        let mut merged: Vec<(TermId, f64)> = Vec::with_capacity(entries.len());
        for (t, w) in entries {
            match merged.last_mut() {
                Some((last, acc)) if *last == t => *acc += w,
                _ => merged.push((t, w)),
            }
        }
        merged.retain(|(_, w)| *w != 0.0);
        Self { entries: merged }
    }

    pub fn l2_normalized(mut self) -> Self {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, w) in self.entries.iter_mut() { *w /= norm; }
        }
        self
    }

    pub fn get(&self, term: TermId) -> f64 {
        self.entries
            .binary_search_by_key(&term, |(t, _)| *t)
            .map(|i| self.entries[i].1)
            .unwrap_or(0.0)
    }

    pub fn is_zero(&self) -> bool { self.entries.is_empty() }
    pub fn nnz(&self) -> usize { self.entries.len() }
    pub fn iter(&self) -> impl Iterator<Item = &(TermId, f64)> { self.entries.iter() }
}

impl Similarity for SparseVector {
    fn dot(&self, other: &Self) -> f64 {
        let (a, b) = (&self.entries, &other.entries);
        let (mut i, mut j, mut sum) = (0, 0, 0.0);
        while i < a.len() && j < b.len() {
            match a[i].0.cmp(&b[j].0) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a[i].1 * b[j].1;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    fn norm(&self) -> f64 { self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merges_and_sorts_entries() {
        let v = SparseVector::from_entries(vec![(3, 1.0), (1, 2.0), (3, 0.5), (7, 0.0)]);
        assert_eq!(v.iter().copied().collect::<Vec<_>>(), vec![(1, 2.0), (3, 1.5)]);
        assert_eq!(v.get(7), 0.0);
    }

    #[test]
    fn cosine_of_zero_vector_is_zero() {
        let zero = SparseVector::default();
        let v = SparseVector::from_entries(vec![(0, 1.0)]);
        assert_eq!(zero.cosine(&v), 0.0);
        assert_eq!(v.cosine(&zero), 0.0);
        assert_eq!(zero.cosine(&zero), 0.0);
    }

    #[test]
    fn cosine_stays_in_range() {
        let a = SparseVector::from_entries(vec![(0, 3.0), (2, 4.0)]);
        let b = SparseVector::from_entries(vec![(0, 6.0), (2, 8.0)]);
        let c = SparseVector::from_entries(vec![(1, 1.0)]);
        assert!((a.cosine(&b) - 1.0).abs() < 1e-12);
        assert!(a.cosine(&b) <= 1.0);
        assert_eq!(a.cosine(&c), 0.0);
        assert!((a.clone().l2_normalized().norm() - 1.0).abs() < 1e-12);
    }
}
