//! Sparse feature vectors produced by the vectorizer.

/// A sparse row of a fixed-width feature matrix.
///
/// Entries are `(column, value)` pairs sorted by column, with no duplicates.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    dim: usize,
    entries: Vec<(usize, f64)>,
}

impl FeatureVector {
    /// Build a vector from arbitrary entries; they are sorted, and
    /// duplicate columns are summed.
    pub fn new(dim: usize, mut entries: Vec<(usize, f64)>) -> Self {
        entries.sort_by_key(|(col, _)| *col);
        entries.dedup_by(|next, kept| {
            if next.0 == kept.0 {
                kept.1 += next.1;
                true
            } else {
                false
            }
        });
        Self { dim, entries }
    }

    pub fn zeros(dim: usize) -> Self {
        Self { dim, entries: Vec::new() }
    }

    /// Width of the feature space.
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, col: usize) -> f64 {
        self.entries
            .binary_search_by_key(&col, |(c, _)| *c)
            .map(|i| self.entries[i].1)
            .unwrap_or(0.0)
    }

    /// Dot product with a dense row. Columns beyond `dense.len()` count as zero.
    pub fn dot(&self, dense: &[f64]) -> f64 {
        self.entries
            .iter()
            .filter_map(|&(col, v)| dense.get(col).map(|w| v * w))
            .sum()
    }

    pub(crate) fn scale(&mut self, factor: f64) {
        for (_, v) in &mut self.entries {
            *v *= factor;
        }
    }
}
