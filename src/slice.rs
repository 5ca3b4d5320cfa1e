//! # Binary relation slices
//!
//! A slice is one frontal `N × N` matrix of the RESCAL tensor: entry `(i, j)`
//! is 1.0 when entity `i` relates to entity `j`, absent otherwise.
//!
//! Entries are collected in a coordinate set while the inputs are scanned, so
//! the final dimension does not need to be known up front and marking the same
//! cell twice still yields a single 1.0. The set is turned into triplets and
//! compressed to CSR once the size is fixed.

use std::collections::BTreeSet;

use log::{debug, trace};
use sprs::{CsMat, TriMat};

use crate::registry::CategoryRegistry;

#[derive(Debug, Clone, Default)]
pub struct BinarySlice {
    entries: BTreeSet<(usize, usize)>,
}

impl BinarySlice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark(&mut self, row: usize, col: usize) {
        if self.entries.insert((row, col)) {
            trace!("Marked ({}, {})", row, col);
        }
    }

    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    /// Smallest square dimension that holds every marked cell
    pub fn min_size(&self) -> usize {
        self.entries
            .iter()
            .map(|&(i, j)| i.max(j) + 1)
            .max()
            .unwrap_or(0)
    }

    /// Compress into an `n × n` CSR matrix. `n` must be at least `min_size()`.
    pub fn to_csr(&self, n: usize) -> CsMat<f64> {
        debug_assert!(n >= self.min_size());
        let mut triplets: TriMat<f64> = TriMat::with_capacity((n, n), self.entries.len());
        for &(i, j) in &self.entries {
            triplets.add_triplet(i, j, 1.0);
        }
        let matrix: CsMat<f64> = triplets.to_csr();
        debug!(
            "Compressed slice to {}x{} CSR with {} non-zeros",
            n,
            n,
            matrix.nnz()
        );
        matrix
    }
}

/// Need × category incidence over the extended header axis
#[derive(Debug, Clone)]
pub struct CategorySlice {
    pub matrix: CsMat<f64>,
    /// Number of header labels before the appended categories
    pub n_headers: usize,
    pub categories: CategoryRegistry,
}

impl CategorySlice {
    pub fn size(&self) -> usize {
        self.n_headers + self.categories.len()
    }

    pub fn shape(&self) -> (usize, usize) {
        self.matrix.shape()
    }

    pub fn nnz(&self) -> usize {
        self.matrix.nnz()
    }

    /// Column of a category, if it was discovered
    pub fn category_column(&self, name: &str) -> Option<usize> {
        self.categories.position(name).map(|p| self.n_headers + p)
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.matrix.get(row, col).copied().unwrap_or(0.0)
    }

    /// Sparsity as the share of zero cells
    pub fn sparsity(&self) -> f64 {
        let n = self.size();
        if n == 0 {
            return 1.0;
        }
        1.0 - self.nnz() as f64 / (n * n) as f64
    }
}
