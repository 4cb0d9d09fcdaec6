//! Consolidation of per-file sequences
//!
//! The [`Consolidator`] owns the single consolidated sequence of a run. Each
//! worker's sequence is moved into it as it arrives, so values from one file stay
//! contiguous and in row order while files appear in arrival order. The
//! consolidator is only ever touched by the coordinator's collection loop.
//!
//! # Example
//!
//! ```
//! use colstat::stats::{aggregator::Consolidator, Operation};
//! use std::path::PathBuf;
//!
//! let mut consolidator = Consolidator::new();
//! consolidator.merge(PathBuf::from("a.csv"), vec![60.0, 40.0]);
//! consolidator.merge(PathBuf::from("b.csv"), vec![50.0]);
//!
//! assert_eq!(consolidator.len(), 3);
//! assert_eq!(consolidator.apply(Operation::Sum), 150.0);
//! ```

use crate::stats::Operation;
use std::path::{Path, PathBuf};

/// Consolidated sequence plus the per-file record counts that built it
#[derive(Debug, Default)]
pub struct Consolidator {
    /// All merged values (arrival order across files)
    values: Vec<f64>,

    /// Files merged so far with their record counts, in arrival order
    files: Vec<(PathBuf, usize)>,
}

impl Consolidator {
    /// Create an empty consolidator
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a consolidator expecting `files` inputs
    pub fn with_capacity(files: usize) -> Self {
        Self {
            values: Vec::new(),
            files: Vec::with_capacity(files),
        }
    }

    /// Append one file's sequence
    ///
    /// The first non-empty merge takes ownership of the buffer outright.
    pub fn merge(&mut self, path: PathBuf, mut values: Vec<f64>) {
        self.files.push((path, values.len()));
        if self.values.is_empty() {
            std::mem::swap(&mut self.values, &mut values);
        }
        self.values.append(&mut values);
    }

    /// Number of consolidated records
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no records have been merged
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of files merged
    pub fn num_files(&self) -> usize {
        self.files.len()
    }

    /// Files in the order they were merged, with their record counts
    pub fn files(&self) -> impl Iterator<Item = (&Path, usize)> {
        self.files.iter().map(|(p, count)| (p.as_path(), *count))
    }

    /// The consolidated sequence
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Apply an aggregation to the consolidated sequence
    pub fn apply(&self, op: Operation) -> f64 {
        op.apply(&self.values)
    }
}
