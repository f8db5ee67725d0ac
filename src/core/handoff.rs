//! Ownership transfer of the finished CSR buffers
//!
//! The buffers accumulated during a load are moved to the caller, never
//! copied. [`CsrParts`] is the single owner of that storage once it leaves
//! the dataset: consuming it moves each `Vec` out exactly once, dropping it
//! releases everything exactly once. There is deliberately no `Clone` here
//! and no reference counting.
//!
//! A host binding that exposes these buffers to a garbage-collected runtime
//! should wrap a `CsrParts` in whatever finalizer mechanism the host offers
//! ("move ownership in, register one release callback"); drop of the parts
//! is the release.

use crate::core::{CsrDataset, Result};

/// The raw buffers of a [`CsrDataset`], moved out of it.
#[derive(Debug, PartialEq)]
pub struct CsrParts {
    pub data: Vec<f64>,
    pub indices: Vec<u32>,
    pub row_offsets: Vec<u32>,
    pub labels: Vec<f64>,
    pub comments: Option<Vec<String>>,
    pub qids: Option<Vec<i64>>,
}

impl CsrDataset {
    /// Move the buffer storage out of the dataset without copying.
    pub fn into_parts(self) -> CsrParts {
        CsrParts {
            data: self.data,
            indices: self.indices,
            row_offsets: self.row_offsets,
            labels: self.labels,
            comments: self.comments,
            qids: self.qids,
        }
    }

    /// Assemble a dataset from externally-built buffers.
    ///
    /// Validates every structural invariant (parallel buffer lengths,
    /// offset monotonicity, closing offset) and rejects violations with
    /// [`crate::SvmlightError::ShapeMismatch`]. The buffers are moved in;
    /// on error they are dropped with the rejected dataset.
    pub fn from_parts(parts: CsrParts) -> Result<Self> {
        let dataset = CsrDataset {
            data: parts.data,
            indices: parts.indices,
            row_offsets: parts.row_offsets,
            labels: parts.labels,
            comments: parts.comments,
            qids: parts.qids,
        };
        dataset.validate()?;
        Ok(dataset)
    }
}
