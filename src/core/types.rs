//! CSR dataset representation
//!
//! A parsed dataset is three parallel numeric buffers (`data`, `indices`,
//! `row_offsets`) plus a dense `labels` buffer, and optionally per-row
//! comment and qid buffers. Row `i` occupies the half-open range
//! `[row_offsets[i], row_offsets[i + 1])` of `data`/`indices`.

use crate::core::{Result, SvmlightError};

/// A finalized compressed-sparse-row dataset.
///
/// Buffers are built append-only by the parser and moved in here exactly
/// once; the dataset exclusively owns its storage until it is dropped or
/// consumed via [`CsrDataset::into_parts`].
///
/// Feature indices are stored exactly as written: the parser never sorts,
/// deduplicates, or rebases them. Consumers that require sorted unique
/// indices must post-process.
#[derive(Debug, Clone, PartialEq)]
pub struct CsrDataset {
    pub(crate) data: Vec<f64>,
    pub(crate) indices: Vec<u32>,
    pub(crate) row_offsets: Vec<u32>,
    pub(crate) labels: Vec<f64>,
    pub(crate) comments: Option<Vec<String>>,
    pub(crate) qids: Option<Vec<i64>>,
}

/// Borrowed view of a single row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowView<'a> {
    pub label: f64,
    pub indices: &'a [u32],
    pub values: &'a [f64],
    /// Trailing comment, when comment capture was enabled. Empty string
    /// means "no comment or explicitly empty comment" (the source format
    /// does not distinguish them).
    pub comment: Option<&'a str>,
    /// Row qid, when qid capture was enabled. `-1` for rows without a
    /// `qid:` marker.
    pub qid: Option<i64>,
}

impl CsrDataset {
    /// An empty dataset: zero rows, `row_offsets == [0]`.
    pub fn empty() -> Self {
        CsrDataset {
            data: Vec::new(),
            indices: Vec::new(),
            row_offsets: vec![0],
            labels: Vec::new(),
            comments: None,
            qids: None,
        }
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.row_offsets.len().saturating_sub(1)
    }

    /// Number of stored (index, value) entries across all rows.
    pub fn nnz(&self) -> usize {
        self.data.len()
    }

    /// Check if the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.n_rows() == 0
    }

    /// Feature values, row-major across all rows.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Feature indices, same order and length as [`CsrDataset::data`].
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Row boundaries: `row_offsets[i]..row_offsets[i + 1]` spans row `i`.
    pub fn row_offsets(&self) -> &[u32] {
        &self.row_offsets
    }

    /// One label per row.
    pub fn labels(&self) -> &[f64] {
        &self.labels
    }

    /// Per-row comments, when capture was enabled during the load.
    pub fn comments(&self) -> Option<&[String]> {
        self.comments.as_deref()
    }

    /// Per-row qids, when capture was enabled during the load.
    pub fn qids(&self) -> Option<&[i64]> {
        self.qids.as_deref()
    }

    /// Get a single row by index.
    ///
    /// # Panics
    /// Panics if `i >= n_rows()`
    pub fn row(&self, i: usize) -> RowView<'_> {
        let start = self.row_offsets[i] as usize;
        let end = self.row_offsets[i + 1] as usize;
        RowView {
            label: self.labels[i],
            indices: &self.indices[start..end],
            values: &self.data[start..end],
            comment: self.comments.as_ref().map(|c| c[i].as_str()),
            qid: self.qids.as_ref().map(|q| q[i]),
        }
    }

    /// Iterate over all rows in order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = RowView<'_>> + '_ {
        (0..self.n_rows()).map(move |i| self.row(i))
    }

    /// Check every structural invariant of the CSR layout.
    ///
    /// Datasets produced by the parser always pass; this guards buffers
    /// assembled by hand via [`CsrDataset::from_parts`] and the writer's
    /// input.
    pub fn validate(&self) -> Result<()> {
        if self.indices.len() != self.data.len() {
            return Err(SvmlightError::ShapeMismatch(format!(
                "indices length {} != data length {}",
                self.indices.len(),
                self.data.len()
            )));
        }
        if self.row_offsets.is_empty() {
            return Err(SvmlightError::ShapeMismatch(
                "row_offsets must contain at least the closing offset".to_string(),
            ));
        }
        if self.row_offsets[0] != 0 {
            return Err(SvmlightError::ShapeMismatch(format!(
                "row_offsets must start at 0, got {}",
                self.row_offsets[0]
            )));
        }
        if self.row_offsets.windows(2).any(|w| w[0] > w[1]) {
            return Err(SvmlightError::ShapeMismatch(
                "row_offsets must be non-decreasing".to_string(),
            ));
        }
        let last = *self.row_offsets.last().unwrap_or(&0) as usize;
        if last != self.data.len() {
            return Err(SvmlightError::ShapeMismatch(format!(
                "final row offset {} != data length {}",
                last,
                self.data.len()
            )));
        }
        let n_rows = self.n_rows();
        if self.labels.len() != n_rows {
            return Err(SvmlightError::ShapeMismatch(format!(
                "labels length {} != row count {}",
                self.labels.len(),
                n_rows
            )));
        }
        if let Some(comments) = &self.comments {
            if comments.len() != n_rows {
                return Err(SvmlightError::ShapeMismatch(format!(
                    "comments length {} != row count {}",
                    comments.len(),
                    n_rows
                )));
            }
        }
        if let Some(qids) = &self.qids {
            if qids.len() != n_rows {
                return Err(SvmlightError::ShapeMismatch(format!(
                    "qids length {} != row count {}",
                    qids.len(),
                    n_rows
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CsrParts;

    fn two_row_dataset() -> CsrDataset {
        CsrDataset::from_parts(CsrParts {
            data: vec![0.5, 1.2, 0.3],
            indices: vec![1, 3, 2],
            row_offsets: vec![0, 2, 3],
            labels: vec![1.0, -1.0],
            comments: None,
            qids: None,
        })
        .unwrap()
    }

    #[test]
    fn test_empty_dataset() {
        let ds = CsrDataset::empty();
        assert_eq!(ds.n_rows(), 0);
        assert_eq!(ds.nnz(), 0);
        assert!(ds.is_empty());
        assert_eq!(ds.row_offsets(), &[0]);
        assert!(ds.validate().is_ok());
    }

    #[test]
    fn test_row_access() {
        let ds = two_row_dataset();
        assert_eq!(ds.n_rows(), 2);
        assert_eq!(ds.nnz(), 3);

        let row0 = ds.row(0);
        assert_eq!(row0.label, 1.0);
        assert_eq!(row0.indices, &[1, 3]);
        assert_eq!(row0.values, &[0.5, 1.2]);
        assert_eq!(row0.comment, None);
        assert_eq!(row0.qid, None);

        let row1 = ds.row(1);
        assert_eq!(row1.label, -1.0);
        assert_eq!(row1.indices, &[2]);
        assert_eq!(row1.values, &[0.3]);
    }

    #[test]
    fn test_rows_iterator() {
        let ds = two_row_dataset();
        let labels: Vec<f64> = ds.rows().map(|r| r.label).collect();
        assert_eq!(labels, vec![1.0, -1.0]);
        assert_eq!(ds.rows().len(), 2);
    }

    #[test]
    #[should_panic]
    fn test_row_out_of_range_panics() {
        let ds = two_row_dataset();
        ds.row(2);
    }

    #[test]
    fn test_validate_rejects_length_mismatch() {
        let result = CsrDataset::from_parts(CsrParts {
            data: vec![1.0, 2.0],
            indices: vec![0],
            row_offsets: vec![0, 2],
            labels: vec![1.0],
            comments: None,
            qids: None,
        });
        assert!(matches!(result, Err(SvmlightError::ShapeMismatch(_))));
    }

    #[test]
    fn test_validate_rejects_decreasing_offsets() {
        let result = CsrDataset::from_parts(CsrParts {
            data: vec![1.0, 2.0],
            indices: vec![0, 1],
            row_offsets: vec![0, 2, 1, 2],
            labels: vec![1.0, -1.0, 1.0],
            comments: None,
            qids: None,
        });
        assert!(matches!(result, Err(SvmlightError::ShapeMismatch(_))));
    }

    #[test]
    fn test_validate_rejects_nonzero_first_offset() {
        let result = CsrDataset::from_parts(CsrParts {
            data: vec![1.0],
            indices: vec![0],
            row_offsets: vec![1, 1],
            labels: vec![1.0],
            comments: None,
            qids: None,
        });
        assert!(matches!(result, Err(SvmlightError::ShapeMismatch(_))));
    }

    #[test]
    fn test_validate_rejects_unclosed_offsets() {
        let result = CsrDataset::from_parts(CsrParts {
            data: vec![1.0, 2.0],
            indices: vec![0, 1],
            row_offsets: vec![0, 1],
            labels: vec![1.0],
            comments: None,
            qids: None,
        });
        assert!(matches!(result, Err(SvmlightError::ShapeMismatch(_))));
    }

    #[test]
    fn test_validate_rejects_short_comment_buffer() {
        let result = CsrDataset::from_parts(CsrParts {
            data: vec![1.0],
            indices: vec![0],
            row_offsets: vec![0, 1],
            labels: vec![1.0],
            comments: Some(vec![]),
            qids: None,
        });
        assert!(matches!(result, Err(SvmlightError::ShapeMismatch(_))));
    }

    #[test]
    fn test_duplicate_indices_pass_through() {
        // The parser never deduplicates; neither does validation.
        let ds = CsrDataset::from_parts(CsrParts {
            data: vec![1.0, 2.0],
            indices: vec![3, 3],
            row_offsets: vec![0, 2],
            labels: vec![1.0],
            comments: None,
            qids: None,
        })
        .unwrap();
        assert_eq!(ds.row(0).indices, &[3, 3]);
    }

    #[test]
    fn test_empty_row_between_full_rows() {
        let ds = CsrDataset::from_parts(CsrParts {
            data: vec![1.0, 2.0],
            indices: vec![0, 1],
            row_offsets: vec![0, 1, 1, 2],
            labels: vec![1.0, -1.0, 1.0],
            comments: None,
            qids: None,
        })
        .unwrap();
        assert_eq!(ds.n_rows(), 3);
        assert_eq!(ds.row(1).indices.len(), 0);
        assert_eq!(ds.row(1).label, -1.0);
    }
}
