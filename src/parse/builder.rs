//! Dataset builder and load entry points
//!
//! Owns the growable CSR buffers, drives the row parser over successive
//! lines from a file or an in-memory string, and closes the CSR structure
//! with the final row offset. Both entry points share one code path and one
//! error taxonomy.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::core::{CsrDataset, Result, SvmlightError};
use crate::parse::{row, tokenizer};

/// Floor for the file read-buffer size hint.
pub const MIN_BUFFER_BYTES: usize = 1024 * 1024;

/// Default read-buffer size (the historical loader default of 40 MiB).
pub const DEFAULT_BUFFER_BYTES: usize = 40 * 1024 * 1024;

/// Options controlling a load.
///
/// The read-buffer size is purely an I/O performance hint; it never changes
/// parsing semantics.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    comments: bool,
    qids: bool,
    buffer_bytes: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            comments: false,
            qids: false,
            buffer_bytes: DEFAULT_BUFFER_BYTES,
        }
    }
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture per-row trailing comments into the dataset.
    pub fn with_comments(mut self, enabled: bool) -> Self {
        self.comments = enabled;
        self
    }

    /// Capture per-row `qid:` markers into the dataset (`-1` for rows
    /// without one). Markers are validated and skipped either way.
    pub fn with_qids(mut self, enabled: bool) -> Self {
        self.qids = enabled;
        self
    }

    /// Read-buffer size hint for file loads. Values below 1 MiB are
    /// clamped up.
    pub fn with_buffer_bytes(mut self, bytes: usize) -> Self {
        self.buffer_bytes = bytes;
        self
    }

    pub fn comments(&self) -> bool {
        self.comments
    }

    pub fn qids(&self) -> bool {
        self.qids
    }

    pub fn buffer_bytes(&self) -> usize {
        self.buffer_bytes.max(MIN_BUFFER_BYTES)
    }
}

/// The growing CSR buffers. Appends go through fallible reservation so an
/// allocation failure surfaces as an error instead of an abort.
#[derive(Debug)]
pub(crate) struct CsrBuffers {
    data: Vec<f64>,
    indices: Vec<u32>,
    row_offsets: Vec<u32>,
    labels: Vec<f64>,
    comments: Option<Vec<String>>,
    qids: Option<Vec<i64>>,
}

impl CsrBuffers {
    pub(crate) fn new(options: &LoadOptions) -> Self {
        CsrBuffers {
            data: Vec::new(),
            indices: Vec::new(),
            row_offsets: Vec::new(),
            labels: Vec::new(),
            comments: options.comments().then(Vec::new),
            qids: options.qids().then(Vec::new),
        }
    }

    /// Open a new row: record its start offset and label.
    pub(crate) fn begin_row(&mut self, label: f64) -> Result<()> {
        let start = self.current_offset()?;
        checked_push(&mut self.row_offsets, start)?;
        checked_push(&mut self.labels, label)
    }

    pub(crate) fn push_pair(&mut self, index: u32, value: f64) -> Result<()> {
        checked_push(&mut self.indices, index)?;
        checked_push(&mut self.data, value)
    }

    /// No-op unless comment capture is enabled.
    pub(crate) fn push_comment(&mut self, comment: &str) -> Result<()> {
        if let Some(comments) = &mut self.comments {
            checked_push(comments, comment.to_string())?;
        }
        Ok(())
    }

    /// No-op unless qid capture is enabled.
    pub(crate) fn push_qid(&mut self, qid: i64) -> Result<()> {
        if let Some(qids) = &mut self.qids {
            checked_push(qids, qid)?;
        }
        Ok(())
    }

    /// Close the CSR structure with the final offset and move the buffers
    /// into the dataset. The buffers leave by move; nothing is copied.
    pub(crate) fn finish(mut self) -> Result<CsrDataset> {
        let end = self.current_offset()?;
        checked_push(&mut self.row_offsets, end)?;
        Ok(CsrDataset {
            data: self.data,
            indices: self.indices,
            row_offsets: self.row_offsets,
            labels: self.labels,
            comments: self.comments,
            qids: self.qids,
        })
    }

    // Offsets are u32 like the indices; a dataset whose element count no
    // longer fits cannot be represented in these buffers.
    fn current_offset(&self) -> Result<u32> {
        u32::try_from(self.data.len()).map_err(|_| {
            SvmlightError::Allocation("element count exceeds the u32 offset range".to_string())
        })
    }
}

fn checked_push<T>(buf: &mut Vec<T>, value: T) -> Result<()> {
    if buf.len() == buf.capacity() {
        buf.try_reserve(1)
            .map_err(|e| SvmlightError::Allocation(e.to_string()))?;
    }
    buf.push(value);
    Ok(())
}

/// Accumulates rows line by line and finalizes into a [`CsrDataset`].
///
/// Finalization consumes the builder; it cannot be reused afterwards.
pub struct DatasetBuilder {
    bufs: CsrBuffers,
    line_no: usize,
}

impl DatasetBuilder {
    pub fn new(options: &LoadOptions) -> Self {
        DatasetBuilder {
            bufs: CsrBuffers::new(options),
            line_no: 0,
        }
    }

    /// Parse one input line (without its trailing newline). Full-line
    /// comments produce no row; any syntax error carries this line's
    /// 1-based number.
    pub fn push_line(&mut self, line: &str) -> Result<()> {
        self.line_no += 1;
        match tokenizer::tokenize(line, self.line_no)? {
            Some(tokens) => row::append_row(tokens, line, self.line_no, &mut self.bufs),
            None => Ok(()),
        }
    }

    /// Close the CSR structure (final row offset) and hand the buffers
    /// over by move.
    pub fn finish(self) -> Result<CsrDataset> {
        self.bufs.finish()
    }
}

/// Load a dataset from a svmlight/libsvm text file.
pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<CsrDataset> {
    load_from_path_with_options(path, &LoadOptions::default())
}

/// Load a dataset from a svmlight/libsvm text file with explicit options.
///
/// An unreadable file fails with [`SvmlightError::Io`] before any parsing;
/// the first syntax error aborts the whole load with no partial dataset.
pub fn load_from_path_with_options<P: AsRef<Path>>(
    path: P,
    options: &LoadOptions,
) -> Result<CsrDataset> {
    let file = File::open(path)?;
    let reader = BufReader::with_capacity(options.buffer_bytes(), file);
    let mut builder = DatasetBuilder::new(options);
    for line in reader.lines() {
        builder.push_line(&line?)?;
    }
    builder.finish()
}

/// Parse a dataset from an in-memory string.
pub fn load_from_text(content: &str) -> Result<CsrDataset> {
    load_from_text_with_options(content, &LoadOptions::default())
}

/// Parse a dataset from an in-memory string with explicit options.
/// Semantics and error taxonomy are identical to the file entry point.
pub fn load_from_text_with_options(content: &str, options: &LoadOptions) -> Result<CsrDataset> {
    let mut builder = DatasetBuilder::new(options);
    for line in content.lines() {
        builder.push_line(line)?;
    }
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_basic_text() {
        let ds = load_from_text("+1 1:0.5 3:1.2\n-1 2:0.3 5:2.1\n").unwrap();
        assert_eq!(ds.n_rows(), 2);
        assert_eq!(ds.labels(), &[1.0, -1.0]);
        assert_eq!(ds.indices(), &[1, 3, 2, 5]);
        assert_eq!(ds.data(), &[0.5, 1.2, 0.3, 2.1]);
        assert_eq!(ds.row_offsets(), &[0, 2, 4]);
    }

    #[test]
    fn test_missing_trailing_newline() {
        let ds = load_from_text("+1 1:0.5\n-1 2:0.3").unwrap();
        assert_eq!(ds.n_rows(), 2);
    }

    #[test]
    fn test_empty_input_yields_empty_dataset() {
        let ds = load_from_text("").unwrap();
        assert_eq!(ds.n_rows(), 0);
        assert_eq!(ds.row_offsets(), &[0]);
    }

    #[test]
    fn test_empty_line_aborts_with_line_number() {
        // Line 1 is accepted (label read from the numeric prefix of
        // "1:1"); the empty middle line kills the load.
        let err = load_from_text("1:1 2:2\n\n3:3 4:4").unwrap_err();
        assert!(matches!(err, SvmlightError::EmptyLine { line: 2 }));
    }

    #[test]
    fn test_full_line_comment_produces_no_row() {
        let ds = load_from_text("# header\n+1 1:0.5\n").unwrap();
        assert_eq!(ds.n_rows(), 1);
        assert_eq!(ds.labels(), &[1.0]);
        assert_eq!(ds.indices(), &[1]);
        assert_eq!(ds.data(), &[0.5]);
    }

    #[test]
    fn test_error_on_later_line_reports_its_number() {
        let err = load_from_text("# header\n+1 1:0.5\n+1 1=0.5\n").unwrap_err();
        assert!(matches!(
            err,
            SvmlightError::MalformedFeature { line: 3, ref token, .. } if token == "1=0.5"
        ));
    }

    #[test]
    fn test_offsets_monotonic_with_empty_rows() {
        let ds = load_from_text("1\n2 0:1.0\n3\n").unwrap();
        assert_eq!(ds.row_offsets(), &[0, 0, 1, 1]);
        assert_eq!(ds.labels(), &[1.0, 2.0, 3.0]);
        assert!(ds.validate().is_ok());
    }

    #[test]
    fn test_builder_line_numbers_count_skipped_lines() {
        let mut builder = DatasetBuilder::new(&LoadOptions::new());
        builder.push_line("# one").unwrap();
        builder.push_line("+1 1:1").unwrap();
        let err = builder.push_line("bad").unwrap_err();
        assert_eq!(err.line(), Some(3));
    }

    #[test]
    fn test_comments_and_qids_capture_across_rows() {
        let opts = LoadOptions::new().with_comments(true).with_qids(true);
        let text = "1 qid:1 1:2.5 # an inline comment\n2 qid:37 4:1.0\n3 19:27\n";
        let ds = load_from_text_with_options(text, &opts).unwrap();
        assert_eq!(ds.n_rows(), 3);
        assert_eq!(ds.qids(), Some(&[1, 37, -1][..]));
        assert_eq!(
            ds.comments(),
            Some(
                &[
                    "an inline comment".to_string(),
                    String::new(),
                    String::new()
                ][..]
            )
        );
    }

    #[test]
    fn test_options_buffer_clamped_to_minimum() {
        let opts = LoadOptions::new().with_buffer_bytes(1024);
        assert_eq!(opts.buffer_bytes(), MIN_BUFFER_BYTES);
        let opts = LoadOptions::new().with_buffer_bytes(8 * 1024 * 1024);
        assert_eq!(opts.buffer_bytes(), 8 * 1024 * 1024);
    }

    #[test]
    fn test_load_from_missing_path_is_io_error() {
        let result = load_from_path("/no/such/file.svmlight");
        assert!(matches!(result, Err(SvmlightError::Io(_))));
    }
}
