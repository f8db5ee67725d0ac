//! Serializer: CSR dataset back to svmlight/libsvm text
//!
//! The inverse of the parser: one line per row, `<label> <index>:<value>
//! ...`, an optional trailing `# <comment>`, written in a single forward
//! pass. Indices can be emitted 0-based (as stored) or 1-based.
//!
//! Values and labels are formatted with Rust's shortest round-trip `f64`
//! representation, so `load(dump(x))` recovers every buffer exactly.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::core::{CsrDataset, Result, SvmlightError};

/// Write the dataset to a file in svmlight/libsvm format.
///
/// Fails with [`crate::SvmlightError::Io`] if the file cannot be created or
/// written; a partially written file is not rolled back (use a temporary
/// file if atomicity is required). Fails with
/// [`crate::SvmlightError::ShapeMismatch`] before writing anything if the
/// dataset's buffers are inconsistent.
pub fn dump_to_path<P: AsRef<Path>>(path: P, dataset: &CsrDataset, zero_based: bool) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    dump_to_writer(&mut writer, dataset, zero_based)?;
    writer.flush()?;
    Ok(())
}

/// Write the dataset to an arbitrary writer, row by row.
pub fn dump_to_writer<W: Write>(mut writer: W, dataset: &CsrDataset, zero_based: bool) -> Result<()> {
    dataset.validate()?;
    for row in dataset.rows() {
        write!(writer, "{}", row.label)?;
        for (&index, &value) in row.indices.iter().zip(row.values) {
            // Widened so index u32::MAX survives the 1-based shift.
            let index = if zero_based {
                index as u64
            } else {
                index as u64 + 1
            };
            write!(writer, " {index}:{value}")?;
        }
        if let Some(comment) = row.comment {
            if !comment.is_empty() {
                write!(writer, " # {comment}")?;
            }
        }
        writeln!(writer)?;
    }
    Ok(())
}

/// Serialize the dataset to a `String`.
pub fn dump_to_string(dataset: &CsrDataset, zero_based: bool) -> Result<String> {
    let mut out = Vec::new();
    dump_to_writer(&mut out, dataset, zero_based)?;
    String::from_utf8(out).map_err(|e| SvmlightError::Serialization(e.to_string()))
}
