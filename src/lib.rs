//! Loader and writer for the svmlight / libsvm sparse dataset format
//!
//! Parses text of the form `label index:value index:value ...` (one record
//! per line) into a compressed-sparse-row (CSR) dataset, and writes CSR
//! datasets back out. The parsed buffers are handed to the caller by move,
//! without copying.

pub mod core;
pub mod parse;
pub mod stats;
pub mod writer;

// Re-export main types for convenience
pub use crate::core::{CsrDataset, CsrParts, Result, RowView, SvmlightError};
pub use crate::parse::{
    load_from_path, load_from_path_with_options, load_from_text, load_from_text_with_options,
    DatasetBuilder, LoadOptions, DEFAULT_BUFFER_BYTES, MIN_BUFFER_BYTES,
};
pub use crate::stats::DatasetStats;
pub use crate::writer::{dump_to_path, dump_to_string, dump_to_writer};

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
