//! Streaming parser for the svmlight/libsvm text format
//!
//! The pipeline is tokenizer -> row parser -> dataset builder: each input
//! line is split into tokens, validated, and appended to the growing CSR
//! buffers. The first syntax error aborts the whole load.

pub mod builder;
mod row;
mod tokenizer;

pub use self::builder::*;
