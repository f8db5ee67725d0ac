//! Core types and errors for the svmlight/libsvm codec

pub mod error;
pub mod handoff;
pub mod types;

pub use self::error::*;
pub use self::handoff::*;
pub use self::types::*;
