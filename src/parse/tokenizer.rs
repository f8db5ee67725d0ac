//! Line tokenizer
//!
//! Splits one line (without its trailing newline) into a label token, the
//! ambiguous post-label token, the remaining feature tokens, and the
//! trailing comment. Grammar per line:
//!
//! `<label> [qid:<number>] <index>:<value> <index>:<value> ... [# <comment>]`

use std::str::SplitWhitespace;

use crate::core::{Result, SvmlightError};

/// Tokens of one data-carrying line.
pub(crate) struct LineTokens<'a> {
    /// First whitespace token of the data segment; `None` for a
    /// whitespace-only line (the row parser rejects that as a missing
    /// label).
    pub label: Option<&'a str>,
    /// Token immediately after the label, when any. Ambiguous by format:
    /// a `qid:<number>` marker or the first feature pair. The row parser
    /// tries the qid reading first.
    pub qid_candidate: Option<&'a str>,
    /// Whitespace tokens after the candidate.
    pub features: SplitWhitespace<'a>,
    /// Text after the first `#`, leading whitespace stripped, otherwise
    /// verbatim to end of line.
    pub comment: &'a str,
    /// False when the line carries no `#` at all. A `#` followed by
    /// nothing yields `true` with an empty comment; the format does not
    /// distinguish that from an absent comment downstream.
    pub comment_present: bool,
}

/// Tokenize one line. `Ok(None)` means the line is a full-line comment and
/// produces no row.
pub(crate) fn tokenize(line: &str, line_no: usize) -> Result<Option<LineTokens<'_>>> {
    if line.is_empty() {
        return Err(SvmlightError::EmptyLine { line: line_no });
    }
    if line.trim_start().starts_with('#') {
        return Ok(None);
    }

    let (data_segment, comment, comment_present) = match line.split_once('#') {
        Some((data, rest)) => (data, rest.trim_start(), true),
        None => (line, "", false),
    };

    let mut tokens = data_segment.split_whitespace();
    let label = tokens.next();
    let qid_candidate = tokens.next();

    Ok(Some(LineTokens {
        label,
        qid_candidate,
        features: tokens,
        comment,
        comment_present,
    }))
}
