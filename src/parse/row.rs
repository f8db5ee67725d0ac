//! Row parser
//!
//! Validates the tokens of one line and appends exactly one row to the
//! builder's buffers, or fails with a syntax error naming the line and the
//! offending token. Feature indices and values are appended in encounter
//! order: no deduplication, no sorting, no range checks.

use crate::core::{Result, SvmlightError};
use crate::parse::builder::CsrBuffers;
use crate::parse::tokenizer::LineTokens;

/// Append one row to `bufs` from the tokenized line.
pub(crate) fn append_row(
    mut tokens: LineTokens<'_>,
    line: &str,
    line_no: usize,
    bufs: &mut CsrBuffers,
) -> Result<()> {
    // Absent marker and empty comment text are indistinguishable downstream.
    debug_assert!(tokens.comment_present || tokens.comment.is_empty());

    // The label reads as a stream extraction would: longest numeric prefix
    // of the first token, remainder of the token discarded.
    let label_token = tokens.label.unwrap_or("");
    let label = parse_label(label_token).ok_or_else(|| SvmlightError::InvalidLabel {
        line: line_no,
        token: label_token.to_string(),
        text: line.to_string(),
    })?;

    // The token after the label is ambiguous: `qid:<n>` marker or first
    // feature pair. Try the qid reading first, fall back to a feature pair,
    // and only then give up.
    let mut qid = -1i64;
    let mut leading_pair = None;
    if let Some(token) = tokens.qid_candidate {
        match parse_qid(token) {
            Some(q) => qid = q,
            None => match try_parse_feature(token) {
                Some(pair) => leading_pair = Some(pair),
                None => {
                    return Err(if token.starts_with("qid:") {
                        SvmlightError::MalformedToken {
                            line: line_no,
                            token: token.to_string(),
                            text: line.to_string(),
                        }
                    } else {
                        SvmlightError::MalformedFeature {
                            line: line_no,
                            token: token.to_string(),
                            text: line.to_string(),
                        }
                    })
                }
            },
        }
    }

    bufs.begin_row(label)?;
    bufs.push_comment(tokens.comment)?;
    bufs.push_qid(qid)?;

    if let Some((index, value)) = leading_pair {
        bufs.push_pair(index, value)?;
    }
    for token in &mut tokens.features {
        let (index, value) = try_parse_feature(token).ok_or_else(|| {
            SvmlightError::MalformedFeature {
                line: line_no,
                token: token.to_string(),
                text: line.to_string(),
            }
        })?;
        bufs.push_pair(index, value)?;
    }
    Ok(())
}

/// Longest prefix of `token` that reads as a decimal number: optional sign,
/// digits with at most one `.`, optional exponent. `None` when the token
/// does not start with a number at all.
fn numeric_prefix(token: &str) -> Option<&str> {
    let bytes = token.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let mut saw_digit = false;
    let mut saw_dot = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => {
                saw_digit = true;
                end += 1;
            }
            b'.' if !saw_dot => {
                saw_dot = true;
                end += 1;
            }
            _ => break,
        }
    }
    if !saw_digit {
        return None;
    }
    // An exponent counts only when it carries digits of its own.
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > digits_start {
            end = exp_end;
        }
    }
    Some(&token[..end])
}

fn parse_label(token: &str) -> Option<f64> {
    numeric_prefix(token)?
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

fn parse_finite(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_qid(token: &str) -> Option<i64> {
    token.strip_prefix("qid:")?.parse::<i64>().ok()
}

fn try_parse_feature(token: &str) -> Option<(u32, f64)> {
    let (index, value) = token.split_once(':')?;
    let index = index.parse::<u32>().ok()?;
    let value = parse_finite(value)?;
    Some((index, value))
}
