//! Append-only script diffing
//!
//! The applied script is stored verbatim. A new script is valid when the
//! applied text is a literal prefix of it and the remainder opens with the
//! [`SENTINEL`] comment. No statement parsing happens here: the comparison is
//! byte-for-byte.

use thiserror::Error;

/// Marker every newly appended segment must start with
pub const SENTINEL: &str = "-- sql-up";

/// Longest excerpt of a rejected diff echoed back in errors
const PREVIEW_CHARS: usize = 40;

/// Result of comparing the applied script with the new one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diff<'a> {
    /// The new script is identical to the applied one
    UpToDate,
    /// Unapplied suffix of the new script, starting with the sentinel
    Pending(&'a str),
}

/// Reasons a new script cannot be applied on top of the stored one
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiffError {
    /// The applied script is not a prefix of the new one (edited in place or truncated)
    #[error("applied script is not a prefix of the new script (diverges at line {line})")]
    PrefixMismatch { line: usize },

    /// The appended text does not start with the sentinel
    #[error("new sql content does not start with '-- sql-up' (found {found:?})")]
    MissingSentinel { found: String },
}

/// Compute the part of `script` that still has to run, given the `applied` text.
pub fn compute_diff<'a>(applied: &str, script: &'a str) -> Result<Diff<'a>, DiffError> {
    if applied == script {
        return Ok(Diff::UpToDate);
    }

    let Some(rest) = script.strip_prefix(applied) else {
        let offset = common_prefix_len(applied, script);
        return Err(DiffError::PrefixMismatch {
            line: line_at(script, offset),
        });
    };

    if !rest.starts_with(SENTINEL) {
        return Err(DiffError::MissingSentinel {
            found: preview(rest),
        });
    }

    Ok(Diff::Pending(rest))
}

/// Byte length of the longest common prefix, on a char boundary of both inputs.
fn common_prefix_len(a: &str, b: &str) -> usize {
    a.char_indices()
        .zip(b.chars())
        .find(|((_, ca), cb)| ca != cb)
        .map(|((i, _), _)| i)
        .unwrap_or_else(|| a.len().min(b.len()))
}

/// 1-based line number containing byte `offset` of `text`.
fn line_at(text: &str, offset: usize) -> usize {
    text[..offset].matches('\n').count() + 1
}

fn preview(text: &str) -> String {
    let first_line = text.lines().next().unwrap_or("");
    first_line.chars().take(PREVIEW_CHARS).collect()
}

#[cfg(test)]
#[path = "script_test.rs"]
mod tests;
