//! Line Splicing.
//!
//! Two operations rewrite a target text:
//! 1. **Region replacement:** the target's anchor region is replaced by the patched
//!    text's anchor region. Lines outside the region are kept byte for byte.
//! 2. **Marker insertion:** a block is inserted right after the opening brace that
//!    follows a marker line.
//!
//! Lines keep their terminators, so concatenating the result reproduces the file.

use std::borrow::Cow;

use crate::common::error::AnchorError;
use crate::patch::anchor::{self, AnchorPredicate};

/// Predicates locating the same region in the patched and the target text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorPair {
    /// Predicate over the patched (replacement) text.
    pub patched: AnchorPredicate,
    /// Predicate over the target text.
    pub target: AnchorPredicate,
}

/// Splits `text` into lines, each keeping its `\n` terminator.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split_inclusive('\n').collect()
}

/// Appends a newline to `text` unless it is empty or already ends with one.
///
/// Keeps an unterminated last line from fusing with the line spliced after it.
pub fn terminated(text: &str) -> Cow<'_, str> {
    if text.is_empty() || text.ends_with('\n') {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(format!("{text}\n"))
    }
}

/// Replaces the target region of `pair` with the patched region.
///
/// The result has `target.len() - target_region + patched_region` lines.
///
/// # Errors
///
/// [`AnchorError`] if either region is empty or not contiguous.
pub fn splice_lines<'a>(
    patched: &[&'a str],
    target: &[&'a str],
    pair: &AnchorPair,
) -> Result<Vec<&'a str>, AnchorError> {
    let inject = anchor::locate(patched, &pair.patched)?;
    let remove = anchor::locate(target, &pair.target)?;

    let mut out =
        Vec::with_capacity(target.len() - remove.line_count() + inject.line_count());
    out.extend_from_slice(&target[..remove.first]);
    out.extend_from_slice(&patched[inject.range()]);
    out.extend_from_slice(&target[remove.last + 1..]);

    tracing::info!(
        anchor = %pair.target,
        removed = remove.line_count(),
        inserted = inject.line_count(),
        at = remove.first + 1,
        "spliced anchor region"
    );
    Ok(out)
}

/// Text form of [`splice_lines`].
///
/// # Errors
///
/// Same as [`splice_lines`].
pub fn splice(patched: &str, target: &str, pair: &AnchorPair) -> Result<String, AnchorError> {
    let patched = terminated(patched);
    let spliced = splice_lines(&split_lines(&patched), &split_lines(target), pair)?;
    Ok(spliced.concat())
}

/// Inserts `block` after the brace line following the first line containing `marker`.
///
/// # Errors
///
/// * [`AnchorError::MarkerNotFound`] if no line contains `marker`.
/// * [`AnchorError::MissingBrace`] if the next line does not end with `{`.
pub fn insert_after_marker<'a>(
    target: &[&'a str],
    marker: &str,
    block: &[&'a str],
) -> Result<Vec<&'a str>, AnchorError> {
    let brace = anchor::find_marker(target, marker)? + 1;
    let brace_line = match target.get(brace) {
        Some(line) if line.trim_end().ends_with('{') => *line,
        _ => {
            return Err(AnchorError::MissingBrace {
                marker: marker.to_string(),
                line: brace,
            });
        }
    };

    let mut out = Vec::with_capacity(target.len() + block.len() + 1);
    out.extend_from_slice(&target[..=brace]);
    // An unterminated brace line is the last line of the target.
    if !brace_line.ends_with('\n') {
        out.push("\n");
    }
    out.extend_from_slice(block);
    out.extend_from_slice(&target[brace + 1..]);

    tracing::info!(
        marker,
        inserted = block.len(),
        at = brace + 2,
        "inserted block after marker"
    );
    Ok(out)
}

/// Text form of [`insert_after_marker`].
///
/// # Errors
///
/// Same as [`insert_after_marker`].
pub fn insert_block(target: &str, marker: &str, block: &str) -> Result<String, AnchorError> {
    let block = terminated(block);
    let inserted = insert_after_marker(&split_lines(target), marker, &split_lines(&block))?;
    Ok(inserted.concat())
}
