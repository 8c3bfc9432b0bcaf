//! Anchor Regions.
//!
//! An anchor is a line predicate. The lines satisfying it must form one contiguous
//! run; a gap means the markers are duplicated or ambiguous and the region is rejected
//! instead of guessing which run was meant.

use std::fmt;
use std::ops::RangeInclusive;

use crate::common::error::AnchorError;

/// Line predicate: the line contains both `tag` and `keyword`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorPredicate {
    /// Namespace tag, e.g. `_SS_`.
    pub tag: String,
    /// Region keyword, e.g. `#define`.
    pub keyword: String,
}

impl AnchorPredicate {
    /// Creates a predicate matching lines that contain both `tag` and `keyword`.
    pub fn new(tag: impl Into<String>, keyword: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            keyword: keyword.into(),
        }
    }

    /// Whether `line` satisfies the predicate.
    pub fn matches(&self, line: &str) -> bool {
        line.contains(&self.tag) && line.contains(&self.keyword)
    }
}

impl fmt::Display for AnchorPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` + `{}`", self.tag, self.keyword)
    }
}

/// Inclusive, zero-based line span of an anchor region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorRegion {
    /// Index of the first matching line.
    pub first: usize,
    /// Index of the last matching line.
    pub last: usize,
}

impl AnchorRegion {
    /// Number of lines in the region; never zero.
    pub const fn line_count(self) -> usize {
        self.last - self.first + 1
    }

    /// Line indices covered by the region.
    pub const fn range(self) -> RangeInclusive<usize> {
        self.first..=self.last
    }
}

/// Locates the region of `lines` matching `predicate`.
///
/// # Errors
///
/// * [`AnchorError::Empty`] if no line matches.
/// * [`AnchorError::NonContiguous`] if the matches have gaps.
pub fn locate<S: AsRef<str>>(
    lines: &[S],
    predicate: &AnchorPredicate,
) -> Result<AnchorRegion, AnchorError> {
    locate_by(lines, &predicate.to_string(), |line| predicate.matches(line))
}

/// Locates the region of `lines` matching an arbitrary predicate.
///
/// `anchor` describes the predicate in error messages.
///
/// # Errors
///
/// Same as [`locate`].
pub fn locate_by<S, P>(lines: &[S], anchor: &str, predicate: P) -> Result<AnchorRegion, AnchorError>
where
    S: AsRef<str>,
    P: Fn(&str) -> bool,
{
    let mut matches = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| predicate(line.as_ref()))
        .map(|(index, _)| index);

    let Some(first) = matches.next() else {
        return Err(AnchorError::Empty {
            anchor: anchor.to_string(),
        });
    };
    let (last, count) = matches.fold((first, 1), |(_, count), index| (index, count + 1));

    let region = AnchorRegion { first, last };
    if region.line_count() != count {
        return Err(AnchorError::NonContiguous {
            anchor: anchor.to_string(),
            first,
            last,
            count,
        });
    }

    tracing::trace!(anchor, first, last, "located anchor region");
    Ok(region)
}

/// Checks that every line starting with the predicate's keyword lies inside `region`.
///
/// Leading whitespace is ignored. Lines that merely mention the keyword, such as
/// `#ifdef DECLARE_INSN`, are not entries and are not checked.
///
/// # Errors
///
/// [`AnchorError::Unanchored`] for the first entry outside `region`.
pub fn ensure_complete<S: AsRef<str>>(
    lines: &[S],
    predicate: &AnchorPredicate,
    region: AnchorRegion,
) -> Result<(), AnchorError> {
    let stray = lines
        .iter()
        .map(AsRef::<str>::as_ref)
        .enumerate()
        .position(|(index, line)| {
            line.trim_start().starts_with(predicate.keyword.as_str())
                && !region.range().contains(&index)
        });

    match stray {
        Some(line) => Err(AnchorError::Unanchored {
            anchor: predicate.to_string(),
            keyword: predicate.keyword.clone(),
            line,
        }),
        None => Ok(()),
    }
}

/// Index of the first line containing `marker`.
///
/// # Errors
///
/// [`AnchorError::MarkerNotFound`] if no line contains it.
pub fn find_marker<S: AsRef<str>>(lines: &[S], marker: &str) -> Result<usize, AnchorError> {
    lines
        .iter()
        .position(|line| line.as_ref().contains(marker))
        .ok_or_else(|| AnchorError::MarkerNotFound {
            marker: marker.to_string(),
        })
}
