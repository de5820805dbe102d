//! Candidate tag selection.
//!
//! Narrows a repository's tag list down to the tags worth resolving:
//! Windows images are dropped, the user's substring filter is applied, the
//! rest is sorted newest-version-first and capped to a limit.

use std::cmp::Ordering;
use std::num::NonZeroUsize;

#[cfg(test)]
mod tests;

/// Default number of candidate tags to resolve.
pub const DEFAULT_LIMIT: usize = 25;

/// Tags whose name contains this (case-insensitively) are never candidates.
const EXCLUDED_MARKER: &str = "windows";

/// The outcome of [`select_tags`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSelection {
    /// Selected tags, highest version first, at most `limit` of them.
    pub tags: Vec<String>,
    /// Number of tags that passed the filters, before truncation.
    pub matched: usize,
    /// Number of tags in the registry's list, before filtering.
    pub total: usize,
}

impl TagSelection {
    /// Returns true if the limit cut off some matching tags.
    pub fn is_truncated(&self) -> bool {
        self.matched > self.tags.len()
    }
}

/// Filters, orders and caps a tag list.
///
/// An empty `filter` keeps every tag. Matching is a plain, case-sensitive
/// substring test.
///
/// # Examples
///
/// ```
/// use libtagalias::select::select_tags;
/// use std::num::NonZeroUsize;
///
/// let tags: Vec<String> = ["1.9", "1.10", "1.2", "1.10-windows"]
///     .iter()
///     .map(|s| s.to_string())
///     .collect();
/// let selection = select_tags(&tags, "", NonZeroUsize::new(2).unwrap());
/// assert_eq!(selection.tags, vec!["1.10", "1.9"]);
/// assert_eq!(selection.matched, 3);
/// assert_eq!(selection.total, 4);
/// ```
pub fn select_tags(tags: &[String], filter: &str, limit: NonZeroUsize) -> TagSelection {
    let mut selected: Vec<String> = tags
        .iter()
        .filter(|tag| !tag.to_lowercase().contains(EXCLUDED_MARKER))
        .filter(|tag| tag.contains(filter))
        .cloned()
        .collect();

    selected.sort_by(|a, b| version_cmp(b, a));

    let matched = selected.len();
    selected.truncate(limit.get());

    TagSelection {
        tags: selected,
        matched,
        total: tags.len(),
    }
}

/// A maximal run of ASCII digits or of non-digits.
#[derive(Debug, PartialEq, Eq)]
enum Run<'a> {
    Number(&'a str),
    Text(&'a str),
}

fn runs(s: &str) -> Vec<Run<'_>> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut digits = None;

    for (i, c) in s.char_indices() {
        let is_digit = c.is_ascii_digit();
        match digits {
            Some(current) if current != is_digit => {
                out.push(make_run(&s[start..i], current));
                start = i;
            }
            _ => {}
        }
        digits = Some(is_digit);
    }
    if let Some(current) = digits {
        out.push(make_run(&s[start..], current));
    }
    out
}

fn make_run(s: &str, digits: bool) -> Run<'_> {
    if digits { Run::Number(s) } else { Run::Text(s) }
}

/// Compares two digit strings by value, without overflowing on long runs.
fn numeric_cmp(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Version-aware ("natural") comparison of two tags.
///
/// Tags are split into alternating runs of digits and non-digits. Digit runs
/// compare by numeric value, everything else lexicographically, and a tag that
/// runs out of runs first is the lower one. Tags equal under these rules (for
/// example `1.01` and `1.1`) fall back to plain string order so sorting is
/// deterministic.
///
/// # Examples
///
/// ```
/// use libtagalias::select::version_cmp;
/// use std::cmp::Ordering;
///
/// assert_eq!(version_cmp("2.10", "2.9"), Ordering::Greater);
/// assert_eq!(version_cmp("1.7", "1.7.3"), Ordering::Less);
/// ```
pub fn version_cmp(a: &str, b: &str) -> Ordering {
    let left = runs(a);
    let right = runs(b);

    for (l, r) in left.iter().zip(right.iter()) {
        let ordering = match (l, r) {
            (Run::Number(l), Run::Number(r)) => numeric_cmp(l, r),
            (Run::Number(l) | Run::Text(l), Run::Number(r) | Run::Text(r)) => l.cmp(r),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    left.len().cmp(&right.len()).then_with(|| a.cmp(b))
}
