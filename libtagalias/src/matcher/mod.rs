//! Digest matching across candidate tags.
//!
//! [`DigestMatcher::find_matches`] walks the candidate tags in order, resolves
//! each one's digest through a caller-supplied function and yields the tags
//! whose digest equals the target's. The walk is lazy: each call to `next`
//! performs only the requests needed to reach the next match, so results can
//! be reported as they are found.

use crate::digest::Digest;
use crate::error::Result;
use std::thread;
use std::time::Duration;


/// Default pause between two candidate digest requests.
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_millis(500);

/// Resolves candidate tags and compares them to a target digest.
///
/// The matcher is sequential and applies a fixed delay between consecutive
/// digest requests to keep the request rate against the registry low.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigestMatcher {
    delay: Duration,
}

impl Default for DigestMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_REQUEST_DELAY)
    }
}

impl DigestMatcher {
    /// Creates a matcher that waits `delay` between digest requests.
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Returns a lazy iterator over the candidates whose digest equals `target`.
    ///
    /// `resolve` maps a tag to its digest; `Ok(None)` means the tag has no
    /// digest available (for instance a tolerated 404) and is skipped. An
    /// `Err` is yielded once and ends the iteration.
    ///
    /// Every candidate is visited: the scan does not stop at the first match.
    ///
    /// # Examples
    ///
    /// ```
    /// use libtagalias::{Digest, DigestMatcher};
    /// use std::time::Duration;
    ///
    /// let target = Digest::new("sha256:aaa").unwrap();
    /// let candidates = vec!["1.0".to_string(), "1.1".to_string(), "stable".to_string()];
    /// let matcher = DigestMatcher::new(Duration::ZERO);
    ///
    /// let matches: Vec<&str> = matcher
    ///     .find_matches(&target, &candidates, |tag| {
    ///         Ok(Digest::new(if tag == "1.1" { "sha256:bbb" } else { "sha256:aaa" }))
    ///     })
    ///     .collect::<libtagalias::Result<_>>()
    ///     .unwrap();
    /// assert_eq!(matches, vec!["1.0", "stable"]);
    /// ```
    pub fn find_matches<'a, F>(
        &self,
        target: &'a Digest,
        candidates: &'a [String],
        resolve: F,
    ) -> Matches<'a, F>
    where
        F: FnMut(&str) -> Result<Option<Digest>>,
    {
        Matches {
            target,
            candidates: candidates.iter(),
            resolve,
            delay: self.delay,
            visited: 0,
        }
    }
}

/// Iterator returned by [`DigestMatcher::find_matches`].
pub struct Matches<'a, F> {
    target: &'a Digest,
    candidates: std::slice::Iter<'a, String>,
    resolve: F,
    delay: Duration,
    visited: usize,
}

impl<'a, F> Matches<'a, F> {
    /// Number of candidates resolved so far.
    pub fn visited(&self) -> usize {
        self.visited
    }
}

impl<'a, F> Iterator for Matches<'a, F>
where
    F: FnMut(&str) -> Result<Option<Digest>>,
{
    type Item = Result<&'a str>;

    fn next(&mut self) -> Option<Self::Item> {
        #[allow(clippy::while_let_on_iterator)]
        while let Some(tag) = self.candidates.next() {
            if self.visited > 0 && !self.delay.is_zero() {
                thread::sleep(self.delay);
            }
            self.visited += 1;

            match (self.resolve)(tag) {
                Ok(Some(digest)) if digest == *self.target => return Some(Ok(tag.as_str())),
                Ok(_) => continue,
                Err(e) => {
                    // Fuse: nothing is resolved after a fatal error.
                    self.candidates = [].iter();
                    return Some(Err(e));
                }
            }
        }
        None
    }
}
