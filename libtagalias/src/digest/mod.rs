//! Content digests.
//!
//! A digest here is the image configuration digest reported by a manifest,
//! e.g. `sha256:4abcf206...`. It is compared byte for byte and never parsed.

use std::fmt;

#[cfg(test)]
mod tests;

/// An opaque, algorithm-prefixed content digest.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Digest(String);

impl Digest {
    /// Wraps a digest string as returned by the registry.
    ///
    /// Returns `None` for an empty (or all-whitespace) value, which registries
    /// produce when a manifest carries no configuration descriptor.
    ///
    /// # Examples
    ///
    /// ```
    /// use libtagalias::Digest;
    ///
    /// assert!(Digest::new("sha256:abc").is_some());
    /// assert!(Digest::new("").is_none());
    /// ```
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            None
        } else {
            Some(Self(value))
        }
    }

    /// Returns the digest as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Digest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
