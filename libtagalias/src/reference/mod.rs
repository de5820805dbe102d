//! Image reference parsing.
//!
//! Turns user input such as `nginx`, `org/app:1.2` or `a/b/c:x` into a
//! repository path and a tag, following Docker Hub conventions:
//! a name without `/` lives under `library/`, and a missing tag means `latest`.

use crate::error::{Result, TagAliasError};
use std::fmt;
use std::str::FromStr;


/// Tag used when the reference does not carry one.
pub const DEFAULT_TAG: &str = "latest";

/// Namespace Docker Hub uses for official images.
pub const OFFICIAL_NAMESPACE: &str = "library";

/// A repository path plus tag, e.g. `library/nginx` and `1.25`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageReference {
    repository: String,
    tag: String,
}

impl FromStr for ImageReference {
    type Err = TagAliasError;

    fn from_str(s: &str) -> Result<Self> {
        let input = s.trim();
        if input.is_empty() {
            return Err(TagAliasError::validation("Image reference cannot be empty"));
        }

        let qualified = if input.contains('/') {
            input.to_string()
        } else {
            format!("{}/{}", OFFICIAL_NAMESPACE, input)
        };

        // A colon followed by a path separator is a registry port, not a tag.
        let (repository, tag) = match qualified.rsplit_once(':') {
            Some((repository, tag)) if !tag.contains('/') => (repository, tag),
            _ => (qualified.as_str(), DEFAULT_TAG),
        };

        if repository.split('/').any(str::is_empty) {
            return Err(TagAliasError::validation(format!(
                "Invalid image reference '{}': repository path has an empty name",
                input
            )));
        }

        let tag = if tag.is_empty() { DEFAULT_TAG } else { tag };

        Ok(Self {
            repository: repository.to_string(),
            tag: tag.to_string(),
        })
    }
}

impl fmt::Display for ImageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.repository, self.tag)
    }
}

impl ImageReference {
    /// Returns the repository path (always at least one `/`-separated segment).
    pub fn repository(&self) -> &str {
        &self.repository
    }

    /// Returns the tag.
    pub fn tag(&self) -> &str {
        &self.tag
    }
}
