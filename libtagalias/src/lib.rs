//! tagalias - find tags that share an image's content
//!
//! Given a repository and a tag, this library resolves the tag's image
//! configuration digest through a registry's v2 HTTP API and finds the other
//! tags in the repository that resolve to the same digest.
//!
//! # Quick Start
//!
//! ```no_run
//! use libtagalias::client::NotFoundPolicy;
//! use libtagalias::{
//!     Client, DigestMatcher, ImageReference, TagAliasError, TokenService, select_tags,
//! };
//! use std::num::NonZeroUsize;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let reference: ImageReference = "nginx:1.25".parse()?;
//!     let client = Client::new("https://index.docker.io/v2")?;
//!     let service = TokenService::new("https://auth.docker.io", "registry.docker.io");
//!
//!     let token = client.authenticate(&service, reference.repository())?;
//!     let tags = client.fetch_tag_list(reference.repository(), &token)?;
//!     let selection = select_tags(&tags, "1.25", NonZeroUsize::new(25).unwrap());
//!
//!     let target = client
//!         .fetch_digest(reference.repository(), reference.tag(), &token, NotFoundPolicy::Fatal)?
//!         .ok_or_else(|| TagAliasError::missing_digest(reference.to_string()))?;
//!
//!     let matcher = DigestMatcher::default();
//!     for tag in matcher.find_matches(&target, &selection.tags, |tag| {
//!         client.fetch_digest(reference.repository(), tag, &token, NotFoundPolicy::Tolerate)
//!     }) {
//!         println!("{}", tag?);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Main Types
//!
//! - [`ImageReference`] - repository path and tag parsed from user input
//! - [`Client`] - blocking registry and token service client
//! - [`select_tags`] - candidate filtering and version ordering
//! - [`DigestMatcher`] - lazy, throttled digest comparison

#![warn(clippy::all)]

/// Returns the libtagalias crate version.
///
/// # Examples
///
/// ```
/// let version = libtagalias::version();
/// assert!(!version.is_empty());
/// ```
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub use auth::{AuthToken, TokenService};
pub use client::{Client, ClientConfig, NotFoundPolicy};
pub use digest::Digest;
pub use error::{Result, TagAliasError};
pub use matcher::{DigestMatcher, Matches};
pub use reference::ImageReference;
pub use select::{TagSelection, select_tags, version_cmp};

pub mod auth;
pub mod client;
pub mod digest;
pub mod error;
pub mod matcher;
pub mod reference;
pub mod select;
