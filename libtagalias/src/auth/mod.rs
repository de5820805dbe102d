//! Bearer token handling.
//!
//! Registries such as Docker Hub delegate authentication to a separate token
//! service. The client asks that service for a token scoped to pulling one
//! repository and presents it on every registry request of the run.

use crate::error::{Result, TagAliasError};
use serde::Deserialize;
use std::fmt;


/// The token service that issues bearer tokens for a registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenService {
    /// Base URL of the auth service (e.g. "https://auth.docker.io")
    pub url: String,
    /// Service name the token is issued for (e.g. "registry.docker.io")
    pub service: String,
}

impl TokenService {
    /// Creates a token service description.
    ///
    /// # Examples
    ///
    /// ```
    /// use libtagalias::auth::TokenService;
    ///
    /// let service = TokenService::new("https://auth.docker.io/", "registry.docker.io");
    /// assert_eq!(service.token_endpoint(), "https://auth.docker.io/token");
    /// ```
    pub fn new(url: impl Into<String>, service: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            service: service.into(),
        }
    }

    /// Returns the token endpoint URL, without query parameters.
    pub fn token_endpoint(&self) -> String {
        format!("{}/token", self.url.trim().trim_end_matches('/'))
    }
}

/// Returns the scope requesting pull access to a repository.
///
/// # Examples
///
/// ```
/// use libtagalias::auth::pull_scope;
///
/// assert_eq!(pull_scope("library/nginx"), "repository:library/nginx:pull");
/// ```
pub fn pull_scope(repository: &str) -> String {
    format!("repository:{}:pull", repository)
}

/// A bearer token, held in memory for a single run.
///
/// Expiry is not tracked: once the token service's validity window passes,
/// the registry answers 401 and the affected request fails.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    /// Wraps a raw token string.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the `Authorization` header value for this token.
    ///
    /// # Examples
    ///
    /// ```
    /// use libtagalias::AuthToken;
    ///
    /// let token = AuthToken::new("abc123");
    /// assert_eq!(token.to_header_value(), "Bearer abc123");
    /// ```
    pub fn to_header_value(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

// Tokens are credentials; keep them out of debug output.
impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

/// Body of a token service response.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    token: Option<String>,
    access_token: Option<String>,
}

impl TokenResponse {
    /// Parses a token service response body into a token.
    ///
    /// `token` is preferred; `access_token` is accepted from OAuth2-style
    /// services that only send that field.
    pub(crate) fn parse(body: &str) -> Result<AuthToken> {
        let response: TokenResponse = serde_json::from_str(body).map_err(|e| {
            TagAliasError::authentication(format!("Malformed token response: {}", e), Some(200))
        })?;

        [response.token, response.access_token]
            .into_iter()
            .flatten()
            .find(|t| !t.is_empty())
            .map(AuthToken::new)
            .ok_or_else(|| {
                TagAliasError::authentication("Token response did not contain a token", Some(200))
            })
    }
}
