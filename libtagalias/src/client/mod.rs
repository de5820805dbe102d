//! HTTP client for registry and token service communication.
//!
//! This module provides a thin blocking client built on reqwest. Every request
//! goes through [`Client::get`], which reports a [`GetOutcome`] instead of an
//! error so that callers can decide which statuses they tolerate.

use crate::auth::{AuthToken, TokenResponse, TokenService, pull_scope};
use crate::digest::Digest;
use crate::error::{Result, TagAliasError};
use reqwest::blocking::Client as HttpClient;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;


/// Media type requested for manifests; its `config.digest` is the alias key.
pub const MANIFEST_V2_MEDIA_TYPE: &str = "application/vnd.docker.distribution.manifest.v2+json";

/// Longest slice of an error body quoted in error messages.
const MAX_ERROR_BODY: usize = 200;

/// Response from the tags list API endpoint.
#[derive(Debug, Deserialize)]
struct TagsResponse {
    /// List of tag names; some registries send `null` for an empty repository
    #[serde(default)]
    tags: Option<Vec<String>>,
}

/// The parts of a v2 image manifest this client reads.
#[derive(Debug, Deserialize)]
struct ManifestResponse {
    config: Option<ConfigDescriptor>,
}

#[derive(Debug, Deserialize)]
struct ConfigDescriptor {
    digest: Option<String>,
}

/// How [`Client::fetch_digest`] treats a 404 from the manifest endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundPolicy {
    /// A missing manifest is an error (used for the target tag).
    Fatal,
    /// A missing manifest means "no digest" (used while scanning candidates).
    Tolerate,
}

/// Result of a single GET request.
#[derive(Debug)]
pub enum GetOutcome {
    /// The server answered 200.
    Success { body: String },
    /// The server answered with any other status.
    HttpError {
        status: u16,
        url: String,
        body: String,
    },
    /// No well-formed response exists (DNS, connect, TLS, timeout, body read).
    TransportError { url: String, source: reqwest::Error },
}

/// Configuration for the HTTP client.
///
/// # Examples
///
/// ```
/// use libtagalias::client::ClientConfig;
///
/// let config = ClientConfig::new().with_timeout(60);
/// assert_eq!(config.timeout_seconds, 60);
/// assert!(config.user_agent.starts_with("tagalias/"));
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout in seconds (default: 30)
    pub timeout_seconds: u64,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            user_agent: format!("tagalias/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the request timeout in seconds.
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }
}

/// Checks that `url` is an absolute http(s) URL and strips trailing slashes.
///
/// # Examples
///
/// ```
/// use libtagalias::client::normalize_url;
///
/// assert_eq!(normalize_url("https://index.docker.io/v2/").unwrap(), "https://index.docker.io/v2");
/// assert!(normalize_url("index.docker.io/v2").is_err());
/// ```
pub fn normalize_url(url: &str) -> Result<String> {
    let url = url.trim();
    if url.is_empty() {
        return Err(TagAliasError::validation("URL cannot be empty"));
    }

    let parsed = Url::parse(url).map_err(|e| {
        TagAliasError::validation_with_source(format!("Invalid URL '{}'", url), e)
    })?;

    match parsed.scheme() {
        "http" | "https" if parsed.has_host() => Ok(url.trim_end_matches('/').to_string()),
        _ => Err(TagAliasError::validation(format!(
            "Invalid URL '{}': expected an http or https URL",
            url
        ))),
    }
}

/// Blocking HTTP client for one registry.
///
/// The registry URL includes the API prefix, e.g. `https://index.docker.io/v2`,
/// so endpoints are built as `<registry_url>/<repository>/...`.
#[derive(Debug, Clone)]
pub struct Client {
    /// The underlying HTTP client
    http_client: HttpClient,
    /// Base registry URL without trailing slash
    registry_url: String,
    /// Request timeout, kept for error messages
    timeout: Duration,
}

impl Client {
    /// Creates a new client for the specified registry URL with default configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use libtagalias::client::Client;
    ///
    /// let client = Client::new("https://index.docker.io/v2/").unwrap();
    /// assert_eq!(client.registry_url(), "https://index.docker.io/v2");
    /// ```
    pub fn new(registry_url: &str) -> Result<Self> {
        Self::with_config(registry_url, ClientConfig::default())
    }

    /// Creates a new client for the specified registry URL with custom configuration.
    pub fn with_config(registry_url: &str, config: ClientConfig) -> Result<Self> {
        let normalized_url = normalize_url(registry_url)?;
        let timeout = Duration::from_secs(config.timeout_seconds);

        let http_client = HttpClient::builder()
            .timeout(timeout)
            .user_agent(config.user_agent)
            .build()
            .map_err(|e| TagAliasError::network_with_source("Failed to create HTTP client", e))?;

        Ok(Self {
            http_client,
            registry_url: normalized_url,
            timeout,
        })
    }

    /// Returns the base registry URL.
    pub fn registry_url(&self) -> &str {
        &self.registry_url
    }

    /// Issues a GET request and captures its status and body.
    ///
    /// Never fails: transport problems come back as
    /// [`GetOutcome::TransportError`] and non-200 statuses as
    /// [`GetOutcome::HttpError`].
    pub fn get(&self, url: &str, headers: HeaderMap) -> GetOutcome {
        let response = match self.http_client.get(url).headers(headers).send() {
            Ok(response) => response,
            Err(source) => {
                return GetOutcome::TransportError {
                    url: url.to_string(),
                    source,
                };
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            let body = response
                .text()
                .unwrap_or_else(|_| String::from("(unable to read response body)"));
            return GetOutcome::HttpError {
                status: status.as_u16(),
                url: url.to_string(),
                body,
            };
        }

        match response.text() {
            Ok(body) => GetOutcome::Success { body },
            Err(source) => GetOutcome::TransportError {
                url: url.to_string(),
                source,
            },
        }
    }

    /// Obtains a pull token for `repository` from the token service.
    ///
    /// Issues `GET <auth>/token?service=<service>&scope=repository:<repository>:pull`
    /// without credentials. Any non-200 answer, including 404, is an
    /// authentication error.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use libtagalias::auth::TokenService;
    /// use libtagalias::client::Client;
    ///
    /// # fn example() -> libtagalias::Result<()> {
    /// let client = Client::new("https://index.docker.io/v2")?;
    /// let service = TokenService::new("https://auth.docker.io", "registry.docker.io");
    /// let token = client.authenticate(&service, "library/nginx")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn authenticate(&self, service: &TokenService, repository: &str) -> Result<AuthToken> {
        let scope = pull_scope(repository);
        let url = Url::parse_with_params(
            &service.token_endpoint(),
            &[("service", service.service.as_str()), ("scope", scope.as_str())],
        )
        .map_err(|e| {
            TagAliasError::validation_with_source(
                format!("Invalid auth service URL '{}'", service.url),
                e,
            )
        })?;

        match self.get(url.as_str(), HeaderMap::new()) {
            GetOutcome::Success { body } => TokenResponse::parse(&body),
            GetOutcome::HttpError { status, url, body } => Err(TagAliasError::authentication(
                format!(
                    "Token request to {} failed: {}",
                    url,
                    Self::summarize_body(&body)
                ),
                Some(status),
            )),
            GetOutcome::TransportError { url, source } => {
                Err(self.translate_reqwest_error(source, &url))
            }
        }
    }

    /// Fetches the tag list for a repository.
    ///
    /// Performs `GET <registry>/<repository>/tags/list` and returns the tags in
    /// the order the registry sent them. Only the first response is read; the
    /// registry's pagination links are not followed.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The registry is unreachable
    /// - The token is rejected (401/403)
    /// - The registry answers with any other non-200 status
    /// - The response cannot be parsed as valid JSON
    pub fn fetch_tag_list(&self, repository: &str, token: &AuthToken) -> Result<Vec<String>> {
        let url = format!("{}/{}/tags/list", self.registry_url, repository);
        let headers = Self::bearer_headers(token)?;

        let body = self.registry_body(self.get(&url, headers))?;

        let tags_response: TagsResponse = serde_json::from_str(&body).map_err(|e| {
            TagAliasError::validation_with_source("Failed to parse tags response", e)
        })?;

        Ok(tags_response.tags.unwrap_or_default())
    }

    /// Resolves a tag to its image configuration digest.
    ///
    /// Performs `GET <registry>/<repository>/manifests/<tag>` asking for a v2
    /// manifest and returns its `config.digest`. Returns `Ok(None)` when the
    /// manifest has no configuration digest, and, under
    /// [`NotFoundPolicy::Tolerate`], when the registry answers 404.
    ///
    /// Transport errors and every other non-200 status are errors regardless
    /// of the policy.
    pub fn fetch_digest(
        &self,
        repository: &str,
        tag: &str,
        token: &AuthToken,
        policy: NotFoundPolicy,
    ) -> Result<Option<Digest>> {
        let url = format!("{}/{}/manifests/{}", self.registry_url, repository, tag);
        let mut headers = Self::bearer_headers(token)?;
        headers.insert(ACCEPT, HeaderValue::from_static(MANIFEST_V2_MEDIA_TYPE));

        let body = match self.registry_body(self.get(&url, headers)) {
            Ok(body) => body,
            Err(e) if policy == NotFoundPolicy::Tolerate && e.is_not_found() => return Ok(None),
            Err(e) => return Err(e),
        };

        let manifest: ManifestResponse = serde_json::from_str(&body).map_err(|e| {
            TagAliasError::validation_with_source(
                format!("Failed to parse manifest for tag '{}'", tag),
                e,
            )
        })?;

        Ok(manifest
            .config
            .and_then(|config| config.digest)
            .and_then(Digest::new))
    }

    fn bearer_headers(token: &AuthToken) -> Result<HeaderMap> {
        let value = HeaderValue::from_str(&token.to_header_value()).map_err(|e| {
            TagAliasError::validation_with_source("Token contains invalid header characters", e)
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, value);
        Ok(headers)
    }

    /// Unwraps a successful registry response or translates the failure.
    fn registry_body(&self, outcome: GetOutcome) -> Result<String> {
        match outcome {
            GetOutcome::Success { body } => Ok(body),
            GetOutcome::HttpError { status, url, body } => {
                Err(Self::status_error(status, &url, &body))
            }
            GetOutcome::TransportError { url, source } => {
                Err(self.translate_reqwest_error(source, &url))
            }
        }
    }

    /// Translates a non-200 registry status into a TagAliasError.
    fn status_error(status: u16, url: &str, body: &str) -> TagAliasError {
        let body = Self::summarize_body(body);
        match StatusCode::from_u16(status) {
            Ok(StatusCode::UNAUTHORIZED) => TagAliasError::authentication(
                format!("Token rejected for {} (expired or missing scope): {}", url, body),
                Some(status),
            ),
            Ok(StatusCode::FORBIDDEN) => TagAliasError::authentication(
                format!("Access forbidden for {}: {}", url, body),
                Some(status),
            ),
            _ => TagAliasError::registry(body, status, url),
        }
    }

    /// Translates a reqwest error into a TagAliasError.
    fn translate_reqwest_error(&self, error: reqwest::Error, url: &str) -> TagAliasError {
        if error.is_timeout() {
            TagAliasError::network_with_source(
                format!(
                    "Request to {} timed out after {} seconds",
                    url,
                    self.timeout.as_secs()
                ),
                error,
            )
        } else if error.is_connect() {
            TagAliasError::network_with_source(format!("Failed to connect to {}", url), error)
        } else if error.is_request() {
            TagAliasError::network_with_source(
                format!("Failed to send request to {}", url),
                error,
            )
        } else {
            TagAliasError::network_with_source(
                format!("Network error communicating with {}", url),
                error,
            )
        }
    }

    fn summarize_body(body: &str) -> String {
        let body = body.trim();
        if body.is_empty() {
            return String::from("(empty response body)");
        }
        match body.char_indices().nth(MAX_ERROR_BODY) {
            Some((cut, _)) => format!("{}...", &body[..cut]),
            None => body.to_string(),
        }
    }
}
