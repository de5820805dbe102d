//! Error types for tagalias
//!
//! Every failure the alias scan can hit is one of these variants. Callers
//! decide which ones are fatal; the only recoverable case is a 404 from a
//! candidate tag's manifest, identified by [`TagAliasError::is_not_found`].

use thiserror::Error;

#[cfg(test)]
mod tests;

/// Main error type for tagalias operations
#[derive(Error, Debug)]
pub enum TagAliasError {
    /// Invalid configuration or command-line input, detected before any request
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Malformed input or response content (empty reference, bad JSON, bad URL)
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Token endpoint failures and 401/403 from the registry
    #[error("Authentication error (status: {status_code:?}): {message}")]
    Authentication {
        message: String,
        status_code: Option<u16>,
    },

    /// Non-200 response from a tag-list or manifest request
    #[error("Registry error (status: {status_code}) for {url}: {message}")]
    Registry {
        message: String,
        status_code: u16,
        url: String,
    },

    /// Transport failures (DNS, connection refused, TLS, timeout)
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The target tag did not resolve to a configuration digest
    #[error("No digest found for {reference}")]
    MissingDigest { reference: String },

    /// Writing results failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for tagalias operations
pub type Result<T> = std::result::Result<T, TagAliasError>;

impl TagAliasError {
    /// Creates a new configuration error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libtagalias::error::TagAliasError;
    ///
    /// let err = TagAliasError::config("limit must be a positive integer");
    /// assert!(matches!(err, TagAliasError::Config { .. }));
    /// ```
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new configuration error with a source error.
    pub fn config_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new validation error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libtagalias::error::TagAliasError;
    ///
    /// let err = TagAliasError::validation("image reference cannot be empty");
    /// assert!(matches!(err, TagAliasError::Validation { .. }));
    /// ```
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new validation error with a source error.
    pub fn validation_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Validation {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new authentication error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libtagalias::error::TagAliasError;
    ///
    /// let err = TagAliasError::authentication("token request rejected", Some(401));
    /// assert!(matches!(err, TagAliasError::Authentication { .. }));
    /// ```
    pub fn authentication<S: Into<String>>(message: S, status_code: Option<u16>) -> Self {
        Self::Authentication {
            message: message.into(),
            status_code,
        }
    }

    /// Creates a new registry error for a non-200 response.
    ///
    /// # Examples
    ///
    /// ```
    /// use libtagalias::error::TagAliasError;
    ///
    /// let err = TagAliasError::registry("manifest unknown", 404, "https://r.example/v2/a/manifests/x");
    /// assert!(err.is_not_found());
    /// ```
    pub fn registry<S, U>(message: S, status_code: u16, url: U) -> Self
    where
        S: Into<String>,
        U: Into<String>,
    {
        Self::Registry {
            message: message.into(),
            status_code,
            url: url.into(),
        }
    }

    /// Creates a new network error with a source error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libtagalias::error::TagAliasError;
    /// use std::io;
    ///
    /// let io_err = io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused");
    /// let err = TagAliasError::network_with_source("failed to connect", io_err);
    /// assert!(matches!(err, TagAliasError::Network { .. }));
    /// ```
    pub fn network_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Network {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new missing-digest error for the given reference.
    pub fn missing_digest<S: Into<String>>(reference: S) -> Self {
        Self::MissingDigest {
            reference: reference.into(),
        }
    }

    /// Creates a new I/O error.
    pub fn io<S: Into<String>>(message: S, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Returns true for a registry 404, the one status a candidate scan may skip.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Registry {
                status_code: 404,
                ..
            }
        )
    }
}
