//! Application context that holds resolved configuration
//!
//! The context is built following the precedence order:
//! 1. Default values
//! 2. Config file values
//! 3. Environment variables
//! 4. CLI flags
//!
//! Everything is validated here, before any request is made. Once built, the
//! context is passed as read-only throughout the application.

use crate::cli::Cli;
use crate::config::{self, Config};
use crate::format::ColorChoice;
use libtagalias::client::normalize_url;
use libtagalias::select::DEFAULT_LIMIT;
use libtagalias::{ImageReference, Result, TagAliasError, TokenService};
use std::num::NonZeroUsize;
use std::time::Duration;

pub const DEFAULT_REGISTRY_URL: &str = "https://index.docker.io/v2";
pub const DEFAULT_AUTH_URL: &str = "https://auth.docker.io";
pub const DEFAULT_SERVICE: &str = "registry.docker.io";
pub const DEFAULT_REQUEST_DELAY_MS: u64 = 500;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

pub const ENV_REGISTRY_URL: &str = "TAGALIAS_REGISTRY_URL";
pub const ENV_AUTH_URL: &str = "TAGALIAS_AUTH_URL";
pub const ENV_SERVICE: &str = "TAGALIAS_SERVICE";
pub const ENV_COLOR: &str = "TAGALIAS_COLOR";
pub const ENV_NO_COLOR: &str = "NO_COLOR";

/// How much diagnostic output goes to stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum VerbosityLevel {
    /// Errors only
    #[default]
    Normal,
    /// Progress lines (-v)
    Verbose,
    /// Per-request lines (-vv)
    VeryVerbose,
    /// Debug detail (-vvv)
    Trace,
}

impl VerbosityLevel {
    /// Map the number of `-v` flags to a level
    pub fn from_count(count: u8) -> Self {
        match count {
            0 => VerbosityLevel::Normal,
            1 => VerbosityLevel::Verbose,
            2 => VerbosityLevel::VeryVerbose,
            _ => VerbosityLevel::Trace,
        }
    }
}

/// Validated settings for one scan
#[derive(Debug, Clone)]
pub struct Settings {
    /// Image whose aliases are looked up
    pub reference: ImageReference,
    /// Registry API base URL, without trailing slash
    pub registry_url: String,
    /// Token service used to authenticate
    pub token_service: TokenService,
    /// Substring candidate tags must contain (empty keeps all)
    pub filter: String,
    /// Maximum number of candidate tags to resolve
    pub limit: NonZeroUsize,
    /// Pause between candidate digest requests
    pub request_delay: Duration,
    /// HTTP request timeout in seconds
    pub timeout_seconds: u64,
}

/// Application context with resolved configuration and runtime state
#[derive(Debug, Clone)]
pub struct AppContext {
    /// Resolved scan settings
    pub settings: Settings,
    /// Diagnostic verbosity
    pub verbosity: VerbosityLevel,
    /// Effective color choice
    pub color: ColorChoice,
}

impl AppContext {
    /// Build context from the process environment and the config file
    pub fn build(cli: &Cli) -> Result<Self> {
        let env = |key: &str| std::env::var(key).ok();
        let config_path = config::get_config_path(&env);
        let file_config = Config::load_optional(&config_path)?.unwrap_or_default();

        Self::resolve(cli, file_config, &env)
    }

    /// Build context with precedence: defaults > config file > env vars > CLI flags
    pub fn resolve(
        cli: &Cli,
        file: Config,
        env: &dyn Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let reference = cli
            .name
            .as_deref()
            .ok_or_else(|| TagAliasError::config("An image reference (-n) is required"))?
            .parse::<ImageReference>()
            .map_err(|e| TagAliasError::config(e.to_string()))?;

        let registry_url = layer(
            DEFAULT_REGISTRY_URL,
            file.registry_url,
            env(ENV_REGISTRY_URL),
            cli.registry.clone(),
        );
        let auth_url = layer(
            DEFAULT_AUTH_URL,
            file.auth_url,
            env(ENV_AUTH_URL),
            cli.auth.clone(),
        );
        let service = layer(DEFAULT_SERVICE, file.service, env(ENV_SERVICE), None);

        let limit = match (cli.limit, file.limit) {
            (Some(limit), _) => limit,
            (None, Some(limit)) => usize::try_from(limit)
                .ok()
                .and_then(NonZeroUsize::new)
                .ok_or_else(|| {
                    TagAliasError::config(format!(
                        "limit must be a positive integer, got {}",
                        limit
                    ))
                })?,
            (None, None) => NonZeroUsize::new(DEFAULT_LIMIT)
                .ok_or_else(|| TagAliasError::config("default limit must be positive"))?,
        };

        let timeout_seconds = cli
            .timeout
            .or(file.timeout_seconds)
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS);
        if timeout_seconds == 0 {
            return Err(TagAliasError::config("timeout must be at least 1 second"));
        }

        let delay_ms = cli
            .delay_ms
            .or(file.request_delay_ms)
            .unwrap_or(DEFAULT_REQUEST_DELAY_MS);

        let filter = cli.filter.clone().or(file.filter).unwrap_or_default();

        let env_color = env(ENV_COLOR)
            .filter(|value| !value.trim().is_empty())
            .map(|value| {
                value
                    .parse::<ColorChoice>()
                    .map_err(|e| TagAliasError::config(format!("{}: {}", ENV_COLOR, e)))
            })
            .transpose()?;
        let mut color = cli
            .color
            .or(env_color)
            .or(file.color)
            .unwrap_or_default();
        if color == ColorChoice::Auto && env(ENV_NO_COLOR).is_some() {
            color = ColorChoice::Never;
        }

        let settings = Settings {
            reference,
            registry_url: validate_url("registry URL", &registry_url)?,
            token_service: TokenService::new(validate_url("auth URL", &auth_url)?, service),
            filter,
            limit,
            request_delay: Duration::from_millis(delay_ms),
            timeout_seconds,
        };

        Ok(Self {
            settings,
            verbosity: VerbosityLevel::from_count(cli.verbose),
            color,
        })
    }
}

/// Pick the highest-precedence value that is set and not blank
fn layer(
    default: &str,
    file: Option<String>,
    env: Option<String>,
    cli: Option<String>,
) -> String {
    [cli, env, file]
        .into_iter()
        .flatten()
        .find(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Normalize a URL setting, reporting failures as configuration errors
fn validate_url(what: &str, value: &str) -> Result<String> {
    normalize_url(value).map_err(|e| {
        TagAliasError::config_with_source(format!("Invalid {} '{}'", what, value.trim()), e)
    })
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
