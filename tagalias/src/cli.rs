use crate::format::ColorChoice;
use clap::{ArgAction, Parser};
use std::num::NonZeroUsize;

/// Tagalias - find the tags that point at the same image
///
/// Resolves the digest of an image tag and lists every other tag of the
/// repository that carries the same digest, newest first.
#[derive(Parser, Debug, Default)]
#[command(name = "tagalias")]
#[command(about, long_about = None, disable_version_flag = true)]
pub struct Cli {
    /// Image reference, e.g. nginx:1.25 or org/app:tag
    #[arg(short, long, value_name = "IMAGE", required_unless_present = "version")]
    pub name: Option<String>,

    /// Registry API base URL [default: https://index.docker.io/v2]
    #[arg(short, long, value_name = "URL")]
    pub registry: Option<String>,

    /// Token service base URL [default: https://auth.docker.io]
    #[arg(short, long, value_name = "URL")]
    pub auth: Option<String>,

    /// Maximum number of candidate tags to check [default: 25]
    #[arg(short, long, value_name = "N", value_parser = parse_limit)]
    pub limit: Option<NonZeroUsize>,

    /// Only check tags containing this substring
    #[arg(short, long, value_name = "TEXT")]
    pub filter: Option<String>,

    /// Pause between digest requests in milliseconds [default: 500]
    #[arg(long = "delay", value_name = "MS")]
    pub delay_ms: Option<u64>,

    /// HTTP request timeout in seconds [default: 30]
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Control colored output
    #[arg(long, value_enum)]
    pub color: Option<ColorChoice>,

    /// Display version information
    #[arg(short = 'V', long)]
    pub version: bool,
}

/// Parse a strictly positive tag limit
fn parse_limit(value: &str) -> Result<NonZeroUsize, String> {
    let limit: usize = value
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", value))?;
    NonZeroUsize::new(limit).ok_or_else(|| "limit must be at least 1".to_string())
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
