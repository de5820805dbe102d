//! Diagnostic output on stderr.
//!
//! Standard output carries nothing but matching tag names, so every message
//! here, including progress, goes to stderr.

use crate::context::{AppContext, VerbosityLevel};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use owo_colors::OwoColorize;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::IsTerminal;
use std::str::FromStr;

/// Trait for output formatting that can be TTY-aware or plain text
pub trait OutputFormatter {
    /// Print a success message
    fn success(&self, message: &str);

    /// Print an error message
    fn error(&self, message: &str);

    /// Print a warning message
    fn warning(&self, message: &str);

    /// Print a diagnostic line tagged with its verbosity level
    fn diagnostic(&self, level: VerbosityLevel, message: &str);

    /// Create a progress bar for determinate progress
    fn progress_bar(&self, len: u64, message: &str) -> ProgressBar;
}

/// TTY-aware formatter with colors and progress indicators
pub struct TtyFormatter;

impl OutputFormatter for TtyFormatter {
    fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green().bold(), message);
    }

    fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red().bold(), message);
    }

    fn warning(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow().bold(), message);
    }

    fn diagnostic(&self, level: VerbosityLevel, message: &str) {
        if level >= VerbosityLevel::Trace {
            eprintln!("{} {}", "debug:".dimmed(), message.dimmed());
        } else {
            eprintln!("{} {}", "·".cyan(), message);
        }
    }

    fn progress_bar(&self, len: u64, message: &str) -> ProgressBar {
        let pb = ProgressBar::with_draw_target(Some(len), ProgressDrawTarget::stderr());
        if let Ok(style) =
            ProgressStyle::default_bar().template("{msg} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
        {
            pb.set_style(style.progress_chars("█▓▒░ "));
        }
        pb.set_message(message.to_string());
        pb
    }
}

/// Plain text formatter for non-TTY output (piped, scripted)
pub struct PlainFormatter;

impl OutputFormatter for PlainFormatter {
    fn success(&self, message: &str) {
        eprintln!("✓ {}", message);
    }

    fn error(&self, message: &str) {
        eprintln!("✗ {}", message);
    }

    fn warning(&self, message: &str) {
        eprintln!("⚠ {}", message);
    }

    fn diagnostic(&self, level: VerbosityLevel, message: &str) {
        if level >= VerbosityLevel::Trace {
            eprintln!("debug: {}", message);
        } else {
            eprintln!("{}", message);
        }
    }

    fn progress_bar(&self, _len: u64, _message: &str) -> ProgressBar {
        ProgressBar::hidden()
    }
}

/// Color output control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Color when stderr is a terminal
    #[default]
    Auto,
    /// Always color
    Always,
    /// Never color
    Never,
}

impl FromStr for ColorChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(ColorChoice::Auto),
            "always" => Ok(ColorChoice::Always),
            "never" => Ok(ColorChoice::Never),
            other => Err(format!(
                "invalid color choice '{}', expected auto, always or never",
                other
            )),
        }
    }
}

impl fmt::Display for ColorChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ColorChoice::Auto => "auto",
            ColorChoice::Always => "always",
            ColorChoice::Never => "never",
        };
        f.write_str(s)
    }
}

/// Decide whether colored output should be used for a color choice
pub fn should_color(choice: ColorChoice) -> bool {
    match choice {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => std::io::stderr().is_terminal(),
    }
}

/// Create the appropriate formatter for a color choice
pub fn create_formatter(choice: ColorChoice) -> Box<dyn OutputFormatter> {
    if should_color(choice) {
        Box::new(TtyFormatter)
    } else {
        Box::new(PlainFormatter)
    }
}

/// Returns true if messages at `level` are shown in this run
pub fn enabled(ctx: &AppContext, level: VerbosityLevel) -> bool {
    ctx.verbosity >= level
}

/// Print a diagnostic message if the run's verbosity allows it
pub fn print(ctx: &AppContext, level: VerbosityLevel, message: &str) {
    if enabled(ctx, level) {
        create_formatter(ctx.color).diagnostic(level, message);
    }
}

/// Print a success message (shown from `-v` on)
pub fn success(ctx: &AppContext, message: &str) {
    if enabled(ctx, VerbosityLevel::Verbose) {
        create_formatter(ctx.color).success(message);
    }
}

/// Print a warning message (shown from `-v` on)
pub fn warning(ctx: &AppContext, message: &str) {
    if enabled(ctx, VerbosityLevel::Verbose) {
        create_formatter(ctx.color).warning(message);
    }
}

/// Print an error, with its chain of causes at trace verbosity
pub fn error(ctx: &AppContext, err: &dyn std::error::Error) {
    let message = if enabled(ctx, VerbosityLevel::Trace) {
        error_chain(err)
    } else {
        err.to_string()
    };
    create_formatter(ctx.color).error(&message);
}

/// Join an error and its sources into one line
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Create the scan progress bar
///
/// The bar is only drawn at normal verbosity on a terminal; verbose runs
/// print per-step lines instead, which a live bar would garble.
pub fn progress_bar(ctx: &AppContext, len: u64, message: &str) -> ProgressBar {
    if ctx.verbosity == VerbosityLevel::Normal && std::io::stderr().is_terminal() {
        create_formatter(ctx.color).progress_bar(len, message)
    } else {
        ProgressBar::hidden()
    }
}
