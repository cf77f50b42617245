//! Application startup and utilities.
//!
//! This module contains exit codes, tracing setup, and error hints
//! that support the main entry point.

use embed_hook::config::{ConfigError, field};
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// Success (exit code 0).
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Configuration error (exit code 1) - invalid args, missing URL, bad color, etc.
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// Delivery error (exit code 2) - network failure, rejected payload, etc.
    ///
    /// Note: This is a function rather than a constant because `ExitCode::from()` is not `const fn`.
    pub fn delivery_error() -> ExitCode {
        ExitCode::from(2)
    }

    /// Interrupted by Ctrl-C before the delivery finished (exit code 130).
    pub fn interrupted() -> ExitCode {
        ExitCode::from(130)
    }
}

const INIT_HINT: &str = "Run 'embed-hook init' to generate a configuration template.";
const FIELD_HINT: &str = "Fields are written as --field 'Name=Value'.";

/// Prints helpful hints for common configuration errors.
pub fn print_config_hint(error: &ConfigError) {
    if let Some(hint) = config_hint(error) {
        eprintln!("\n{hint}");
    }
}

/// Returns the hint for a configuration error, if there is one.
fn config_hint(error: &ConfigError) -> Option<&'static str> {
    match error {
        ConfigError::MissingRequired {
            field: field::URL, ..
        }
        | ConfigError::FileRead { .. } => Some(INIT_HINT),
        ConfigError::InvalidField { .. } => Some(FIELD_HINT),
        _ => None,
    }
}

/// Sets up the tracing subscriber for logging.
///
/// Logs go to stderr so `--dry-run` output on stdout stays clean.
pub fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
