//! Default values for configuration options.

/// Default configuration file written by `init`.
pub const CONFIG_FILE: &str = "embed-hook.toml";

/// Default HTTP request timeout in seconds.
pub const TIMEOUT_SECS: u64 = 30;

/// Default rate-limit jitter in milliseconds.
pub const JITTER_MS: u64 = 0;

