//! Configuration layer for the `embed-hook` binary.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration with the message already built ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments**
//! 2. **TOML config file** (`--config`)
//! 3. **Built-in defaults**
//!
//! Embed fields are the exception: any `--field` / `--inline-field` on the
//! command line **replaces** the `[[message.fields]]` list of the file
//! instead of extending it.
//!
//! # Boolean Flag Semantics
//!
//! `--timestamp` uses OR semantics with `message.timestamp`: set in either
//! place, the embed is stamped.
//!
//! # Rate Limiting
//!
//! Without `max_attempts` or `max_total_wait` the sender retries rate-limited
//! requests for as long as the endpoint keeps answering 429.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;


pub use cli::{Cli, Command};
pub use error::{ConfigError, field};
pub use self::toml::{TomlConfig, default_config_template};
pub use validated::{ValidatedConfig, write_default_config};
