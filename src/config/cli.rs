//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::defaults;

/// embed-hook: send a rich embed message to a chat webhook
///
/// Builds one embed from the options below (and/or a config file) and
/// posts it, waiting out the endpoint's rate limits.
#[derive(Debug, Parser)]
#[command(name = "embed-hook")]
#[command(version, about, long_about = None)]
#[allow(clippy::struct_excessive_bools)] // CLI flags are naturally boolean
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Webhook URL
    #[arg(long)]
    pub url: Option<String>,

    /// Path to configuration file
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Embed title
    #[arg(long)]
    pub title: Option<String>,

    /// Embed description
    #[arg(long)]
    pub description: Option<String>,

    /// Link attached to the embed title
    #[arg(long)]
    pub link: Option<String>,

    /// Embed color as hex ('#1A2B3C', '0x1A2B3C' or '1A2B3C')
    #[arg(long)]
    pub color: Option<String>,

    /// Author name
    #[arg(long)]
    pub author: Option<String>,

    /// Author link
    #[arg(long = "author-url")]
    pub author_url: Option<String>,

    /// Author icon URL
    #[arg(long = "author-icon")]
    pub author_icon: Option<String>,

    /// Embed field in 'name=value' format (can be specified multiple times)
    #[arg(long = "field", value_name = "NAME=VALUE")]
    pub fields: Vec<String>,

    /// Inline embed field in 'name=value' format, added after --field entries
    #[arg(long = "inline-field", value_name = "NAME=VALUE")]
    pub inline_fields: Vec<String>,

    /// Thumbnail image URL
    #[arg(long)]
    pub thumbnail: Option<String>,

    /// Main image URL
    #[arg(long)]
    pub image: Option<String>,

    /// Footer text
    #[arg(long)]
    pub footer: Option<String>,

    /// Footer icon URL
    #[arg(long = "footer-icon")]
    pub footer_icon: Option<String>,

    /// Stamp the embed with the current time
    #[arg(long)]
    pub timestamp: bool,

    /// Override the webhook's display name
    #[arg(long)]
    pub username: Option<String>,

    /// Override the webhook's avatar
    #[arg(long = "avatar-url")]
    pub avatar_url: Option<String>,

    /// Plain-text content shown above the embed
    #[arg(long)]
    pub content: Option<String>,

    /// Give up after this many rate-limited attempts (default: never)
    #[arg(long = "max-attempts")]
    pub max_attempts: Option<u32>,

    /// Give up once this many seconds were spent waiting on rate limits (default: never)
    #[arg(long = "max-wait", value_name = "SECS")]
    pub max_wait: Option<f64>,

    /// HTTP request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Print the JSON payload instead of sending it
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}

/// Subcommands for embed-hook
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = defaults::CONFIG_FILE)]
        output: PathBuf,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }
}
