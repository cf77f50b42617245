//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Webhook endpoint configuration
    #[serde(default)]
    pub webhook: WebhookSection,

    /// Rate-limit strategy configuration
    #[serde(default)]
    pub rate_limit: RateLimitSection,

    /// Message to send
    #[serde(default)]
    pub message: MessageSection,
}

/// Webhook endpoint section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WebhookSection {
    /// Webhook URL
    pub url: Option<String>,

    /// HTTP request timeout in seconds
    pub timeout: Option<u64>,
}

/// Rate-limit strategy section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RateLimitSection {
    /// Maximum number of POST requests per delivery
    pub max_attempts: Option<u32>,

    /// Maximum total seconds spent waiting on rate limits
    pub max_total_wait: Option<f64>,

    /// Upper bound of the random extra added to each pause, in milliseconds
    pub jitter_ms: Option<u64>,
}

/// Message section: the payload and its single embed.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MessageSection {
    /// Display name override
    pub username: Option<String>,

    /// Avatar override
    pub avatar_url: Option<String>,

    /// Plain-text content
    pub content: Option<String>,

    /// Embed title
    pub title: Option<String>,

    /// Embed description
    pub description: Option<String>,

    /// Link attached to the title
    pub url: Option<String>,

    /// Hex color code
    pub color: Option<String>,

    /// Stamp the embed with the send time
    #[serde(default)]
    pub timestamp: bool,

    /// Thumbnail image URL
    pub thumbnail: Option<String>,

    /// Main image URL
    pub image: Option<String>,

    /// Author line
    pub author: Option<AuthorSection>,

    /// Footer line
    pub footer: Option<FooterSection>,

    /// Embed fields, in display order
    #[serde(default)]
    pub fields: Vec<FieldSection>,
}

/// `[message.author]` table.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthorSection {
    /// Author name
    pub name: String,

    /// Author link
    #[serde(default)]
    pub url: String,

    /// Author icon URL
    #[serde(default)]
    pub icon_url: String,
}

/// `[message.footer]` table.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FooterSection {
    /// Footer text
    pub text: String,

    /// Footer icon URL
    #[serde(default)]
    pub icon_url: String,
}

/// `[[message.fields]]` entry.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldSection {
    /// Field heading
    pub name: String,

    /// Field body
    pub value: String,

    /// Render alongside adjacent inline fields
    #[serde(default)]
    pub inline: bool,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r##"# embed-hook configuration file

[webhook]
# Webhook URL (required, can be overridden by --url)
# url = "https://discord.com/api/webhooks/<id>/<token>"

# HTTP request timeout in seconds (default: 30)
# timeout = 30

[rate_limit]
# Without max_attempts or max_total_wait, rate-limited requests are retried
# for as long as the endpoint keeps answering 429.

# Maximum number of POST requests per delivery
# max_attempts = 10

# Maximum total seconds spent waiting on rate limits
# max_total_wait = 120.0

# Random extra (milliseconds) added to each rate-limit pause (default: 0)
# jitter_ms = 250

[message]
# username = "Release Bot"
# avatar_url = "https://example.com/avatar.png"
# content = "New release published"

title = "Hello from embed-hook"
# description = "Markdown **is** supported"
# url = "https://example.com"
# color = "#5865F2"
# timestamp = true
# thumbnail = "https://example.com/thumb.png"
# image = "https://example.com/banner.png"

# [message.author]
# name = "embed-hook"
# url = "https://example.com"
# icon_url = "https://example.com/icon.png"

# [message.footer]
# text = "Sent by embed-hook"
# icon_url = "https://example.com/footer.png"

# Note: --field / --inline-field on the command line REPLACE this list
# [[message.fields]]
# name = "Version"
# value = "1.2.3"
# inline = true
"##
    .to_string()
}
