//! Validated configuration after merging CLI and TOML sources.
//!
//! All validation happens during construction, including building the
//! message itself, so a bad color code is reported before anything is sent.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use url::Url;

use crate::embed::Payload;
use crate::webhook::RateLimitPolicy;

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::{MessageSection, TomlConfig};

/// Fully validated configuration ready for use by the application.
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and an
/// optional TOML config, or [`ValidatedConfig::load`] to read the file
/// named by `--config`.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Webhook URL (required)
    pub url: Url,

    /// HTTP request timeout
    pub timeout: Duration,

    /// Strategy applied to 429 responses
    pub rate_limit: RateLimitPolicy,

    /// The message to send
    pub payload: Payload,

    /// Dry-run mode (print the payload instead of sending it)
    pub dry_run: bool,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The URL path carries the webhook token; only the host is shown.
        let host = self.url.host_str().unwrap_or("<none>");
        let max_attempts = self
            .rate_limit
            .max_attempts
            .map_or_else(|| "unbounded".to_string(), |n| n.to_string());
        let max_wait = self
            .rate_limit
            .max_total_wait
            .map_or_else(|| "unbounded".to_string(), |d| format!("{d:?}"));

        write!(
            f,
            "Config {{ host: {host}, timeout: {}s, max_attempts: {max_attempts}, \
             max_wait: {max_wait}, jitter: {:?}, embeds: {}, dry_run: {} }}",
            self.timeout.as_secs(),
            self.rate_limit.jitter,
            self.payload.embeds().len(),
            self.dry_run,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The URL is missing or invalid
    /// - The timeout is zero
    /// - Rate-limit values are out of range
    /// - A `--field` argument is malformed
    /// - The color code is not valid hex
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let url = Self::resolve_url(cli, toml)?;
        let timeout = Self::resolve_timeout(cli, toml)?;
        let rate_limit = Self::build_rate_limit(cli, toml)?;
        let payload = Self::build_payload(cli, toml.map(|t| &t.message))?;

        Ok(Self {
            url,
            timeout,
            rate_limit,
            payload,
            dry_run: cli.dry_run,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_url(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Url, ConfigError> {
        let url_str = cli
            .url
            .as_deref()
            .or_else(|| toml.and_then(|t| t.webhook.url.as_deref()))
            .ok_or_else(|| {
                ConfigError::missing(field::URL, "Use --url or set webhook.url in config file")
            })?;

        Url::parse(url_str).map_err(|e| ConfigError::InvalidUrl {
            url: url_str.to_string(),
            reason: e.to_string(),
        })
    }

    fn resolve_timeout(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Duration, ConfigError> {
        let seconds = cli
            .timeout
            .or_else(|| toml.and_then(|t| t.webhook.timeout))
            .unwrap_or(defaults::TIMEOUT_SECS);

        if seconds == 0 {
            return Err(ConfigError::InvalidDuration {
                field: "timeout",
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(Duration::from_secs(seconds))
    }

    fn build_rate_limit(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<RateLimitPolicy, ConfigError> {
        let section = toml.map(|t| &t.rate_limit);

        let max_attempts = cli
            .max_attempts
            .or_else(|| section.and_then(|s| s.max_attempts));

        let max_wait_secs = cli
            .max_wait
            .or_else(|| section.and_then(|s| s.max_total_wait));

        let jitter_ms = section
            .and_then(|s| s.jitter_ms)
            .unwrap_or(defaults::JITTER_MS);

        let mut policy =
            RateLimitPolicy::unbounded().with_jitter(Duration::from_millis(jitter_ms));

        if let Some(max_attempts) = max_attempts {
            if max_attempts < RateLimitPolicy::MIN_MAX_ATTEMPTS {
                return Err(ConfigError::InvalidRateLimit(
                    "max_attempts must be greater than 0".to_string(),
                ));
            }
            policy = policy.with_max_attempts(max_attempts);
        }

        if let Some(secs) = max_wait_secs {
            let max_wait = Duration::try_from_secs_f64(secs).map_err(|_| {
                ConfigError::InvalidRateLimit(format!(
                    "max_total_wait must be a non-negative number of seconds, got {secs}"
                ))
            })?;
            policy = policy.with_max_total_wait(max_wait);
        }

        Ok(policy)
    }

    /// Builds the message through the payload mutators, CLI values first.
    fn build_payload(cli: &Cli, msg: Option<&MessageSection>) -> Result<Payload, ConfigError> {
        let title = prefer_cli(cli.title.as_deref(), msg.and_then(|m| m.title.as_deref()));
        let description = prefer_cli(
            cli.description.as_deref(),
            msg.and_then(|m| m.description.as_deref()),
        );
        let link = prefer_cli(cli.link.as_deref(), msg.and_then(|m| m.url.as_deref()));

        let mut payload = Payload::new(
            title.unwrap_or_default(),
            description.unwrap_or_default(),
            link.unwrap_or_default(),
        );

        let username = prefer_cli(
            cli.username.as_deref(),
            msg.and_then(|m| m.username.as_deref()),
        );
        let avatar_url = prefer_cli(
            cli.avatar_url.as_deref(),
            msg.and_then(|m| m.avatar_url.as_deref()),
        );
        if username.is_some() || avatar_url.is_some() {
            payload.set_display_identity(
                username.unwrap_or_default(),
                avatar_url.unwrap_or_default(),
            );
        }

        if let Some(content) =
            prefer_cli(cli.content.as_deref(), msg.and_then(|m| m.content.as_deref()))
        {
            payload.set_content(content);
        }

        Self::apply_author(&mut payload, cli, msg);
        Self::apply_footer(&mut payload, cli, msg)?;

        if let Some(color) = prefer_cli(cli.color.as_deref(), msg.and_then(|m| m.color.as_deref()))
        {
            payload.set_color(&color)?;
        }
        if let Some(thumbnail) = prefer_cli(
            cli.thumbnail.as_deref(),
            msg.and_then(|m| m.thumbnail.as_deref()),
        ) {
            payload.set_thumbnail(thumbnail)?;
        }
        if let Some(image) = prefer_cli(cli.image.as_deref(), msg.and_then(|m| m.image.as_deref()))
        {
            payload.set_image(image)?;
        }
        if cli.timestamp || msg.is_some_and(|m| m.timestamp) {
            payload.set_timestamp()?;
        }

        for (name, value, inline) in Self::resolve_fields(cli, msg)? {
            payload.add_field(name, value, inline)?;
        }

        Ok(payload)
    }

    fn apply_author(payload: &mut Payload, cli: &Cli, msg: Option<&MessageSection>) {
        let toml_author = msg.and_then(|m| m.author.as_ref());

        let Some(name) = cli
            .author
            .clone()
            .or_else(|| toml_author.map(|a| a.name.clone()))
        else {
            return;
        };

        let url = cli
            .author_url
            .clone()
            .or_else(|| toml_author.map(|a| a.url.clone()))
            .unwrap_or_default();
        let icon_url = cli
            .author_icon
            .clone()
            .or_else(|| toml_author.map(|a| a.icon_url.clone()))
            .unwrap_or_default();

        payload.set_author(name, url, icon_url);
    }

    fn apply_footer(
        payload: &mut Payload,
        cli: &Cli,
        msg: Option<&MessageSection>,
    ) -> Result<(), ConfigError> {
        let toml_footer = msg.and_then(|m| m.footer.as_ref());

        let Some(text) = cli
            .footer
            .clone()
            .or_else(|| toml_footer.map(|f| f.text.clone()))
        else {
            return Ok(());
        };

        let icon_url = cli
            .footer_icon
            .clone()
            .or_else(|| toml_footer.map(|f| f.icon_url.clone()))
            .unwrap_or_default();

        payload.set_footer(text, icon_url)?;
        Ok(())
    }

    /// CLI fields replace TOML fields entirely when any are given.
    fn resolve_fields(
        cli: &Cli,
        msg: Option<&MessageSection>,
    ) -> Result<Vec<(String, String, bool)>, ConfigError> {
        if cli.fields.is_empty() && cli.inline_fields.is_empty() {
            return Ok(msg
                .map(|m| {
                    m.fields
                        .iter()
                        .map(|f| (f.name.clone(), f.value.clone(), f.inline))
                        .collect()
                })
                .unwrap_or_default());
        }

        let block = cli.fields.iter().map(|s| (s, false));
        let inline = cli.inline_fields.iter().map(|s| (s, true));

        block
            .chain(inline)
            .map(|(arg, inline)| {
                let (name, value) = parse_field(arg)?;
                Ok((name, value, inline))
            })
            .collect()
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

fn prefer_cli(cli: Option<&str>, toml: Option<&str>) -> Option<String> {
    cli.or(toml).map(str::to_string)
}

fn parse_field(s: &str) -> Result<(String, String), ConfigError> {
    s.split_once('=')
        .map(|(name, value)| (name.trim().to_string(), value.trim().to_string()))
        .ok_or_else(|| ConfigError::InvalidField {
            value: s.to_string(),
        })
}
