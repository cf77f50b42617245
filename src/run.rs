//! Application execution logic.
//!
//! Sends the configured payload, or prints it in dry-run mode.

use thiserror::Error;

use embed_hook::config::ValidatedConfig;
use embed_hook::embed::Payload;
use embed_hook::webhook::{DeliveryError, EmbedSender, HttpError, HttpWebhook, ReqwestClient};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to create the HTTP client.
    #[error("Failed to create HTTP client: {0}")]
    Client(#[source] HttpError),

    /// Failed to render the payload for dry-run output.
    #[error("Failed to render payload: {0}")]
    Render(#[source] serde_json::Error),

    /// The delivery ended in a terminal error.
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

/// Executes a single delivery.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be created or the delivery
/// fails. In dry-run mode only rendering can fail.
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig) -> Result<(), RunError> {
    if config.dry_run {
        tracing::info!("Dry-run mode enabled - payload will be printed, not sent");
        println!("{}", render_payload(&config.payload)?);
        return Ok(());
    }

    let client = ReqwestClient::with_timeout(config.timeout).map_err(RunError::Client)?;
    let webhook = HttpWebhook::new(client).with_rate_limit_policy(config.rate_limit.clone());

    deliver(&webhook, &config).await
}

/// Sends the configured payload through `sender`.
async fn deliver<S: EmbedSender>(sender: &S, config: &ValidatedConfig) -> Result<(), RunError> {
    sender.send(&config.payload, &config.url).await?;
    tracing::info!(
        host = config.url.host_str().unwrap_or_default(),
        "Embed delivered"
    );
    Ok(())
}

/// Renders the payload as pretty-printed JSON.
fn render_payload(payload: &Payload) -> Result<String, RunError> {
    serde_json::to_string_pretty(payload).map_err(RunError::Render)
}
