//! Embed sender trait and HTTP implementation.

use std::time::Duration;

use http::header::{CONTENT_TYPE, HeaderValue};
use url::Url;

use crate::embed::Payload;
use crate::time::{Sleeper, TokioSleeper};

use super::{
    DeliveryError, HttpClient, HttpRequest, HttpResponse, RateLimitHeaders, RateLimitPolicy,
    ReqwestClient,
};

/// Trait for delivering embed payloads to a webhook endpoint.
///
/// The returned future resolves only on a terminal outcome: rate-limit
/// responses are absorbed inside the implementation. Dropping the future
/// cancels the delivery at its current transport call or pause.
pub trait EmbedSender: Send + Sync {
    /// Delivers `payload` to `url`.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError`] if the payload cannot be serialized, the
    /// transport fails, the endpoint rejects the payload, or a bounded
    /// rate-limit policy runs out.
    fn send(
        &self,
        payload: &Payload,
        url: &Url,
    ) -> impl std::future::Future<Output = Result<(), DeliveryError>> + Send;
}

/// HTTP webhook sender honoring the endpoint's rate-limit headers.
///
/// Posts the payload as JSON. On 429 it reads `x-ratelimit-remaining` and
/// `x-ratelimit-reset-after`, pauses for the reset-after duration when at
/// most one request remains, and posts again. Any other non-success
/// status, and any transport failure, ends the delivery without retry.
///
/// # Type Parameters
///
/// - `H`: The HTTP client implementation
/// - `S`: The sleeper used for rate-limit pauses (defaults to [`TokioSleeper`])
///
/// # Example
///
/// ```no_run
/// use embed_hook::embed::Payload;
/// use embed_hook::webhook::{EmbedSender, HttpWebhook, RateLimitPolicy, ReqwestClient};
/// use std::time::Duration;
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let webhook = HttpWebhook::new(ReqwestClient::new())
///     .with_rate_limit_policy(RateLimitPolicy::unbounded().with_max_total_wait(Duration::from_secs(60)));
///
/// let payload = Payload::new("Build passed", "", "");
/// webhook.send(&payload, &Url::parse("https://discord.com/api/webhooks/1/abc")?).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct HttpWebhook<H, S = TokioSleeper> {
    client: H,
    sleeper: S,
    rate_limit: RateLimitPolicy,
}

impl<H> HttpWebhook<H, TokioSleeper> {
    /// Creates a sender with an unbounded rate-limit policy and
    /// [`TokioSleeper`] for pauses.
    #[must_use]
    pub const fn new(client: H) -> Self {
        Self {
            client,
            sleeper: TokioSleeper,
            rate_limit: RateLimitPolicy::unbounded(),
        }
    }
}

impl<H, S> HttpWebhook<H, S> {
    /// Sets a custom sleeper for rate-limit pauses.
    #[must_use]
    pub fn with_sleeper<S2>(self, sleeper: S2) -> HttpWebhook<H, S2> {
        HttpWebhook {
            client: self.client,
            sleeper,
            rate_limit: self.rate_limit,
        }
    }

    /// Sets the rate-limit policy.
    #[must_use]
    pub const fn with_rate_limit_policy(mut self, policy: RateLimitPolicy) -> Self {
        self.rate_limit = policy;
        self
    }

    /// Returns the configured rate-limit policy.
    #[must_use]
    pub const fn rate_limit_policy(&self) -> &RateLimitPolicy {
        &self.rate_limit
    }
}

/// Per-delivery bookkeeping for the rate-limit loop.
#[derive(Debug, Default)]
struct Progress {
    attempts: u32,
    waited: Duration,
}

impl Progress {
    const fn exhausted(&self) -> DeliveryError {
        DeliveryError::RateLimitExhausted {
            attempts: self.attempts,
            waited: self.waited,
        }
    }
}

impl<H: HttpClient, S: Sleeper> HttpWebhook<H, S> {
    fn build_request(url: &Url, body: Vec<u8>) -> HttpRequest {
        HttpRequest::post(url.clone())
            .with_header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .with_body(body)
    }

    /// Decides how long to wait after a 429, or gives up per the policy.
    fn next_pause(
        &self,
        response: &HttpResponse,
        progress: &Progress,
    ) -> Result<Duration, DeliveryError> {
        if !self.rate_limit.allows_attempt(progress.attempts.saturating_add(1)) {
            return Err(progress.exhausted());
        }

        let limits = RateLimitHeaders::from_headers(&response.headers);
        let pause = self.rate_limit.jittered(limits.pause());

        if !self.rate_limit.allows_wait(progress.waited, pause) {
            return Err(progress.exhausted());
        }

        tracing::debug!(
            remaining = ?limits.remaining,
            reset_after = ?limits.reset_after,
            "Rate limited by webhook endpoint"
        );

        Ok(pause)
    }

    /// Posts until the endpoint accepts, rejects, or the policy gives up.
    async fn deliver(&self, payload: &Payload, url: &Url) -> Result<(), DeliveryError> {
        let request = Self::build_request(url, payload.to_json()?);
        let mut progress = Progress::default();

        loop {
            progress.attempts = progress.attempts.saturating_add(1);
            tracing::debug!(attempt = progress.attempts, "Posting embed payload");

            let response = self.client.request(request.clone()).await?;

            if response.is_delivered() {
                tracing::debug!(
                    status = %response.status,
                    attempts = progress.attempts,
                    "Embed payload delivered"
                );
                return Ok(());
            }

            if !response.is_rate_limited() {
                return Err(DeliveryError::Status {
                    status: response.status,
                    body: response.body_text().map(ToString::to_string),
                });
            }

            let pause = self.next_pause(&response, &progress)?;
            if pause.is_zero() {
                continue;
            }

            tracing::warn!("Rate limited, pausing {pause:?} before retrying");
            self.sleeper.sleep(pause).await;
            progress.waited = progress.waited.saturating_add(pause);
        }
    }
}

impl<H: HttpClient, S: Sleeper> EmbedSender for HttpWebhook<H, S> {
    async fn send(&self, payload: &Payload, url: &Url) -> Result<(), DeliveryError> {
        self.deliver(payload, url).await
    }
}

/// Delivers `payload` to `url` with a default [`ReqwestClient`] and an
/// unbounded rate-limit policy.
///
/// # Errors
///
/// See [`EmbedSender::send`].
pub async fn send_embed(payload: &Payload, url: &Url) -> Result<(), DeliveryError> {
    HttpWebhook::new(ReqwestClient::new())
        .send(payload, url)
        .await
}
