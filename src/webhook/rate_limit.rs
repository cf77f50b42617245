//! Rate-limit header parsing and the retry strategy for 429 responses.

use std::time::Duration;

use rand::Rng;

/// Header carrying the number of requests left in the current window.
pub const REMAINING_HEADER: &str = "x-ratelimit-remaining";

/// Header carrying the seconds until the window resets (fractional).
pub const RESET_AFTER_HEADER: &str = "x-ratelimit-reset-after";

/// Rate-limit hints read from a 429 response.
///
/// Both values are optional: a missing or unparseable header is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RateLimitHeaders {
    /// Requests left in the current window
    pub remaining: Option<i64>,
    /// Seconds until the window resets
    pub reset_after: Option<f64>,
}

impl RateLimitHeaders {
    /// The sender pauses only when at most this many requests remain.
    pub const PAUSE_THRESHOLD: i64 = 1;

    /// Reads the rate-limit headers from a response header map.
    #[must_use]
    pub fn from_headers(headers: &http::HeaderMap) -> Self {
        Self {
            remaining: header_value(headers, REMAINING_HEADER),
            reset_after: header_value(headers, RESET_AFTER_HEADER),
        }
    }

    /// Returns true if the quota is exhausted enough to warrant a pause.
    ///
    /// An absent or unparseable remaining count never pauses.
    #[must_use]
    pub fn must_pause(&self) -> bool {
        self.remaining
            .is_some_and(|remaining| remaining <= Self::PAUSE_THRESHOLD)
    }

    /// Returns the pause requested by the endpoint before the next attempt.
    ///
    /// Zero when no pause is warranted, or when the reset-after value is
    /// absent, negative, or not a finite number.
    #[must_use]
    pub fn pause(&self) -> Duration {
        if !self.must_pause() {
            return Duration::ZERO;
        }

        match self.reset_after {
            Some(secs) if secs.is_finite() && secs > 0.0 => {
                Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
            }
            _ => Duration::ZERO,
        }
    }
}

fn header_value<T: std::str::FromStr>(headers: &http::HeaderMap, name: &str) -> Option<T> {
    headers.get(name)?.to_str().ok()?.parse().ok()
}

/// Strategy applied when the endpoint answers 429.
///
/// The pause itself always comes from the endpoint's reset-after hint.
/// The policy only bounds how long the sender keeps trying and spreads
/// pauses with optional jitter.
///
/// # Defaults
///
/// The default policy is unbounded: no attempt cap, no wait cap, no jitter.
/// A sender using it keeps retrying for as long as the endpoint keeps
/// answering 429.
///
/// # Example
///
/// ```
/// use embed_hook::webhook::RateLimitPolicy;
/// use std::time::Duration;
///
/// let unbounded = RateLimitPolicy::default();
/// assert!(unbounded.is_unbounded());
///
/// let bounded = RateLimitPolicy::unbounded()
///     .with_max_attempts(10)
///     .with_max_total_wait(Duration::from_secs(120))
///     .with_jitter(Duration::from_millis(250));
/// assert!(!bounded.is_unbounded());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RateLimitPolicy {
    /// Maximum number of POST requests per delivery, including the first.
    ///
    /// `None` means no limit.
    pub max_attempts: Option<u32>,

    /// Maximum total time spent paused per delivery.
    ///
    /// A pause that would push the total past this value ends the delivery
    /// instead. `None` means no limit.
    pub max_total_wait: Option<Duration>,

    /// Upper bound of the random extra added to every non-zero pause.
    pub jitter: Duration,
}

impl RateLimitPolicy {
    /// Minimum value for `max_attempts`.
    pub const MIN_MAX_ATTEMPTS: u32 = 1;

    /// Creates a policy that never gives up and adds no jitter.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            max_attempts: None,
            max_total_wait: None,
            jitter: Duration::ZERO,
        }
    }

    /// Caps the number of POST requests per delivery.
    ///
    /// # Panics
    ///
    /// Panics if `max_attempts` is less than 1.
    #[must_use]
    pub const fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        assert!(
            max_attempts >= Self::MIN_MAX_ATTEMPTS,
            "max_attempts must be at least 1"
        );
        self.max_attempts = Some(max_attempts);
        self
    }

    /// Caps the total time spent paused per delivery.
    #[must_use]
    pub const fn with_max_total_wait(mut self, max_total_wait: Duration) -> Self {
        self.max_total_wait = Some(max_total_wait);
        self
    }

    /// Sets the upper bound of the random extra added to each pause.
    #[must_use]
    pub const fn with_jitter(mut self, jitter: Duration) -> Self {
        self.jitter = jitter;
        self
    }

    /// Returns true if this policy never gives up.
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.max_attempts.is_none() && self.max_total_wait.is_none()
    }

    /// Returns true if attempt number `attempt` (1 = first POST) may be made.
    #[must_use]
    pub const fn allows_attempt(&self, attempt: u32) -> bool {
        match self.max_attempts {
            Some(max) => attempt <= max,
            None => true,
        }
    }

    /// Returns true if pausing for `pause` keeps the total wait within budget.
    #[must_use]
    pub fn allows_wait(&self, waited: Duration, pause: Duration) -> bool {
        self.max_total_wait
            .is_none_or(|max| waited.saturating_add(pause) <= max)
    }

    /// Adds a random extra in `[0, jitter]` to a non-zero pause.
    ///
    /// A zero pause stays zero so immediate retries are not slowed down.
    #[must_use]
    pub fn jittered(&self, pause: Duration) -> Duration {
        if pause.is_zero() || self.jitter.is_zero() {
            return pause;
        }

        let extra = rand::thread_rng().gen_range(Duration::ZERO..=self.jitter);
        pause.saturating_add(extra)
    }
}
