//! Webhook layer for delivering embed payloads.
//!
//! This module provides types and traits for:
//! - Building HTTP requests ([`HttpRequest`])
//! - Handling HTTP responses ([`HttpResponse`])
//! - Abstracting HTTP clients ([`HttpClient`])
//! - Production HTTP client implementation ([`ReqwestClient`])
//! - Delivery with rate-limit handling ([`EmbedSender`], [`HttpWebhook`], [`send_embed`])
//! - Rate-limit strategy and header parsing ([`RateLimitPolicy`], [`RateLimitHeaders`])

mod client;
mod error;
mod http;
mod rate_limit;
mod sender;

#[cfg(test)]
mod client_tests;
#[cfg(test)]
mod http_tests;

pub use client::ReqwestClient;
pub use error::{DeliveryError, HttpError};
pub use self::http::{HttpClient, HttpRequest, HttpResponse};
pub use rate_limit::{RESET_AFTER_HEADER, REMAINING_HEADER, RateLimitHeaders, RateLimitPolicy};
pub use sender::{EmbedSender, HttpWebhook, send_embed};
