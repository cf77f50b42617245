//! embed-hook: rich embed messages for chat webhooks
//!
//! A library for building embed payloads (title, author, fields, images,
//! footer, timestamp, color) and delivering them to a webhook endpoint
//! while honoring its rate-limit headers.

pub mod config;
pub mod embed;
pub mod time;
pub mod webhook;
