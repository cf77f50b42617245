//! Payload model for rich embed messages.
//!
//! This module provides:
//! - The top-level message document ([`Payload`])
//! - Its rich visual blocks and their parts ([`Embed`], [`Author`], [`Field`], [`Footer`], [`Image`])
//! - Hex color parsing ([`parse_color`])
//!
//! # Addressing
//!
//! Every mutator on [`Payload`] targets the *first* embed of the payload.
//! [`Payload::set_author`] creates that embed when the payload has none; every
//! other embed mutator fails with [`EmbedError::NoEmbed`] instead.

mod color;
mod error;
mod model;


pub use color::parse_color;
pub use error::EmbedError;
pub use model::{Author, Embed, Field, Footer, Image, Payload};
