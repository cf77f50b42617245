//! Error types for payload construction.

use thiserror::Error;

/// Error type for payload mutators.
///
/// These are usage errors: retrying the same call with the same input
/// will fail the same way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmbedError {
    /// The color string is not a valid base-16 number.
    #[error("Invalid hex color code '{input}'")]
    InvalidColor {
        /// The rejected input, as passed by the caller
        input: String,
    },

    /// The mutator targets the first embed, but the payload has none.
    #[error("Payload has no embed: at least one embed is required")]
    NoEmbed,
}
