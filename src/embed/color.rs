//! Hex color parsing.

use super::EmbedError;

/// Parses a hex color code into its integer value.
///
/// Accepts an optional `#` followed by an optional `0x` / `0X` prefix.
/// The remainder must be one or more hex digits that fit in a `u32`.
///
/// # Errors
///
/// Returns [`EmbedError::InvalidColor`] if the remainder is empty, contains
/// a non-hex character, or overflows.
///
/// # Example
///
/// ```
/// use embed_hook::embed::parse_color;
///
/// assert_eq!(parse_color("#1A2B3C").unwrap(), 0x1A2B3C);
/// assert_eq!(parse_color("0x1a2b3c").unwrap(), 1_715_004);
/// assert!(parse_color("zzzz").is_err());
/// ```
pub fn parse_color(input: &str) -> Result<u32, EmbedError> {
    let invalid = || EmbedError::InvalidColor {
        input: input.to_string(),
    };

    let rest = input.strip_prefix('#').unwrap_or(input);
    let digits = rest
        .strip_prefix("0x")
        .or_else(|| rest.strip_prefix("0X"))
        .unwrap_or(rest);

    // from_str_radix alone would accept a leading '+'
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    u32::from_str_radix(digits, 16).map_err(|_| invalid())
}
