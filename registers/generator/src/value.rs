// Licensed under the Apache-2.0 license

//! Literal values of enumerated field patterns.

use std::borrow::Cow;

use crate::error::DeriveError;

/// Parses a textual literal into its exact value.
///
/// The prefix selects the base:
/// - `0x`: hexadecimal, digits case-insensitive;
/// - `0b` or `#`: binary, where each don't-care bit `x`/`X` counts as `0`;
/// - anything else: decimal.
///
/// # Examples
/// ```
/// use registers_generator::value::parse_literal;
/// assert_eq!(parse_literal("0x1A"), Ok(26));
/// assert_eq!(parse_literal("0b10x1"), Ok(9));
/// assert_eq!(parse_literal("#1x"), Ok(2));
/// assert_eq!(parse_literal("42"), Ok(42));
/// assert!(parse_literal("0xZZ").is_err());
/// ```
pub fn parse_literal(literal: &str) -> Result<u64, DeriveError> {
    let (digits, radix): (Cow<'_, str>, u32) = if let Some(hex) = literal.strip_prefix("0x") {
        (Cow::Borrowed(hex), 16)
    } else if let Some(bin) = literal
        .strip_prefix("0b")
        .or_else(|| literal.strip_prefix('#'))
    {
        (Cow::Owned(bin.replace(|c: char| c == 'x' || c == 'X', "0")), 2)
    } else {
        (Cow::Borrowed(literal), 10)
    };

    // from_str_radix alone would also accept a leading `+`.
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(DeriveError::MalformedLiteral(literal.to_string()));
    }
    u64::from_str_radix(&digits, radix)
        .map_err(|_| DeriveError::MalformedLiteral(literal.to_string()))
}
