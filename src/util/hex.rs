//! # Hex Encoding/Decoding Utilities
//!
//! Hex helpers used for frame logging and for the CLI, which takes frames as hex
//! text copied from bus monitors.
//!
//! ```rust
//! use buspro_rs::util::hex::{encode_hex, parse_hex_lenient, format_hex_compact};
//!
//! let data = [0xAA, 0xAA, 0x0B];
//! assert_eq!(encode_hex(&data), "aaaa0b");
//! assert_eq!(parse_hex_lenient("AA-AA 0b").unwrap(), data);
//! assert_eq!(format_hex_compact(&data), "aa aa 0b");
//! ```

use thiserror::Error;

/// Errors that can occur during hex operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HexError {
    #[error("Odd number of hex characters: {0}")]
    OddLength(usize),

    #[error("Empty hex string")]
    EmptyString,

    #[error("Hex decoding error: {0}")]
    DecodeError(String),
}

/// Encode bytes to lowercase hex string
pub fn encode_hex(data: &[u8]) -> String {
    hex::encode(data)
}

/// Decode hex string to bytes
///
/// Accepts both uppercase and lowercase hex characters.
/// Whitespace is automatically stripped.
pub fn decode_hex(hex_str: &str) -> Result<Vec<u8>, HexError> {
    let cleaned: String = hex_str.chars().filter(|c| !c.is_whitespace()).collect();

    if cleaned.is_empty() {
        return Err(HexError::EmptyString);
    }
    if cleaned.len() % 2 != 0 {
        return Err(HexError::OddLength(cleaned.len()));
    }

    hex::decode(&cleaned).map_err(|e| HexError::DecodeError(e.to_string()))
}

/// Parse hex string that may contain spaces or other separators
///
/// More lenient than decode_hex, strips all non-hex characters.
pub fn parse_hex_lenient(input: &str) -> Result<Vec<u8>, HexError> {
    let hex_chars: String = input.chars().filter(|c| c.is_ascii_hexdigit()).collect();
    decode_hex(&hex_chars)
}

/// Format hex data for compact display (useful for logs)
///
/// Formats data as "aa aa 0b" with spaces between bytes.
pub fn format_hex_compact(data: &[u8]) -> String {
    data.iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}
