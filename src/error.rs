//! # Buspro Error Handling
//!
//! This module defines the BusproError enum, which represents the different error
//! types that can occur in the buspro-rs crate.

use crate::buspro::telegram::OperateCode;
use thiserror::Error;

/// Represents the different error types that can occur in the Buspro crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BusproError {
    /// A telegram payload is shorter than its decode rule requires.
    #[error("Malformed {operate_code:?} payload: need {required} bytes, got {actual}")]
    MalformedPayload {
        operate_code: OperateCode,
        required: usize,
        actual: usize,
    },

    /// A broadcast telegram's discriminator points past the end of the payload.
    #[error("{operate_code:?} payload has no index {index} (length {len})")]
    PayloadIndexOutOfRange {
        operate_code: OperateCode,
        index: usize,
        len: usize,
    },

    /// The operate code on the wire is not one this crate knows.
    #[error("Unknown operate code: 0x{0:04X}")]
    UnknownOperateCode(u16),

    /// Indicates an error when parsing a Buspro frame.
    #[error("Error parsing Buspro frame: {0}")]
    FrameParseError(String),

    /// Indicates a CRC mismatch.
    #[error("Invalid checksum: expected 0x{expected:04X}, calculated 0x{calculated:04X}")]
    InvalidChecksum { expected: u16, calculated: u16 },

    /// The transport collaborator could not submit a telegram.
    #[error("Transport error: {0}")]
    TransportError(String),

    /// An address string could not be parsed.
    #[error("Invalid device address: {0}")]
    InvalidAddress(String),

    /// A sensor with the same identifier is already registered.
    #[error("Duplicate sensor: {0}")]
    DuplicateSensor(String),

    /// Indicates an invalid hexadecimal string was provided.
    #[error("Invalid hexadecimal string: {0}")]
    InvalidHexString(String),

    /// A configuration record could not be used.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl BusproError {
    /// Errors the bus produces routinely and that are not worth a warning.
    pub fn is_silent(&self) -> bool {
        matches!(self, BusproError::UnknownOperateCode(_))
    }
}

impl From<crate::util::hex::HexError> for BusproError {
    fn from(err: crate::util::hex::HexError) -> Self {
        BusproError::InvalidHexString(err.to_string())
    }
}

impl From<serde_json::Error> for BusproError {
    fn from(err: serde_json::Error) -> Self {
        BusproError::ConfigError(err.to_string())
    }
}
