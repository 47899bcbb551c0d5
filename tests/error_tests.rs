//! Unit tests for the `BusproError` enum and its associated `Display` trait implementation.

use buspro_rs::error::BusproError;
use buspro_rs::util::hex::{decode_hex, HexError};
use buspro_rs::OperateCode;

/// Tests that the `MalformedPayload` variant is correctly formatted.
#[test]
fn test_malformed_payload_error() {
    let err = BusproError::MalformedPayload {
        operate_code: OperateCode::ReadSensorStatusResponse,
        required: 8,
        actual: 3,
    };
    assert_eq!(
        err.to_string(),
        "Malformed ReadSensorStatusResponse payload: need 8 bytes, got 3"
    );
}

/// Tests that the `PayloadIndexOutOfRange` variant is correctly formatted.
#[test]
fn test_payload_index_error() {
    let err = BusproError::PayloadIndexOutOfRange {
        operate_code: OperateCode::ReadStatusOfChannelsResponse,
        index: 4,
        len: 2,
    };
    assert_eq!(
        err.to_string(),
        "ReadStatusOfChannelsResponse payload has no index 4 (length 2)"
    );
}

/// Tests that the `UnknownOperateCode` variant is correctly formatted.
#[test]
fn test_unknown_operate_code_error() {
    let err = BusproError::UnknownOperateCode(0xABCD);
    assert_eq!(err.to_string(), "Unknown operate code: 0xABCD");
    assert!(err.is_silent());
}

/// Tests that the `FrameParseError` variant is correctly formatted.
#[test]
fn test_frame_parse_error() {
    let err = BusproError::FrameParseError("bad".to_string());
    assert_eq!(err.to_string(), "Error parsing Buspro frame: bad");
    assert!(!err.is_silent());
}

/// Tests that the `InvalidChecksum` variant is correctly formatted.
#[test]
fn test_invalid_checksum_error() {
    let err = BusproError::InvalidChecksum {
        expected: 0x1234,
        calculated: 0xBEEF,
    };
    assert_eq!(
        err.to_string(),
        "Invalid checksum: expected 0x1234, calculated 0xBEEF"
    );
}

/// Tests that the `TransportError` variant is correctly formatted.
#[test]
fn test_transport_error() {
    let err = BusproError::TransportError("closed".to_string());
    assert_eq!(err.to_string(), "Transport error: closed");
}

/// Tests that the `DuplicateSensor` variant is correctly formatted.
#[test]
fn test_duplicate_sensor_error() {
    let err = BusproError::DuplicateSensor("1.2-none-none-none".to_string());
    assert_eq!(err.to_string(), "Duplicate sensor: 1.2-none-none-none");
}

/// Tests the conversion from hex errors.
#[test]
fn test_hex_error_conversion() {
    let err: BusproError = decode_hex("abc").unwrap_err().into();
    assert_eq!(
        err,
        BusproError::InvalidHexString(HexError::OddLength(3).to_string())
    );
    assert_eq!(
        err.to_string(),
        "Invalid hexadecimal string: Odd number of hex characters: 3"
    );
}
