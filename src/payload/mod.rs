//! # Payload Module
//!
//! Turns the raw payload of a telegram into typed sensor fields.

pub mod decode;

pub use decode::{decode_report, required_payload_len, SensorReport};
