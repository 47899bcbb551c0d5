//! # buspro-rs - A Rust Crate for HDL Buspro Sensor Telegrams
//!
//! The buspro-rs crate decodes telegrams from the HDL Buspro home-automation bus and
//! keeps per-device sensor state derived from them.
//!
//! ## Features
//!
//! - Parse and pack Buspro bus frames and UDP datagrams, CRC included
//! - Decode sensor-status payloads by operate code (temperature, brightness, motion,
//!   dry contacts, universal switches, channels)
//! - Match telegrams to sensor instances by address and switch/channel number
//! - Track sensor state and publish change notifications
//! - Build the status read request matching each sensor flavor
//! - Support for logging and error handling
//!
//! ## Usage
//!
//! ```rust
//! use buspro_rs::{DeviceAddress, DeviceKind, OperateCode, SensorIdentity, SensorState, Telegram};
//! use buspro_rs::constants::BUSPRO_SUCCESS;
//!
//! let identity = SensorIdentity::new(DeviceAddress::new(1, 20), DeviceKind::Generic);
//! let mut state = SensorState::new();
//! let telegram = Telegram::new(
//!     OperateCode::ReadSensorStatusResponse,
//!     DeviceAddress::new(1, 20),
//!     vec![BUSPRO_SUCCESS, 22, 0, 50, 0, 0, 1, 0],
//! );
//! assert!(state.apply(&identity, &telegram).unwrap());
//! assert_eq!(state.temperature(identity.kind), Some(22));
//! assert_eq!(state.brightness(), 50);
//! ```

pub mod buspro;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod payload;
pub mod sensor;
pub mod sensor_hub;
pub mod util;

pub use crate::error::BusproError;
pub use crate::logging::{init_logger, log_info};

// Wire protocol
pub use buspro::{
    decode_any, decode_datagram, decode_frame, pack_datagram, pack_frame, BusTransport,
    ChannelTransport, DeviceAddress, MockTransport, OperateCode, SuccessOrFailure, Telegram,
};

// Sensor core
pub use config::{BusConfig, SensorConfig, SensorPlatformConfig};
pub use payload::{decode_report, SensorReport};
pub use sensor::{
    build_status_request, DeviceKind, Flavor, Sensor, SensorChanged, SensorEntity,
    SensorIdentity, SensorState, SensorType, StatusRequest,
};
pub use sensor_hub::SensorHub;

/// Decode a bus frame or UDP datagram into a telegram.
///
/// # Arguments
/// * `bytes` - Raw frame starting with the `AA AA` lead code, or a full datagram
///
/// # Returns
/// * `Ok(Telegram)` - Verified and typed telegram
/// * `Err(BusproError)` - Structure, checksum or operate code rejected
pub fn decode_telegram(bytes: &[u8]) -> Result<Telegram, BusproError> {
    decode_any(bytes)
}

/// Send a sensor's status read request.
///
/// # Arguments
/// * `sensor` - Sensor whose flavor selects the request
///
/// # Returns
/// * `Ok(())` - Request handed to the transport
/// * `Err(BusproError)` - Transport rejected the request
pub async fn read_sensor_status(sensor: &Sensor) -> Result<(), BusproError> {
    sensor.read_sensor_status().await
}
