//! # Configuration
//!
//! Bus-wide settings for outbound telegrams and the per-sensor records a host
//! loads from JSON.
//!
//! ```json
//! {
//!   "devices": [
//!     { "address": "1.74", "name": "Living room", "sensor_type": "temperature", "device": "12in1" },
//!     { "address": "1.12.3", "name": "Hall lux", "sensor_type": "illuminance", "offset": 0 }
//!   ]
//! }
//! ```

use crate::buspro::telegram::DeviceAddress;
use crate::constants::{
    DEFAULT_INITIAL_READ_DELAY, DEFAULT_SENDER_DEVICE_ID, DEFAULT_SENDER_DEVICE_TYPE,
    DEFAULT_SENDER_SUBNET_ID,
};
use crate::error::BusproError;
use crate::sensor::entity::{SensorEntity, SensorType};
use crate::sensor::identity::{DeviceKind, SensorIdentity};
use serde::Deserialize;
use std::time::Duration;

/// Settings shared by every sensor on one bus connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusConfig {
    /// Source address stamped on outbound telegrams
    pub sender: DeviceAddress,
    /// Source device type stamped on outbound telegrams
    pub sender_device_type: u16,
    /// How long a new sensor waits before its first status read
    pub initial_read_delay: Duration,
}

impl Default for BusConfig {
    fn default() -> Self {
        BusConfig {
            sender: DeviceAddress::new(DEFAULT_SENDER_SUBNET_ID, DEFAULT_SENDER_DEVICE_ID),
            sender_device_type: DEFAULT_SENDER_DEVICE_TYPE,
            initial_read_delay: DEFAULT_INITIAL_READ_DELAY,
        }
    }
}

/// One configured sensor.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SensorConfig {
    /// `"subnet.device"` or `"subnet.device.channel"`
    pub address: String,
    pub name: String,
    pub sensor_type: SensorType,
    #[serde(default)]
    pub device: String,
    /// Poll period in seconds, 0 disables polling
    #[serde(default)]
    pub scan_interval: u64,
    #[serde(default)]
    pub offset: i16,
}

impl SensorConfig {
    /// Identity described by the address and device fields.
    pub fn identity(&self) -> Result<SensorIdentity, BusproError> {
        let parts: Vec<&str> = self.address.trim().split('.').collect();
        let parse = |part: &str| {
            part.trim()
                .parse::<u8>()
                .map_err(|_| BusproError::InvalidAddress(self.address.clone()))
        };

        let (address, channel) = match parts.as_slice() {
            [subnet, device] => (DeviceAddress::new(parse(*subnet)?, parse(*device)?), None),
            [subnet, device, channel] => (
                DeviceAddress::new(parse(*subnet)?, parse(*device)?),
                Some(parse(*channel)?),
            ),
            _ => return Err(BusproError::InvalidAddress(self.address.clone())),
        };

        let identity = SensorIdentity::new(address, DeviceKind::from_name(&self.device));
        Ok(match channel {
            Some(channel) => identity.with_channel(channel),
            None => identity,
        })
    }

    /// Host-side projection for this sensor.
    pub fn entity(&self) -> Result<SensorEntity, BusproError> {
        let identity = self.identity()?;
        Ok(SensorEntity::new(
            identity.device_identifier(),
            self.name.clone(),
            self.sensor_type,
            self.offset,
            Duration::from_secs(self.scan_interval),
        ))
    }
}

/// The `devices` list of a sensor platform block.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SensorPlatformConfig {
    pub devices: Vec<SensorConfig>,
}

impl SensorPlatformConfig {
    pub fn from_json_str(json: &str) -> Result<Self, BusproError> {
        let config: SensorPlatformConfig = serde_json::from_str(json)?;
        for device in &config.devices {
            device.identity()?;
        }
        Ok(config)
    }
}
