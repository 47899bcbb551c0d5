//! Host projection of a sensor as a single temperature or illuminance reading.

use crate::sensor::device::Sensor;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorType {
    Temperature,
    Illuminance,
}

impl SensorType {
    pub fn as_str(self) -> &'static str {
        match self {
            SensorType::Temperature => "temperature",
            SensorType::Illuminance => "illuminance",
        }
    }

    pub fn unit_of_measurement(self) -> &'static str {
        match self {
            SensorType::Temperature => "°C",
            SensorType::Illuminance => "lux",
        }
    }
}

/// Reading published to the host, refreshed from the sensor on every change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorEntity {
    device_identifier: String,
    name: String,
    sensor_type: SensorType,
    offset: i16,
    scan_interval: Duration,
    temperature: Option<i16>,
    brightness: Option<u16>,
}

impl SensorEntity {
    pub fn new(
        device_identifier: String,
        name: String,
        sensor_type: SensorType,
        offset: i16,
        scan_interval: Duration,
    ) -> Self {
        SensorEntity {
            device_identifier,
            name,
            sensor_type,
            offset,
            scan_interval,
            temperature: None,
            brightness: None,
        }
    }

    /// Copies the current readings out of the sensor.
    pub fn refresh(&mut self, sensor: &Sensor) {
        self.temperature = sensor.temperature();
        self.brightness = Some(sensor.brightness());
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sensor_type(&self) -> SensorType {
        self.sensor_type
    }

    /// Current value. A temperature of exactly 0 is reported without the offset.
    pub fn state(&self) -> Option<i32> {
        match self.sensor_type {
            SensorType::Temperature => self.temperature.map(|t| {
                let t = i32::from(t);
                if t != 0 {
                    t + i32::from(self.offset)
                } else {
                    t
                }
            }),
            SensorType::Illuminance => self.brightness.map(i32::from),
        }
    }

    pub fn available(&self, connected: bool) -> bool {
        connected && self.state().is_some()
    }

    pub fn unit_of_measurement(&self) -> &'static str {
        self.sensor_type.unit_of_measurement()
    }

    pub fn device_class(&self) -> &'static str {
        self.sensor_type.as_str()
    }

    pub fn state_class(&self) -> &'static str {
        "measurement"
    }

    pub fn should_poll(&self) -> bool {
        !self.scan_interval.is_zero()
    }

    pub fn scan_interval(&self) -> Duration {
        self.scan_interval
    }

    pub fn unique_id(&self) -> String {
        format!("{}-{}", self.device_identifier, self.sensor_type.as_str())
    }
}
