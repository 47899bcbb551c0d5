//! # Buspro Sensor Hub
//!
//! This module provides the SensorHub struct, which owns every sensor on one bus
//! connection and routes incoming telegrams to them.
//!
//! Telegrams are applied in arrival order from a single task, so each sensor sees
//! its telegrams one at a time. A telegram that fails to decode for one sensor is
//! logged and skipped; it never stops the telegrams behind it.

use crate::buspro::telegram::{decode_any, Telegram};
use crate::buspro::transport::BusTransport;
use crate::config::{BusConfig, SensorPlatformConfig};
use crate::error::BusproError;
use crate::sensor::device::{Sensor, SensorChanged};
use crate::sensor::entity::SensorEntity;
use crate::sensor::identity::SensorIdentity;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};

/// Represents the set of sensors attached to one bus connection.
pub struct SensorHub {
    transport: Arc<dyn BusTransport>,
    bus: BusConfig,
    sensors: HashMap<String, Sensor>,
}

impl SensorHub {
    /// Creates an empty hub that sends through `transport`.
    pub fn new(transport: Arc<dyn BusTransport>, bus: BusConfig) -> Self {
        SensorHub {
            transport,
            bus,
            sensors: HashMap::new(),
        }
    }

    pub fn bus_config(&self) -> &BusConfig {
        &self.bus
    }

    /// Adds a sensor and schedules its initial status read.
    ///
    /// Returns the sensor's device identifier. Entities that read the same device
    /// (a temperature and an illuminance entity on one address) share one sensor;
    /// use [`SensorHub::sensor_entry`] or [`SensorHub::load_platform`] for those.
    pub fn add_sensor(
        &mut self,
        identity: SensorIdentity,
        name: impl Into<String>,
    ) -> Result<String, BusproError> {
        let id = identity.device_identifier();
        if self.sensors.contains_key(&id) {
            return Err(BusproError::DuplicateSensor(id));
        }

        let mut sensor = Sensor::new(identity, name, Arc::clone(&self.transport), self.bus);
        sensor.schedule_initial_read(self.bus.initial_read_delay);
        log::debug!("Adding sensor '{}' ({id})", sensor.name());
        self.sensors.insert(id.clone(), sensor);
        Ok(id)
    }

    /// Device identifier of the sensor for `identity`, adding it first if needed.
    pub fn sensor_entry(&mut self, identity: SensorIdentity, name: impl Into<String>) -> String {
        let id = identity.device_identifier();
        if !self.sensors.contains_key(&id) {
            let mut sensor = Sensor::new(identity, name, Arc::clone(&self.transport), self.bus);
            sensor.schedule_initial_read(self.bus.initial_read_delay);
            log::debug!("Adding sensor '{}' ({id})", sensor.name());
            self.sensors.insert(id.clone(), sensor);
        }
        id
    }

    /// Registers every configured device and returns one entity per entry.
    ///
    /// Entries with the same identity map onto one sensor; their entities differ by
    /// sensor type in [`SensorEntity::unique_id`].
    pub fn load_platform(
        &mut self,
        config: &SensorPlatformConfig,
    ) -> Result<Vec<SensorEntity>, BusproError> {
        let mut entities = Vec::with_capacity(config.devices.len());
        for device in &config.devices {
            let identity = device.identity()?;
            let id = self.sensor_entry(identity, device.name.clone());
            let mut entity = device.entity()?;
            if let Some(sensor) = self.sensors.get(&id) {
                entity.refresh(sensor);
            }
            entities.push(entity);
        }
        Ok(entities)
    }

    /// Removes a sensor; its pending initial read is cancelled.
    pub fn remove_sensor(&mut self, device_identifier: &str) -> Option<Sensor> {
        let mut sensor = self.sensors.remove(device_identifier)?;
        sensor.cancel_initial_read();
        Some(sensor)
    }

    pub fn sensor(&self, device_identifier: &str) -> Option<&Sensor> {
        self.sensors.get(device_identifier)
    }

    pub fn sensors(&self) -> impl Iterator<Item = &Sensor> {
        self.sensors.values()
    }

    pub fn len(&self) -> usize {
        self.sensors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }

    pub fn subscribe(&self, device_identifier: &str) -> Option<broadcast::Receiver<SensorChanged>> {
        self.sensors.get(device_identifier).map(Sensor::subscribe)
    }

    /// Applies a telegram to every sensor of its source device.
    ///
    /// Returns the change notifications it produced.
    pub fn dispatch(&mut self, telegram: &Telegram) -> Vec<SensorChanged> {
        let mut changes = Vec::new();
        for sensor in self
            .sensors
            .values_mut()
            .filter(|sensor| sensor.identity().address == telegram.source)
        {
            match sensor.apply(telegram) {
                Ok(Some(changed)) => changes.push(changed),
                Ok(None) => {}
                Err(e) => log::warn!("{}: skipping telegram: {e}", sensor.identity()),
            }
        }
        changes
    }

    /// Decodes a raw bus frame or UDP datagram and dispatches it.
    pub fn dispatch_frame(&mut self, bytes: &[u8]) -> Result<Vec<SensorChanged>, BusproError> {
        match decode_any(bytes) {
            Ok(telegram) => Ok(self.dispatch(&telegram)),
            Err(e) if e.is_silent() => {
                log::debug!("Ignoring frame: {e}");
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Applies telegrams in arrival order until the sender side closes.
    ///
    /// Returns the number of telegrams processed.
    pub async fn run(&mut self, mut telegrams: mpsc::Receiver<Telegram>) -> usize {
        let mut processed = 0;
        while let Some(telegram) = telegrams.recv().await {
            self.dispatch(&telegram);
            processed += 1;
        }
        log::info!("Telegram stream closed after {processed} telegrams");
        processed
    }

    /// Issues a status read for every sensor. All reads are attempted; the first
    /// failure is returned.
    pub async fn read_all(&self) -> Result<(), BusproError> {
        let mut first_error = None;
        for sensor in self.sensors.values() {
            if let Err(e) = sensor.read_sensor_status().await {
                log::warn!("{}: status read failed: {e}", sensor.identity());
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

impl std::fmt::Debug for SensorHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SensorHub")
            .field("bus", &self.bus)
            .field("sensors", &self.sensors)
            .finish_non_exhaustive()
    }
}
