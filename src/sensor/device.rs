//! # Buspro Sensor
//!
//! The host-facing sensor: identity, state, change notifications and status reads.
//!
//! A sensor is fed telegrams through [`Sensor::apply`], one at a time and in arrival
//! order. Every applied telegram publishes a [`SensorChanged`] on a broadcast
//! channel; hosts subscribe with [`Sensor::subscribe`] and read the derived values
//! back from the sensor or from the snapshot carried by the event.
//!
//! The first status read is deferred ([`Sensor::schedule_initial_read`]) so a host
//! adding many sensors at once does not flood the bus. The pending read is owned by
//! the sensor and aborted when the sensor is dropped.

use crate::buspro::telegram::{OperateCode, Telegram};
use crate::buspro::transport::BusTransport;
use crate::config::BusConfig;
use crate::constants::SENSOR_EVENT_CHANNEL_CAPACITY;
use crate::error::BusproError;
use crate::logging::log_telegram_hex;
use crate::sensor::identity::{Flavor, SensorIdentity};
use crate::sensor::request::{build_status_request, StatusRequest};
use crate::sensor::state::SensorState;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

/// Published after a telegram changed a sensor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorChanged {
    pub device_identifier: String,
    pub operate_code: OperateCode,
    pub state: SensorState,
}

pub struct Sensor {
    identity: SensorIdentity,
    name: String,
    state: SensorState,
    transport: Arc<dyn BusTransport>,
    bus: BusConfig,
    events: broadcast::Sender<SensorChanged>,
    initial_read: Option<JoinHandle<()>>,
}

impl Sensor {
    pub fn new(
        identity: SensorIdentity,
        name: impl Into<String>,
        transport: Arc<dyn BusTransport>,
        bus: BusConfig,
    ) -> Self {
        let (events, _) = broadcast::channel(SENSOR_EVENT_CHANNEL_CAPACITY);
        Sensor {
            identity,
            name: name.into(),
            state: SensorState::default(),
            transport,
            bus,
            events,
            initial_read: None,
        }
    }

    pub fn identity(&self) -> &SensorIdentity {
        &self.identity
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn flavor(&self) -> Flavor {
        self.identity.flavor()
    }

    pub fn state(&self) -> &SensorState {
        &self.state
    }

    pub fn device_identifier(&self) -> String {
        self.identity.device_identifier()
    }

    /// New receiver for this sensor's change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<SensorChanged> {
        self.events.subscribe()
    }

    /// Applies one telegram.
    ///
    /// Irrelevant telegrams return `Ok(None)`. A malformed payload returns the decode
    /// error and leaves the state as it was.
    pub fn apply(&mut self, telegram: &Telegram) -> Result<Option<SensorChanged>, BusproError> {
        if !self.state.apply(&self.identity, telegram)? {
            return Ok(None);
        }

        let changed = SensorChanged {
            device_identifier: self.device_identifier(),
            operate_code: telegram.operate_code,
            state: self.state,
        };
        log::debug!("{} ({}) updated by {:?}", self.name, self.identity, telegram.operate_code);
        // No subscribers is fine.
        let _ = self.events.send(changed.clone());
        Ok(Some(changed))
    }

    pub fn status_request(&self) -> StatusRequest {
        build_status_request(&self.identity)
    }

    /// Submits this sensor's status request. The response arrives later as a telegram.
    pub async fn read_sensor_status(&self) -> Result<(), BusproError> {
        let telegram = self.status_request().to_telegram(&self.bus);
        send_status_request(self.transport.as_ref(), &telegram).await
    }

    /// Issues the first status read after `delay`, replacing any read still pending.
    ///
    /// Needs a Tokio runtime; without one nothing is scheduled and `false` is returned.
    pub fn schedule_initial_read(&mut self, delay: Duration) -> bool {
        self.cancel_initial_read();

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            log::warn!("{}: no runtime, initial status read not scheduled", self.identity);
            return false;
        };

        let transport = Arc::clone(&self.transport);
        let telegram = self.status_request().to_telegram(&self.bus);
        let identity = self.identity;
        self.initial_read = Some(runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(e) = send_status_request(transport.as_ref(), &telegram).await {
                log::warn!("{identity}: initial status read failed: {e}");
            }
        }));
        true
    }

    /// Aborts the pending initial read, if any.
    pub fn cancel_initial_read(&mut self) {
        if let Some(handle) = self.initial_read.take() {
            handle.abort();
        }
    }

    pub fn initial_read_pending(&self) -> bool {
        self.initial_read
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    pub fn temperature(&self) -> Option<i16> {
        self.state.temperature(self.identity.kind)
    }

    pub fn brightness(&self) -> u16 {
        self.state.brightness()
    }

    pub fn movement(&self) -> bool {
        self.state.movement()
    }

    pub fn dry_contact_1_is_on(&self) -> bool {
        self.state.dry_contact_1_is_on()
    }

    pub fn dry_contact_2_is_on(&self) -> bool {
        self.state.dry_contact_2_is_on()
    }

    pub fn universal_switch_is_on(&self) -> bool {
        self.state.universal_switch_is_on()
    }

    pub fn single_channel_is_on(&self) -> bool {
        self.state.single_channel_is_on()
    }

    pub fn switch_status_is_on(&self) -> bool {
        self.state.switch_status_is_on()
    }
}

impl Drop for Sensor {
    fn drop(&mut self) {
        self.cancel_initial_read();
    }
}

impl std::fmt::Debug for Sensor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sensor")
            .field("identity", &self.identity)
            .field("name", &self.name)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

async fn send_status_request(
    transport: &dyn BusTransport,
    telegram: &Telegram,
) -> Result<(), BusproError> {
    log::debug!(
        "Requesting {:?} from {}",
        telegram.operate_code,
        telegram.target
    );
    log_telegram_hex("Status request", telegram);
    transport.send_telegram(telegram).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buspro::telegram::DeviceAddress;
    use crate::buspro::transport_mock::MockTransport;
    use crate::sensor::identity::DeviceKind;

    fn sensor(transport: &MockTransport) -> Sensor {
        Sensor::new(
            SensorIdentity::new(DeviceAddress::new(1, 60), DeviceKind::Pir),
            "Hall motion",
            Arc::new(transport.clone()),
            BusConfig::default(),
        )
    }

    #[test]
    fn test_read_sensor_status_sends_request() {
        let transport = MockTransport::new();
        let sensor = sensor(&transport);
        tokio_test::block_on(sensor.read_sensor_status()).unwrap();

        let sent = transport.sent_telegrams();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].operate_code, OperateCode::ReadMotionSensorStatus);
        assert_eq!(sent[0].target, DeviceAddress::new(1, 60));
    }

    #[test]
    fn test_read_sensor_status_surfaces_transport_failure() {
        let transport = MockTransport::new();
        transport.set_next_error("socket closed");
        let sensor = sensor(&transport);
        assert!(matches!(
            tokio_test::block_on(sensor.read_sensor_status()),
            Err(BusproError::TransportError(_))
        ));
    }

    #[test]
    fn test_schedule_without_runtime_is_refused() {
        let transport = MockTransport::new();
        let mut sensor = sensor(&transport);
        assert!(!sensor.schedule_initial_read(Duration::from_millis(1)));
        assert!(!sensor.initial_read_pending());
    }

    #[test]
    fn test_apply_notifies_subscribers() {
        let transport = MockTransport::new();
        let mut sensor = sensor(&transport);
        let mut rx = sensor.subscribe();

        let telegram = Telegram::new(
            OperateCode::ReadMotionSensorStatusResponse,
            DeviceAddress::new(1, 60),
            vec![0, 0, 0, 1],
        );
        let changed = sensor.apply(&telegram).unwrap().unwrap();
        assert!(sensor.movement());
        assert_eq!(rx.try_recv().unwrap(), changed);
        assert_eq!(changed.device_identifier, "1.60-none-none-none");
    }
}
