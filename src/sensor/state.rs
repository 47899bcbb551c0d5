//! # Sensor State
//!
//! Last-known values of one sensor and the rules that fold telegrams into them.
//! Values arrive in raw bus units; the accessors at the bottom derive what a host
//! displays and are recomputed on every call.

use crate::buspro::telegram::Telegram;
use crate::constants::{BUSPRO_STATUS_OFF, BUSPRO_STATUS_ON, MULTI_SENSOR_TEMPERATURE_OFFSET};
use crate::error::BusproError;
use crate::payload::decode::{decode_report, SensorReport};
use crate::sensor::identity::{self, DeviceKind, SensorIdentity};

/// Raw sensor values. Absent until a telegram reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorState {
    current_temperature: Option<u8>,
    brightness: Option<u16>,
    motion: Option<u8>,
    sonic: Option<u8>,
    dry_contact_1: Option<u8>,
    dry_contact_2: Option<u8>,
    universal_switch_status: u8,
    channel_status: u8,
    switch_status: u8,
}

impl Default for SensorState {
    fn default() -> Self {
        SensorState {
            current_temperature: None,
            brightness: None,
            motion: None,
            sonic: None,
            dry_contact_1: None,
            dry_contact_2: None,
            universal_switch_status: BUSPRO_STATUS_OFF,
            channel_status: 0,
            switch_status: 0,
        }
    }
}

impl SensorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one telegram into the state.
    ///
    /// Returns `Ok(true)` when the telegram belonged to `identity` and was applied,
    /// `Ok(false)` when it was irrelevant (other device, ignored operate code,
    /// other discriminator). A payload too short for its layout is an error and
    /// leaves the state untouched.
    pub fn apply(
        &mut self,
        identity: &SensorIdentity,
        telegram: &Telegram,
    ) -> Result<bool, BusproError> {
        if telegram.source != identity.address {
            return Ok(false);
        }

        let Some(report) = decode_report(telegram.operate_code, &telegram.payload)? else {
            log::trace!(
                "{identity}: ignoring {:?} from {}",
                telegram.operate_code,
                telegram.source
            );
            return Ok(false);
        };

        if !identity::matches(&report, identity) {
            log::trace!("{identity}: {:?} addressed to another unit", telegram.operate_code);
            return Ok(false);
        }

        self.update(&report, identity, telegram)?;
        Ok(true)
    }

    fn update(
        &mut self,
        report: &SensorReport<'_>,
        identity: &SensorIdentity,
        telegram: &Telegram,
    ) -> Result<(), BusproError> {
        match *report {
            SensorReport::SensorStatus {
                success,
                temperature,
                brightness,
                motion,
                sonic,
                dry_contact_1,
                dry_contact_2,
            } => {
                self.current_temperature = Some(temperature);
                self.motion = Some(motion);
                self.sonic = Some(sonic);
                self.dry_contact_1 = Some(dry_contact_1);
                self.dry_contact_2 = Some(dry_contact_2);
                if success {
                    self.brightness = Some(brightness);
                }
            }
            SensorReport::MotionStatus { motion } => {
                self.motion = Some(motion);
            }
            SensorReport::SensorsInOneStatus {
                temperature,
                motion,
                dry_contact_1,
                dry_contact_2,
            } => {
                self.current_temperature = Some(temperature);
                self.motion = Some(motion);
                self.dry_contact_1 = Some(dry_contact_1);
                self.dry_contact_2 = Some(dry_contact_2);
            }
            SensorReport::BroadcastSensorStatus {
                temperature,
                brightness,
                motion,
                sonic,
                dry_contact_1,
                dry_contact_2,
            } => {
                self.current_temperature = Some(temperature);
                self.brightness = Some(brightness);
                self.motion = Some(motion);
                self.sonic = Some(sonic);
                self.dry_contact_1 = Some(dry_contact_1);
                self.dry_contact_2 = Some(dry_contact_2);
            }
            SensorReport::Temperature { temperature } => {
                self.current_temperature = Some(temperature);
            }
            SensorReport::UniversalSwitchStatus { status, .. } => {
                self.universal_switch_status = status;
            }
            SensorReport::UniversalSwitchBroadcast { payload, .. } => {
                // The switch number doubles as the payload offset.
                if let Some(number) = identity.universal_switch_number {
                    self.universal_switch_status = indexed(telegram, payload, number)?;
                }
            }
            SensorReport::ChannelsStatus { payload, .. } => {
                if let Some(number) = identity.channel_number {
                    self.channel_status = indexed(telegram, payload, number)?;
                }
            }
            SensorReport::SingleChannelStatus { status, .. } => {
                self.channel_status = status;
            }
            SensorReport::DryContactStatus { status, .. } => {
                self.switch_status = status;
            }
        }
        Ok(())
    }

    pub fn current_temperature(&self) -> Option<u8> {
        self.current_temperature
    }

    pub fn raw_brightness(&self) -> Option<u16> {
        self.brightness
    }

    pub fn motion(&self) -> Option<u8> {
        self.motion
    }

    pub fn sonic(&self) -> Option<u8> {
        self.sonic
    }

    pub fn dry_contact_1(&self) -> Option<u8> {
        self.dry_contact_1
    }

    pub fn dry_contact_2(&self) -> Option<u8> {
        self.dry_contact_2
    }

    pub fn universal_switch_status(&self) -> u8 {
        self.universal_switch_status
    }

    pub fn channel_status(&self) -> u8 {
        self.channel_status
    }

    pub fn switch_status(&self) -> u8 {
        self.switch_status
    }

    /// Temperature in degrees for a device of the given kind.
    pub fn temperature(&self, kind: DeviceKind) -> Option<i16> {
        let raw = i16::from(self.current_temperature?);
        if kind.has_temperature_bias() {
            Some(raw - MULTI_SENSOR_TEMPERATURE_OFFSET)
        } else {
            Some(raw)
        }
    }

    pub fn brightness(&self) -> u16 {
        self.brightness.unwrap_or(0)
    }

    pub fn movement(&self) -> bool {
        self.motion == Some(BUSPRO_STATUS_ON) || self.sonic == Some(BUSPRO_STATUS_ON)
    }

    pub fn dry_contact_1_is_on(&self) -> bool {
        self.dry_contact_1 == Some(BUSPRO_STATUS_ON)
    }

    pub fn dry_contact_2_is_on(&self) -> bool {
        self.dry_contact_2 == Some(BUSPRO_STATUS_ON)
    }

    pub fn universal_switch_is_on(&self) -> bool {
        self.universal_switch_status == BUSPRO_STATUS_ON
    }

    pub fn single_channel_is_on(&self) -> bool {
        self.channel_status > 0
    }

    pub fn switch_status_is_on(&self) -> bool {
        self.switch_status == BUSPRO_STATUS_ON
    }
}

fn indexed(telegram: &Telegram, payload: &[u8], index: u8) -> Result<u8, BusproError> {
    payload
        .get(index as usize)
        .copied()
        .ok_or(BusproError::PayloadIndexOutOfRange {
            operate_code: telegram.operate_code,
            index: index as usize,
            len: payload.len(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buspro::telegram::{DeviceAddress, OperateCode};
    use crate::constants::{BUSPRO_FAILURE, BUSPRO_SUCCESS};

    const ADDR: DeviceAddress = DeviceAddress::new(1, 40);

    fn telegram(op: OperateCode, payload: &[u8]) -> Telegram {
        Telegram::new(op, ADDR, payload.to_vec())
    }

    #[test]
    fn test_fresh_state_is_empty() {
        let state = SensorState::new();
        assert_eq!(state.temperature(DeviceKind::Generic), None);
        assert_eq!(state.brightness(), 0);
        assert!(!state.movement());
        assert!(!state.universal_switch_is_on());
        assert!(!state.single_channel_is_on());
        assert!(!state.switch_status_is_on());
    }

    #[test]
    fn test_failed_read_keeps_brightness() {
        let id = SensorIdentity::new(ADDR, DeviceKind::Generic);
        let mut state = SensorState::new();
        let ok = telegram(
            OperateCode::ReadSensorStatusResponse,
            &[BUSPRO_SUCCESS, 20, 0, 80, 0, 0, 0, 0],
        );
        let failed = telegram(
            OperateCode::ReadSensorStatusResponse,
            &[BUSPRO_FAILURE, 23, 0, 10, 1, 0, 0, 0],
        );
        assert!(state.apply(&id, &ok).unwrap());
        assert!(state.apply(&id, &failed).unwrap());
        assert_eq!(state.raw_brightness(), Some(80));
        assert_eq!(state.current_temperature(), Some(23));
        assert_eq!(state.motion(), Some(1));
    }

    #[test]
    fn test_other_device_is_ignored() {
        let id = SensorIdentity::new(DeviceAddress::new(1, 41), DeviceKind::Generic);
        let mut state = SensorState::new();
        let t = telegram(OperateCode::BroadcastTemperatureResponse, &[0, 25]);
        assert!(!state.apply(&id, &t).unwrap());
        assert_eq!(state, SensorState::new());
    }

    #[test]
    fn test_broadcast_reads_status_at_switch_number() {
        let id = SensorIdentity::new(ADDR, DeviceKind::Generic).with_universal_switch(2);
        let mut state = SensorState::new();
        let t = telegram(OperateCode::BroadcastStatusOfUniversalSwitch, &[3, 0, 1, 0]);
        assert!(state.apply(&id, &t).unwrap());
        assert!(state.universal_switch_is_on());
    }

    #[test]
    fn test_broadcast_index_past_payload_is_error() {
        let id = SensorIdentity::new(ADDR, DeviceKind::Generic).with_channel(3);
        let mut state = SensorState::new();
        let t = telegram(OperateCode::ReadStatusOfChannelsResponse, &[3, 0, 1]);
        assert_eq!(
            state.apply(&id, &t),
            Err(BusproError::PayloadIndexOutOfRange {
                operate_code: OperateCode::ReadStatusOfChannelsResponse,
                index: 3,
                len: 3,
            })
        );
        assert_eq!(state, SensorState::new());
    }

    #[test]
    fn test_biased_temperature() {
        let mut state = SensorState::new();
        let id = SensorIdentity::new(ADDR, DeviceKind::TwelveInOne);
        state
            .apply(&id, &telegram(OperateCode::BroadcastTemperatureResponse, &[0, 10]))
            .unwrap();
        assert_eq!(state.temperature(DeviceKind::TwelveInOne), Some(-10));
        assert_eq!(state.temperature(DeviceKind::EightInOne), Some(-10));
        assert_eq!(state.temperature(DeviceKind::Dlp), Some(10));
        assert_eq!(state.temperature(DeviceKind::Generic), Some(10));
    }
}
