//! # Status Requests
//!
//! Each sensor flavor reads its status with a different request. The request is
//! fire-and-forget: the answer arrives later as an ordinary telegram.

use crate::buspro::telegram::{DeviceAddress, OperateCode, Telegram};
use crate::config::BusConfig;
use crate::constants::BUSPRO_DRY_CONTACT_AREA;
use crate::sensor::identity::{DeviceKind, SensorIdentity};

/// Outbound status read, one shape per flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusRequest {
    UniversalSwitch {
        address: DeviceAddress,
        switch_number: u8,
    },
    Channels {
        address: DeviceAddress,
    },
    FloorHeating {
        address: DeviceAddress,
    },
    DryContact {
        address: DeviceAddress,
        switch_number: Option<u8>,
    },
    SensorsInOne {
        address: DeviceAddress,
    },
    MotionSensor {
        address: DeviceAddress,
    },
    Sensor {
        address: DeviceAddress,
    },
}

/// Picks the status request for a sensor.
///
/// Precedence: universal switch, channel, floor heating, dry contact, sensors-in-one,
/// motion, generic. Only the first applicable shape is built.
pub fn build_status_request(identity: &SensorIdentity) -> StatusRequest {
    let address = identity.address;
    match (
        identity.universal_switch_number,
        identity.channel_number,
        identity.kind,
    ) {
        (Some(switch_number), _, _) => StatusRequest::UniversalSwitch {
            address,
            switch_number,
        },
        (None, Some(_), _) => StatusRequest::Channels { address },
        (None, None, DeviceKind::Dlp) => StatusRequest::FloorHeating { address },
        (None, None, DeviceKind::DryContact) => StatusRequest::DryContact {
            address,
            switch_number: identity.switch_number,
        },
        (None, None, DeviceKind::SensorsInOne) => StatusRequest::SensorsInOne { address },
        (None, None, DeviceKind::Pir) => StatusRequest::MotionSensor { address },
        (None, None, DeviceKind::Generic | DeviceKind::TwelveInOne | DeviceKind::EightInOne) => {
            StatusRequest::Sensor { address }
        }
    }
}

impl StatusRequest {
    /// Device the request is addressed to.
    pub fn address(&self) -> DeviceAddress {
        match *self {
            StatusRequest::UniversalSwitch { address, .. }
            | StatusRequest::Channels { address }
            | StatusRequest::FloorHeating { address }
            | StatusRequest::DryContact { address, .. }
            | StatusRequest::SensorsInOne { address }
            | StatusRequest::MotionSensor { address }
            | StatusRequest::Sensor { address } => address,
        }
    }

    pub fn operate_code(&self) -> OperateCode {
        match self {
            StatusRequest::UniversalSwitch { .. } => OperateCode::ReadStatusOfUniversalSwitch,
            StatusRequest::Channels { .. } => OperateCode::ReadStatusOfChannels,
            StatusRequest::FloorHeating { .. } => OperateCode::ReadFloorHeatingStatus,
            StatusRequest::DryContact { .. } => OperateCode::ReadDryContactStatus,
            StatusRequest::SensorsInOne { .. } => OperateCode::ReadSensorsInOneStatus,
            StatusRequest::MotionSensor { .. } => OperateCode::ReadMotionSensorStatus,
            StatusRequest::Sensor { .. } => OperateCode::ReadSensorStatus,
        }
    }

    pub fn payload(&self) -> Vec<u8> {
        match *self {
            StatusRequest::UniversalSwitch { switch_number, .. } => vec![switch_number],
            StatusRequest::DryContact { switch_number, .. } => {
                let mut payload = vec![BUSPRO_DRY_CONTACT_AREA];
                payload.extend(switch_number);
                payload
            }
            StatusRequest::Channels { .. }
            | StatusRequest::FloorHeating { .. }
            | StatusRequest::SensorsInOne { .. }
            | StatusRequest::MotionSensor { .. }
            | StatusRequest::Sensor { .. } => Vec::new(),
        }
    }

    /// Telegram sent from the configured sender to the target device.
    pub fn to_telegram(&self, bus: &BusConfig) -> Telegram {
        Telegram::new(self.operate_code(), bus.sender, self.payload())
            .with_device_type(bus.sender_device_type)
            .with_target(self.address())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor::identity::Flavor;

    const ADDR: DeviceAddress = DeviceAddress::new(1, 50);

    #[test]
    fn test_universal_switch_wins_over_channel() {
        let id = SensorIdentity::new(ADDR, DeviceKind::Generic)
            .with_channel(1)
            .with_universal_switch(7);
        let request = build_status_request(&id);
        assert_eq!(
            request,
            StatusRequest::UniversalSwitch {
                address: ADDR,
                switch_number: 7
            }
        );
        assert_eq!(request.payload(), vec![7]);
    }

    #[test]
    fn test_channel_wins_over_kind() {
        let id = SensorIdentity::new(ADDR, DeviceKind::Dlp).with_channel(1);
        assert_eq!(build_status_request(&id), StatusRequest::Channels { address: ADDR });
    }

    #[test]
    fn test_dry_contact_payload() {
        let id = SensorIdentity::new(ADDR, DeviceKind::DryContact).with_switch(2);
        let request = build_status_request(&id);
        assert_eq!(request.operate_code(), OperateCode::ReadDryContactStatus);
        assert_eq!(request.payload(), vec![1, 2]);

        let id = SensorIdentity::new(ADDR, DeviceKind::DryContact);
        assert_eq!(build_status_request(&id).payload(), vec![1]);
    }

    #[test]
    fn test_request_agrees_with_flavor() {
        let cases = [
            (DeviceKind::Pir, Flavor::Motion, OperateCode::ReadMotionSensorStatus),
            (
                DeviceKind::SensorsInOne,
                Flavor::SensorsInOne,
                OperateCode::ReadSensorsInOneStatus,
            ),
            (DeviceKind::Dlp, Flavor::FloorHeating, OperateCode::ReadFloorHeatingStatus),
            (DeviceKind::EightInOne, Flavor::Generic, OperateCode::ReadSensorStatus),
            (DeviceKind::Generic, Flavor::Generic, OperateCode::ReadSensorStatus),
        ];
        for (kind, flavor, op) in cases {
            let id = SensorIdentity::new(ADDR, kind);
            assert_eq!(id.flavor(), flavor);
            assert_eq!(build_status_request(&id).operate_code(), op);
        }
    }

    #[test]
    fn test_to_telegram_addressing() {
        let bus = BusConfig::default();
        let id = SensorIdentity::new(ADDR, DeviceKind::Generic);
        let telegram = build_status_request(&id).to_telegram(&bus);
        assert_eq!(telegram.source, bus.sender);
        assert_eq!(telegram.source_device_type, bus.sender_device_type);
        assert_eq!(telegram.target, ADDR);
        assert_eq!(telegram.operate_code, OperateCode::ReadSensorStatus);
        assert!(telegram.payload.is_empty());
    }
}
