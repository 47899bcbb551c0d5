//! # Sensor Identity
//!
//! Who a sensor instance is on the bus: the device address, the hardware kind and
//! the optional discriminators (universal switch, channel, dry contact switch) that
//! narrow which telegrams belong to it.

use crate::buspro::telegram::DeviceAddress;
use crate::payload::decode::SensorReport;
use std::fmt;

/// Hardware kind of the device behind a sensor, as named in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeviceKind {
    #[default]
    Generic,
    /// DLP panel; reports floor-heating temperature.
    Dlp,
    DryContact,
    SensorsInOne,
    Pir,
    TwelveInOne,
    EightInOne,
}

impl DeviceKind {
    /// Configuration name. Unknown names map to [`DeviceKind::Generic`].
    pub fn from_name(name: &str) -> Self {
        match name.trim() {
            "dlp" => DeviceKind::Dlp,
            "dry_contact" => DeviceKind::DryContact,
            "sensors_in_one" => DeviceKind::SensorsInOne,
            "pir" => DeviceKind::Pir,
            "12in1" => DeviceKind::TwelveInOne,
            "8in1" => DeviceKind::EightInOne,
            _ => DeviceKind::Generic,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DeviceKind::Generic => "",
            DeviceKind::Dlp => "dlp",
            DeviceKind::DryContact => "dry_contact",
            DeviceKind::SensorsInOne => "sensors_in_one",
            DeviceKind::Pir => "pir",
            DeviceKind::TwelveInOne => "12in1",
            DeviceKind::EightInOne => "8in1",
        }
    }

    /// Multi sensors report temperature with a fixed bias.
    pub fn has_temperature_bias(self) -> bool {
        matches!(self, DeviceKind::TwelveInOne | DeviceKind::EightInOne)
    }
}

impl From<&str> for DeviceKind {
    fn from(name: &str) -> Self {
        DeviceKind::from_name(name)
    }
}

/// Sensor sub-type. Decides which status request a sensor issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flavor {
    UniversalSwitch,
    MultiChannel,
    FloorHeating,
    DryContact,
    SensorsInOne,
    Motion,
    Generic,
}

/// Address plus discriminators of one logical sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SensorIdentity {
    pub address: DeviceAddress,
    pub kind: DeviceKind,
    pub universal_switch_number: Option<u8>,
    pub channel_number: Option<u8>,
    pub switch_number: Option<u8>,
}

impl SensorIdentity {
    pub fn new(address: DeviceAddress, kind: DeviceKind) -> Self {
        SensorIdentity {
            address,
            kind,
            universal_switch_number: None,
            channel_number: None,
            switch_number: None,
        }
    }

    pub fn with_universal_switch(mut self, number: u8) -> Self {
        self.universal_switch_number = Some(number);
        self
    }

    pub fn with_channel(mut self, number: u8) -> Self {
        self.channel_number = Some(number);
        self
    }

    pub fn with_switch(mut self, number: u8) -> Self {
        self.switch_number = Some(number);
        self
    }

    /// Flavor in precedence order: universal switch, channel, then the device kind.
    pub fn flavor(&self) -> Flavor {
        if self.universal_switch_number.is_some() {
            return Flavor::UniversalSwitch;
        }
        if self.channel_number.is_some() {
            return Flavor::MultiChannel;
        }
        match self.kind {
            DeviceKind::Dlp => Flavor::FloorHeating,
            DeviceKind::DryContact => Flavor::DryContact,
            DeviceKind::SensorsInOne => Flavor::SensorsInOne,
            DeviceKind::Pir => Flavor::Motion,
            DeviceKind::Generic | DeviceKind::TwelveInOne | DeviceKind::EightInOne => {
                Flavor::Generic
            }
        }
    }

    /// Stable identifier built from address and discriminators, for deduplication.
    pub fn device_identifier(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SensorIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn part(value: Option<u8>) -> String {
            value.map_or_else(|| "none".to_string(), |n| n.to_string())
        }
        write!(
            f,
            "{}-{}-{}-{}",
            self.address,
            part(self.universal_switch_number),
            part(self.channel_number),
            part(self.switch_number)
        )
    }
}

/// Whether a decoded report belongs to the sensor with this identity.
///
/// Reports that carry an index only match the sensor configured with that index.
/// The broadcast variants carry a count instead and match every configured index
/// up to and including it.
pub fn matches(report: &SensorReport<'_>, identity: &SensorIdentity) -> bool {
    match *report {
        SensorReport::UniversalSwitchStatus { switch_number, .. } => {
            identity.universal_switch_number == Some(switch_number)
        }
        SensorReport::UniversalSwitchBroadcast { count, .. } => identity
            .universal_switch_number
            .is_some_and(|number| number <= count),
        SensorReport::ChannelsStatus { count, .. } => {
            identity.channel_number.is_some_and(|number| number <= count)
        }
        SensorReport::SingleChannelStatus { channel_number, .. } => {
            identity.channel_number == Some(channel_number)
        }
        SensorReport::DryContactStatus { switch_number, .. } => {
            identity.switch_number == Some(switch_number)
        }
        SensorReport::SensorStatus { .. }
        | SensorReport::MotionStatus { .. }
        | SensorReport::SensorsInOneStatus { .. }
        | SensorReport::BroadcastSensorStatus { .. }
        | SensorReport::Temperature { .. } => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address() -> DeviceAddress {
        DeviceAddress::new(1, 30)
    }

    #[test]
    fn test_kind_names() {
        for kind in [
            DeviceKind::Dlp,
            DeviceKind::DryContact,
            DeviceKind::SensorsInOne,
            DeviceKind::Pir,
            DeviceKind::TwelveInOne,
            DeviceKind::EightInOne,
        ] {
            assert_eq!(DeviceKind::from_name(kind.name()), kind);
        }
        assert_eq!(DeviceKind::from_name("thermostat"), DeviceKind::Generic);
        assert_eq!(DeviceKind::from(""), DeviceKind::Generic);
    }

    #[test]
    fn test_flavor_precedence() {
        let id = SensorIdentity::new(address(), DeviceKind::Dlp)
            .with_channel(2)
            .with_universal_switch(5);
        assert_eq!(id.flavor(), Flavor::UniversalSwitch);

        let id = SensorIdentity::new(address(), DeviceKind::Dlp).with_channel(2);
        assert_eq!(id.flavor(), Flavor::MultiChannel);

        let id = SensorIdentity::new(address(), DeviceKind::Dlp);
        assert_eq!(id.flavor(), Flavor::FloorHeating);

        let id = SensorIdentity::new(address(), DeviceKind::TwelveInOne);
        assert_eq!(id.flavor(), Flavor::Generic);
    }

    #[test]
    fn test_identifier_distinguishes_zero_from_absent() {
        let absent = SensorIdentity::new(address(), DeviceKind::Generic);
        let zero = absent.with_channel(0);
        assert_eq!(absent.device_identifier(), "1.30-none-none-none");
        assert_eq!(zero.device_identifier(), "1.30-none-0-none");
    }

    #[test]
    fn test_universal_switch_match_is_exact() {
        let report = SensorReport::UniversalSwitchStatus {
            switch_number: 3,
            status: 1,
        };
        let id = SensorIdentity::new(address(), DeviceKind::Generic);
        assert!(!matches(&report, &id));
        assert!(matches(&report, &id.with_universal_switch(3)));
        assert!(!matches(&report, &id.with_universal_switch(4)));
    }

    #[test]
    fn test_broadcast_match_uses_count() {
        let payload = [4, 1, 0, 1, 0];
        let report = SensorReport::UniversalSwitchBroadcast { count: 4, payload: &payload };
        let id = SensorIdentity::new(address(), DeviceKind::Generic);
        assert!(!matches(&report, &id));
        assert!(matches(&report, &id.with_universal_switch(4)));
        assert!(!matches(&report, &id.with_universal_switch(5)));

        let report = SensorReport::ChannelsStatus { count: 2, payload: &payload };
        assert!(matches(&report, &id.with_channel(2)));
        assert!(!matches(&report, &id.with_channel(3)));
    }

    #[test]
    fn test_undiscriminated_reports_always_match() {
        let report = SensorReport::Temperature { temperature: 21 };
        let id = SensorIdentity::new(address(), DeviceKind::Dlp).with_switch(1);
        assert!(matches(&report, &id));
    }
}
