//! # Sensor Payload Decoding
//!
//! Routes a telegram's operate code to the payload layout it carries and extracts
//! the fields by fixed offset. Operate codes that carry nothing a sensor cares
//! about decode to `None`. A payload shorter than its layout is reported as
//! [`BusproError::MalformedPayload`].
//!
//! | Operate code | Fields |
//! |---|---|
//! | ReadSensorStatusResponse | `[0]` success, `[1]` temp, `[2..3]` brightness, `[4]` motion, `[5]` sonic, `[6]` dry 1, `[7]` dry 2 |
//! | ReadMotionSensorStatusResponse | `[3]` motion |
//! | ReadSensorsInOneStatusResponse | `[1]` temp, `[7]` motion, `[8]` dry 1, `[9]` dry 2 |
//! | BroadcastSensorStatus(Auto)Response | `[0]` temp, `[1..2]` brightness, `[3]` motion, `[4]` sonic, `[5]` dry 1, `[6]` dry 2 |
//! | ReadFloorHeatingStatusResponse, BroadcastTemperatureResponse | `[1]` temp |
//! | ReadStatusOfUniversalSwitchResponse, UniversalSwitchControlResponse | `[0]` switch, `[1]` status |
//! | BroadcastStatusOfUniversalSwitch, ReadStatusOfChannelsResponse | `[0]` count, statuses follow |
//! | SingleChannelControlResponse | `[0]` channel, `[2]` status |
//! | ReadDryContactStatusResponse | `[1]` switch, `[2]` status |

use crate::buspro::telegram::{OperateCode, SuccessOrFailure};
use crate::error::BusproError;
use nom::bytes::complete::take;
use nom::number::complete::{be_u16, be_u8};
use nom::sequence::{preceded, tuple};
use nom::IResult;

/// Fields extracted from one sensor-relevant telegram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorReport<'a> {
    SensorStatus {
        success: bool,
        temperature: u8,
        /// Big-endian `hi << 8 | lo`, not the sum of the two bytes.
        brightness: u16,
        motion: u8,
        sonic: u8,
        dry_contact_1: u8,
        dry_contact_2: u8,
    },
    MotionStatus {
        motion: u8,
    },
    SensorsInOneStatus {
        temperature: u8,
        motion: u8,
        dry_contact_1: u8,
        dry_contact_2: u8,
    },
    BroadcastSensorStatus {
        temperature: u8,
        /// Big-endian, as in `SensorStatus`.
        brightness: u16,
        motion: u8,
        sonic: u8,
        dry_contact_1: u8,
        dry_contact_2: u8,
    },
    Temperature {
        temperature: u8,
    },
    UniversalSwitchStatus {
        switch_number: u8,
        status: u8,
    },
    /// Status of several universal switches. `payload` is the whole telegram payload;
    /// the status of switch `n` sits at `payload[n]`.
    UniversalSwitchBroadcast {
        count: u8,
        payload: &'a [u8],
    },
    /// Status of several channels, laid out like [`SensorReport::UniversalSwitchBroadcast`].
    ChannelsStatus {
        count: u8,
        payload: &'a [u8],
    },
    SingleChannelStatus {
        channel_number: u8,
        status: u8,
    },
    DryContactStatus {
        switch_number: u8,
        status: u8,
    },
}

/// Minimum payload length a sensor-relevant operate code needs, `None` for the rest.
pub fn required_payload_len(operate_code: OperateCode) -> Option<usize> {
    use OperateCode::*;
    match operate_code {
        ReadSensorStatusResponse => Some(8),
        ReadMotionSensorStatusResponse => Some(4),
        ReadSensorsInOneStatusResponse => Some(10),
        BroadcastSensorStatusResponse | BroadcastSensorStatusAutoResponse => Some(7),
        ReadFloorHeatingStatusResponse | BroadcastTemperatureResponse => Some(2),
        ReadStatusOfUniversalSwitchResponse | UniversalSwitchControlResponse => Some(2),
        BroadcastStatusOfUniversalSwitch | ReadStatusOfChannelsResponse => Some(1),
        SingleChannelControlResponse | ReadDryContactStatusResponse => Some(3),
        SingleChannelControl
        | ReadStatusOfChannels
        | ReadDryContactStatus
        | ReadSensorStatus
        | ReadSensorsInOneStatus
        | ReadMotionSensorStatus
        | ReadFloorHeatingStatus
        | ReadStatusOfUniversalSwitch
        | UniversalSwitchControl => None,
    }
}

/// Decodes the payload of a telegram with the given operate code.
pub fn decode_report(
    operate_code: OperateCode,
    payload: &[u8],
) -> Result<Option<SensorReport<'_>>, BusproError> {
    use OperateCode::*;

    let Some(required) = required_payload_len(operate_code) else {
        return Ok(None);
    };

    // An empty broadcast is a keep-alive, not a malformed status.
    if operate_code == BroadcastSensorStatusResponse && payload.is_empty() {
        return Ok(None);
    }

    let malformed = || BusproError::MalformedPayload {
        operate_code,
        required,
        actual: payload.len(),
    };
    if payload.len() < required {
        return Err(malformed());
    }

    let parsed = match operate_code {
        ReadSensorStatusResponse => sensor_status(payload),
        ReadMotionSensorStatusResponse => motion_status(payload),
        ReadSensorsInOneStatusResponse => sensors_in_one_status(payload),
        BroadcastSensorStatusResponse | BroadcastSensorStatusAutoResponse => {
            broadcast_sensor_status(payload)
        }
        ReadFloorHeatingStatusResponse | BroadcastTemperatureResponse => temperature(payload),
        ReadStatusOfUniversalSwitchResponse | UniversalSwitchControlResponse => {
            universal_switch_status(payload)
        }
        BroadcastStatusOfUniversalSwitch => be_u8(payload).map(|(rest, count)| {
            (rest, SensorReport::UniversalSwitchBroadcast { count, payload })
        }),
        ReadStatusOfChannelsResponse => be_u8(payload)
            .map(|(rest, count)| (rest, SensorReport::ChannelsStatus { count, payload })),
        SingleChannelControlResponse => single_channel_status(payload),
        ReadDryContactStatusResponse => dry_contact_status(payload),
        SingleChannelControl
        | ReadStatusOfChannels
        | ReadDryContactStatus
        | ReadSensorStatus
        | ReadSensorsInOneStatus
        | ReadMotionSensorStatus
        | ReadFloorHeatingStatus
        | ReadStatusOfUniversalSwitch
        | UniversalSwitchControl => return Ok(None),
    };

    parsed.map(|(_, report)| Some(report)).map_err(|_| malformed())
}

fn sensor_status(input: &[u8]) -> IResult<&[u8], SensorReport<'static>> {
    let (input, (flag, temperature, brightness, motion, sonic, dry_contact_1, dry_contact_2)) =
        tuple((be_u8, be_u8, be_u16, be_u8, be_u8, be_u8, be_u8))(input)?;
    Ok((
        input,
        SensorReport::SensorStatus {
            success: SuccessOrFailure::is_success_byte(flag),
            temperature,
            brightness,
            motion,
            sonic,
            dry_contact_1,
            dry_contact_2,
        },
    ))
}

fn motion_status(input: &[u8]) -> IResult<&[u8], SensorReport<'static>> {
    let (input, motion) = preceded(take(3usize), be_u8)(input)?;
    Ok((input, SensorReport::MotionStatus { motion }))
}

fn sensors_in_one_status(input: &[u8]) -> IResult<&[u8], SensorReport<'static>> {
    let (input, (_, temperature, _, motion, dry_contact_1, dry_contact_2)) =
        tuple((take(1usize), be_u8, take(5usize), be_u8, be_u8, be_u8))(input)?;
    Ok((
        input,
        SensorReport::SensorsInOneStatus {
            temperature,
            motion,
            dry_contact_1,
            dry_contact_2,
        },
    ))
}

fn broadcast_sensor_status(input: &[u8]) -> IResult<&[u8], SensorReport<'static>> {
    let (input, (temperature, brightness, motion, sonic, dry_contact_1, dry_contact_2)) =
        tuple((be_u8, be_u16, be_u8, be_u8, be_u8, be_u8))(input)?;
    Ok((
        input,
        SensorReport::BroadcastSensorStatus {
            temperature,
            brightness,
            motion,
            sonic,
            dry_contact_1,
            dry_contact_2,
        },
    ))
}

fn temperature(input: &[u8]) -> IResult<&[u8], SensorReport<'static>> {
    let (input, temperature) = preceded(take(1usize), be_u8)(input)?;
    Ok((input, SensorReport::Temperature { temperature }))
}

fn universal_switch_status(input: &[u8]) -> IResult<&[u8], SensorReport<'static>> {
    let (input, (switch_number, status)) = tuple((be_u8, be_u8))(input)?;
    Ok((
        input,
        SensorReport::UniversalSwitchStatus {
            switch_number,
            status,
        },
    ))
}

fn single_channel_status(input: &[u8]) -> IResult<&[u8], SensorReport<'static>> {
    let (input, (channel_number, _, status)) = tuple((be_u8, take(1usize), be_u8))(input)?;
    Ok((
        input,
        SensorReport::SingleChannelStatus {
            channel_number,
            status,
        },
    ))
}

fn dry_contact_status(input: &[u8]) -> IResult<&[u8], SensorReport<'static>> {
    let (input, (_, switch_number, status)) = tuple((take(1usize), be_u8, be_u8))(input)?;
    Ok((
        input,
        SensorReport::DryContactStatus {
            switch_number,
            status,
        },
    ))
}
