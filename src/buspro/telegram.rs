//! # Buspro Telegram
//!
//! This module defines the decoded telegram envelope and the HDL Buspro wire codec.
//! A telegram carries an operate code, the source and target device addresses and an
//! opaque payload whose layout depends on the operate code.
//!
//! ## Wire format
//!
//! ```text
//! [sender ip: 4] [HDLMIRACLE: 10]          <- UDP datagrams only
//! AA AA | len | src subnet | src device | device type: 2 | opcode: 2
//!       | dst subnet | dst device | content: len - 11 | crc: 2
//! ```
//!
//! The length byte counts itself through the CRC. The CRC is CRC-16/XMODEM over the
//! length byte through the end of the content.
//!
//! ## Usage
//!
//! ```ignore
//! let telegram = decode_datagram(&datagram)?;
//! match telegram.operate_code {
//!     OperateCode::ReadSensorStatusResponse => { /* ... */ }
//!     _ => {}
//! }
//! let bytes = pack_frame(&telegram)?;
//! ```

use crate::constants::*;
use crate::error::BusproError;
use bytes::{BufMut, BytesMut};
use crc::{Crc, CRC_16_XMODEM};
use nom::bytes::complete::{tag, take};
use nom::number::complete::{be_u16, be_u8};
use nom::IResult;
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

const CRC16: Crc<u16> = Crc::<u16>::new(&CRC_16_XMODEM);

/// Subnet/device pair identifying one node on the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeviceAddress {
    pub subnet_id: u8,
    pub device_id: u8,
}

impl DeviceAddress {
    pub const BROADCAST: DeviceAddress = DeviceAddress {
        subnet_id: BUSPRO_BROADCAST_ID,
        device_id: BUSPRO_BROADCAST_ID,
    };

    pub const fn new(subnet_id: u8, device_id: u8) -> Self {
        DeviceAddress {
            subnet_id,
            device_id,
        }
    }
}

impl fmt::Display for DeviceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.subnet_id, self.device_id)
    }
}

impl From<(u8, u8)> for DeviceAddress {
    fn from((subnet_id, device_id): (u8, u8)) -> Self {
        DeviceAddress::new(subnet_id, device_id)
    }
}

impl FromStr for DeviceAddress {
    type Err = BusproError;

    /// Parses `"subnet.device"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().split('.');
        let (Some(subnet), Some(device), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(BusproError::InvalidAddress(s.to_string()));
        };
        let parse = |part: &str| {
            part.trim()
                .parse::<u8>()
                .map_err(|_| BusproError::InvalidAddress(s.to_string()))
        };
        Ok(DeviceAddress::new(parse(subnet)?, parse(device)?))
    }
}

/// Outcome byte carried by some responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SuccessOrFailure {
    Success = BUSPRO_SUCCESS,
    Failure = BUSPRO_FAILURE,
}

impl SuccessOrFailure {
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            BUSPRO_SUCCESS => Some(Self::Success),
            BUSPRO_FAILURE => Some(Self::Failure),
            _ => None,
        }
    }

    pub fn is_success_byte(byte: u8) -> bool {
        byte == BUSPRO_SUCCESS
    }
}

impl From<SuccessOrFailure> for u8 {
    fn from(value: SuccessOrFailure) -> Self {
        value as u8
    }
}

/// Operate codes understood by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum OperateCode {
    SingleChannelControl = BUSPRO_OP_SINGLE_CHANNEL_CONTROL,
    SingleChannelControlResponse = BUSPRO_OP_SINGLE_CHANNEL_CONTROL_RESPONSE,
    ReadStatusOfChannels = BUSPRO_OP_READ_STATUS_OF_CHANNELS,
    ReadStatusOfChannelsResponse = BUSPRO_OP_READ_STATUS_OF_CHANNELS_RESPONSE,
    ReadDryContactStatus = BUSPRO_OP_READ_DRY_CONTACT_STATUS,
    ReadDryContactStatusResponse = BUSPRO_OP_READ_DRY_CONTACT_STATUS_RESPONSE,
    ReadSensorStatus = BUSPRO_OP_READ_SENSOR_STATUS,
    ReadSensorStatusResponse = BUSPRO_OP_READ_SENSOR_STATUS_RESPONSE,
    BroadcastSensorStatusAutoResponse = BUSPRO_OP_BROADCAST_SENSOR_STATUS_AUTO_RESPONSE,
    ReadSensorsInOneStatus = BUSPRO_OP_READ_SENSORS_IN_ONE_STATUS,
    ReadSensorsInOneStatusResponse = BUSPRO_OP_READ_SENSORS_IN_ONE_STATUS_RESPONSE,
    BroadcastSensorStatusResponse = BUSPRO_OP_BROADCAST_SENSOR_STATUS_RESPONSE,
    ReadMotionSensorStatus = BUSPRO_OP_READ_MOTION_SENSOR_STATUS,
    ReadMotionSensorStatusResponse = BUSPRO_OP_READ_MOTION_SENSOR_STATUS_RESPONSE,
    ReadFloorHeatingStatus = BUSPRO_OP_READ_FLOOR_HEATING_STATUS,
    ReadFloorHeatingStatusResponse = BUSPRO_OP_READ_FLOOR_HEATING_STATUS_RESPONSE,
    BroadcastStatusOfUniversalSwitch = BUSPRO_OP_BROADCAST_STATUS_OF_UNIVERSAL_SWITCH,
    ReadStatusOfUniversalSwitch = BUSPRO_OP_READ_STATUS_OF_UNIVERSAL_SWITCH,
    ReadStatusOfUniversalSwitchResponse = BUSPRO_OP_READ_STATUS_OF_UNIVERSAL_SWITCH_RESPONSE,
    UniversalSwitchControl = BUSPRO_OP_UNIVERSAL_SWITCH_CONTROL,
    UniversalSwitchControlResponse = BUSPRO_OP_UNIVERSAL_SWITCH_CONTROL_RESPONSE,
    BroadcastTemperatureResponse = BUSPRO_OP_BROADCAST_TEMPERATURE_RESPONSE,
}

impl OperateCode {
    pub const ALL: [OperateCode; 22] = [
        OperateCode::SingleChannelControl,
        OperateCode::SingleChannelControlResponse,
        OperateCode::ReadStatusOfChannels,
        OperateCode::ReadStatusOfChannelsResponse,
        OperateCode::ReadDryContactStatus,
        OperateCode::ReadDryContactStatusResponse,
        OperateCode::ReadSensorStatus,
        OperateCode::ReadSensorStatusResponse,
        OperateCode::BroadcastSensorStatusAutoResponse,
        OperateCode::ReadSensorsInOneStatus,
        OperateCode::ReadSensorsInOneStatusResponse,
        OperateCode::BroadcastSensorStatusResponse,
        OperateCode::ReadMotionSensorStatus,
        OperateCode::ReadMotionSensorStatusResponse,
        OperateCode::ReadFloorHeatingStatus,
        OperateCode::ReadFloorHeatingStatusResponse,
        OperateCode::BroadcastStatusOfUniversalSwitch,
        OperateCode::ReadStatusOfUniversalSwitch,
        OperateCode::ReadStatusOfUniversalSwitchResponse,
        OperateCode::UniversalSwitchControl,
        OperateCode::UniversalSwitchControlResponse,
        OperateCode::BroadcastTemperatureResponse,
    ];

    /// Numeric value as it appears on the wire.
    pub fn code(self) -> u16 {
        self as u16
    }
}

impl TryFrom<u16> for OperateCode {
    type Error = BusproError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        OperateCode::ALL
            .iter()
            .copied()
            .find(|op| op.code() == value)
            .ok_or(BusproError::UnknownOperateCode(value))
    }
}

/// One decoded bus message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Telegram {
    pub source: DeviceAddress,
    pub source_device_type: u16,
    pub operate_code: OperateCode,
    pub target: DeviceAddress,
    pub payload: Vec<u8>,
}

impl Telegram {
    /// Telegram from `source` addressed to everyone.
    pub fn new(operate_code: OperateCode, source: DeviceAddress, payload: Vec<u8>) -> Self {
        Telegram {
            source,
            source_device_type: 0,
            operate_code,
            target: DeviceAddress::BROADCAST,
            payload,
        }
    }

    pub fn with_target(mut self, target: DeviceAddress) -> Self {
        self.target = target;
        self
    }

    pub fn with_device_type(mut self, device_type: u16) -> Self {
        self.source_device_type = device_type;
        self
    }
}

/// A bus frame as it sits on the wire, before operate code and CRC checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusproFrame {
    pub length: u8,
    pub source: DeviceAddress,
    pub source_device_type: u16,
    pub operate_code: u16,
    pub target: DeviceAddress,
    pub content: Vec<u8>,
    pub checksum: u16,
}

impl BusproFrame {
    /// Bytes covered by the CRC.
    fn crc_input(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.length as usize);
        buf.push(self.length);
        buf.push(self.source.subnet_id);
        buf.push(self.source.device_id);
        buf.extend_from_slice(&self.source_device_type.to_be_bytes());
        buf.extend_from_slice(&self.operate_code.to_be_bytes());
        buf.push(self.target.subnet_id);
        buf.push(self.target.device_id);
        buf.extend_from_slice(&self.content);
        buf
    }
}

/// CRC-16/XMODEM as used by Buspro frames.
pub fn checksum(data: &[u8]) -> u16 {
    CRC16.checksum(data)
}

fn parse_address(input: &[u8]) -> IResult<&[u8], DeviceAddress> {
    let (input, subnet_id) = be_u8(input)?;
    let (input, device_id) = be_u8(input)?;
    Ok((input, DeviceAddress::new(subnet_id, device_id)))
}

/// Uses the `nom` crate to parse a Buspro bus frame starting at the lead code.
pub fn parse_frame(input: &[u8]) -> IResult<&[u8], BusproFrame> {
    let (input, _) = tag(&BUSPRO_LEAD_CODE[..])(input)?;
    let (input, length) = be_u8(input)?;
    if (length as usize) < BUSPRO_FRAME_OVERHEAD {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::LengthValue,
        )));
    }
    let (input, source) = parse_address(input)?;
    let (input, source_device_type) = be_u16(input)?;
    let (input, operate_code) = be_u16(input)?;
    let (input, target) = parse_address(input)?;
    let (input, content) = take(length as usize - BUSPRO_FRAME_OVERHEAD)(input)?;
    let (input, checksum) = be_u16(input)?;

    Ok((
        input,
        BusproFrame {
            length,
            source,
            source_device_type,
            operate_code,
            target,
            content: content.to_vec(),
            checksum,
        },
    ))
}

/// Verifies the CRC of a parsed frame.
pub fn verify_frame(frame: &BusproFrame) -> Result<(), BusproError> {
    let calculated = checksum(&frame.crc_input());
    if calculated != frame.checksum {
        return Err(BusproError::InvalidChecksum {
            expected: frame.checksum,
            calculated,
        });
    }
    Ok(())
}

/// Parses, verifies and types a bus frame.
pub fn decode_frame(input: &[u8]) -> Result<Telegram, BusproError> {
    let (_, frame) =
        parse_frame(input).map_err(|e| BusproError::FrameParseError(format!("{e:?}")))?;
    verify_frame(&frame)?;
    let operate_code = OperateCode::try_from(frame.operate_code)?;

    Ok(Telegram {
        source: frame.source,
        source_device_type: frame.source_device_type,
        operate_code,
        target: frame.target,
        payload: frame.content,
    })
}

/// Decodes a UDP datagram (sender IP, marker, bus frame).
pub fn decode_datagram(input: &[u8]) -> Result<Telegram, BusproError> {
    if input.len() < BUSPRO_DATAGRAM_HEADER_LEN {
        return Err(BusproError::FrameParseError(format!(
            "datagram too short: {} bytes",
            input.len()
        )));
    }
    if &input[4..BUSPRO_DATAGRAM_HEADER_LEN] != BUSPRO_DATAGRAM_MARKER {
        return Err(BusproError::FrameParseError(
            "missing HDLMIRACLE marker".into(),
        ));
    }
    decode_frame(&input[BUSPRO_DATAGRAM_HEADER_LEN..])
}

/// Decodes either a bare bus frame or a full UDP datagram.
pub fn decode_any(input: &[u8]) -> Result<Telegram, BusproError> {
    if input.starts_with(&BUSPRO_LEAD_CODE) {
        decode_frame(input)
    } else {
        decode_datagram(input)
    }
}

/// Packs a telegram into a bus frame, CRC included.
pub fn pack_frame(telegram: &Telegram) -> Result<Vec<u8>, BusproError> {
    if telegram.payload.len() > BUSPRO_MAX_CONTENT_LEN {
        return Err(BusproError::FrameParseError(format!(
            "content of {} bytes does not fit in one frame",
            telegram.payload.len()
        )));
    }

    let length = (BUSPRO_FRAME_OVERHEAD + telegram.payload.len()) as u8;
    let mut buf = BytesMut::with_capacity(length as usize + BUSPRO_LEAD_CODE.len());
    buf.put_slice(&BUSPRO_LEAD_CODE);
    buf.put_u8(length);
    buf.put_u8(telegram.source.subnet_id);
    buf.put_u8(telegram.source.device_id);
    buf.put_u16(telegram.source_device_type);
    buf.put_u16(telegram.operate_code.code());
    buf.put_u8(telegram.target.subnet_id);
    buf.put_u8(telegram.target.device_id);
    buf.put_slice(&telegram.payload);
    let crc = checksum(&buf[BUSPRO_LEAD_CODE.len()..]);
    buf.put_u16(crc);

    Ok(buf.to_vec())
}

/// Packs a telegram into a UDP datagram sent from `sender_ip`.
pub fn pack_datagram(telegram: &Telegram, sender_ip: Ipv4Addr) -> Result<Vec<u8>, BusproError> {
    let frame = pack_frame(telegram)?;
    let mut buf = BytesMut::with_capacity(BUSPRO_DATAGRAM_HEADER_LEN + frame.len());
    buf.put_slice(&sender_ip.octets());
    buf.put_slice(BUSPRO_DATAGRAM_MARKER);
    buf.put_slice(&frame);
    Ok(buf.to_vec())
}
