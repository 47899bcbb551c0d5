//! Buspro Protocol Constants
//!
//! This module defines constants used in the HDL Buspro protocol implementation:
//! operate-code values, frame layout and the defaults used by the sensor core.

use std::time::Duration;

// ----------------------------------------------------------------------------
// Operate codes
// ----------------------------------------------------------------------------

pub const BUSPRO_OP_SINGLE_CHANNEL_CONTROL: u16 = 0x0031;
pub const BUSPRO_OP_SINGLE_CHANNEL_CONTROL_RESPONSE: u16 = 0x0032;
pub const BUSPRO_OP_READ_STATUS_OF_CHANNELS: u16 = 0x0033;
pub const BUSPRO_OP_READ_STATUS_OF_CHANNELS_RESPONSE: u16 = 0x0034;

pub const BUSPRO_OP_READ_DRY_CONTACT_STATUS: u16 = 0x15CE;
pub const BUSPRO_OP_READ_DRY_CONTACT_STATUS_RESPONSE: u16 = 0x15CF;

pub const BUSPRO_OP_READ_SENSOR_STATUS: u16 = 0x1604;
pub const BUSPRO_OP_READ_SENSOR_STATUS_RESPONSE: u16 = 0x1605;
pub const BUSPRO_OP_BROADCAST_SENSOR_STATUS_AUTO_RESPONSE: u16 = 0x1629;
pub const BUSPRO_OP_READ_SENSORS_IN_ONE_STATUS: u16 = 0x1645;
pub const BUSPRO_OP_READ_SENSORS_IN_ONE_STATUS_RESPONSE: u16 = 0x1646;
pub const BUSPRO_OP_BROADCAST_SENSOR_STATUS_RESPONSE: u16 = 0x1647;

pub const BUSPRO_OP_READ_MOTION_SENSOR_STATUS: u16 = 0x02CA;
pub const BUSPRO_OP_READ_MOTION_SENSOR_STATUS_RESPONSE: u16 = 0x02CB;

pub const BUSPRO_OP_READ_FLOOR_HEATING_STATUS: u16 = 0x1944;
pub const BUSPRO_OP_READ_FLOOR_HEATING_STATUS_RESPONSE: u16 = 0x1945;

pub const BUSPRO_OP_BROADCAST_STATUS_OF_UNIVERSAL_SWITCH: u16 = 0xE017;
pub const BUSPRO_OP_READ_STATUS_OF_UNIVERSAL_SWITCH: u16 = 0xE018;
pub const BUSPRO_OP_READ_STATUS_OF_UNIVERSAL_SWITCH_RESPONSE: u16 = 0xE019;
pub const BUSPRO_OP_UNIVERSAL_SWITCH_CONTROL: u16 = 0xE01C;
pub const BUSPRO_OP_UNIVERSAL_SWITCH_CONTROL_RESPONSE: u16 = 0xE01D;

pub const BUSPRO_OP_BROADCAST_TEMPERATURE_RESPONSE: u16 = 0xE3E5;

// ----------------------------------------------------------------------------
// Frame layout
// ----------------------------------------------------------------------------

/// Marker that follows the sender IP in every UDP datagram
pub const BUSPRO_DATAGRAM_MARKER: &[u8; 10] = b"HDLMIRACLE";

/// Sender IPv4 address plus marker
pub const BUSPRO_DATAGRAM_HEADER_LEN: usize = 4 + BUSPRO_DATAGRAM_MARKER.len();

/// Lead code that starts every bus frame
pub const BUSPRO_LEAD_CODE: [u8; 2] = [0xAA, 0xAA];

/// Length byte value of a frame with empty content
/// (length, source subnet/device, device type, opcode, target subnet/device, crc)
pub const BUSPRO_FRAME_OVERHEAD: usize = 11;

/// Largest content a single length byte can describe
pub const BUSPRO_MAX_CONTENT_LEN: usize = u8::MAX as usize - BUSPRO_FRAME_OVERHEAD;

/// Broadcast subnet/device id
pub const BUSPRO_BROADCAST_ID: u8 = 0xFF;

// ----------------------------------------------------------------------------
// Response fields and defaults
// ----------------------------------------------------------------------------

/// Success marker in the first byte of a read-sensor-status response
pub const BUSPRO_SUCCESS: u8 = 0xF8;

/// Failure marker in the first byte of a read-sensor-status response
pub const BUSPRO_FAILURE: u8 = 0xF5;

/// Status value of an "on" universal switch, dry contact or motion flag
pub const BUSPRO_STATUS_ON: u8 = 1;

/// Status value of an "off" universal switch
pub const BUSPRO_STATUS_OFF: u8 = 0;

/// Leading byte of a read-dry-contact-status request
pub const BUSPRO_DRY_CONTACT_AREA: u8 = 1;

/// Temperature bias reported by the 8-in-1 and 12-in-1 multi sensors
pub const MULTI_SENSOR_TEMPERATURE_OFFSET: i16 = 20;

/// Default source address of outbound telegrams
pub const DEFAULT_SENDER_SUBNET_ID: u8 = 200;
pub const DEFAULT_SENDER_DEVICE_ID: u8 = 200;

/// Default source device type of outbound telegrams
pub const DEFAULT_SENDER_DEVICE_TYPE: u16 = 0xFFFE;

/// Delay before a new sensor issues its first status read
pub const DEFAULT_INITIAL_READ_DELAY: Duration = Duration::from_secs(5);

/// Capacity of each sensor's change-notification channel
pub const SENSOR_EVENT_CHANNEL_CAPACITY: usize = 32;
