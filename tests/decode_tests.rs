//! Tests for payload decoding by operate code.

use buspro_rs::constants::{BUSPRO_FAILURE, BUSPRO_SUCCESS};
use buspro_rs::payload::required_payload_len;
use buspro_rs::{decode_report, BusproError, OperateCode, SensorReport};

#[test]
fn test_sensor_status_layout() {
    let payload = [BUSPRO_SUCCESS, 22, 0x01, 0x2C, 1, 0, 1, 0];
    let report = decode_report(OperateCode::ReadSensorStatusResponse, &payload)
        .unwrap()
        .unwrap();
    assert_eq!(
        report,
        SensorReport::SensorStatus {
            success: true,
            temperature: 22,
            brightness: 300,
            motion: 1,
            sonic: 0,
            dry_contact_1: 1,
            dry_contact_2: 0,
        }
    );
}

#[test]
fn test_sensor_status_failure_flag() {
    let payload = [BUSPRO_FAILURE, 22, 0, 50, 0, 0, 0, 0];
    let Some(SensorReport::SensorStatus { success, .. }) =
        decode_report(OperateCode::ReadSensorStatusResponse, &payload).unwrap()
    else {
        panic!("expected a sensor status report");
    };
    assert!(!success);
}

#[test]
fn test_motion_status_reads_byte_three() {
    let report = decode_report(OperateCode::ReadMotionSensorStatusResponse, &[9, 9, 9, 1])
        .unwrap()
        .unwrap();
    assert_eq!(report, SensorReport::MotionStatus { motion: 1 });
}

#[test]
fn test_sensors_in_one_layout() {
    let payload = [0, 24, 9, 9, 9, 9, 9, 1, 0, 1];
    let report = decode_report(OperateCode::ReadSensorsInOneStatusResponse, &payload)
        .unwrap()
        .unwrap();
    assert_eq!(
        report,
        SensorReport::SensorsInOneStatus {
            temperature: 24,
            motion: 1,
            dry_contact_1: 0,
            dry_contact_2: 1,
        }
    );
}

#[test]
fn test_broadcast_sensor_status_both_codes() {
    let payload = [21, 0x00, 0x64, 0, 1, 0, 0];
    for op in [
        OperateCode::BroadcastSensorStatusResponse,
        OperateCode::BroadcastSensorStatusAutoResponse,
    ] {
        let report = decode_report(op, &payload).unwrap().unwrap();
        assert_eq!(
            report,
            SensorReport::BroadcastSensorStatus {
                temperature: 21,
                brightness: 100,
                motion: 0,
                sonic: 1,
                dry_contact_1: 0,
                dry_contact_2: 0,
            }
        );
    }
}

#[test]
fn test_empty_broadcast_sensor_status_is_ignored() {
    assert_eq!(
        decode_report(OperateCode::BroadcastSensorStatusResponse, &[]),
        Ok(None)
    );
    assert!(decode_report(OperateCode::BroadcastSensorStatusAutoResponse, &[]).is_err());
}

#[test]
fn test_temperature_codes() {
    for op in [
        OperateCode::ReadFloorHeatingStatusResponse,
        OperateCode::BroadcastTemperatureResponse,
    ] {
        let report = decode_report(op, &[0, 19]).unwrap().unwrap();
        assert_eq!(report, SensorReport::Temperature { temperature: 19 });
    }
}

#[test]
fn test_indexed_reports() {
    assert_eq!(
        decode_report(OperateCode::UniversalSwitchControlResponse, &[3, 1]).unwrap(),
        Some(SensorReport::UniversalSwitchStatus {
            switch_number: 3,
            status: 1
        })
    );
    assert_eq!(
        decode_report(OperateCode::SingleChannelControlResponse, &[2, BUSPRO_SUCCESS, 100])
            .unwrap(),
        Some(SensorReport::SingleChannelStatus {
            channel_number: 2,
            status: 100
        })
    );
    assert_eq!(
        decode_report(OperateCode::ReadDryContactStatusResponse, &[1, 4, 1]).unwrap(),
        Some(SensorReport::DryContactStatus {
            switch_number: 4,
            status: 1
        })
    );
}

#[test]
fn test_count_reports_keep_payload() {
    let payload = [3, 0, 1, 0];
    assert_eq!(
        decode_report(OperateCode::BroadcastStatusOfUniversalSwitch, &payload).unwrap(),
        Some(SensorReport::UniversalSwitchBroadcast {
            count: 3,
            payload: &payload
        })
    );
    assert_eq!(
        decode_report(OperateCode::ReadStatusOfChannelsResponse, &payload).unwrap(),
        Some(SensorReport::ChannelsStatus {
            count: 3,
            payload: &payload
        })
    );
}

#[test]
fn test_request_codes_are_ignored() {
    for op in [
        OperateCode::ReadSensorStatus,
        OperateCode::ReadStatusOfChannels,
        OperateCode::ReadDryContactStatus,
        OperateCode::UniversalSwitchControl,
        OperateCode::SingleChannelControl,
    ] {
        assert_eq!(required_payload_len(op), None);
        assert_eq!(decode_report(op, &[1, 2, 3]), Ok(None));
    }
}

#[test]
fn test_short_payloads_are_malformed() {
    for op in OperateCode::ALL {
        let Some(required) = required_payload_len(op) else {
            continue;
        };
        let short = vec![1u8; required - 1];
        assert_eq!(
            decode_report(op, &short),
            Err(BusproError::MalformedPayload {
                operate_code: op,
                required,
                actual: required - 1,
            }),
            "{op:?}"
        );
    }
}
