//! Unit tests for the logging functionality in the `buspro-rs` crate.

use buspro_rs::logging::{
    init_logger, log_debug, log_error, log_info, log_telegram_hex, log_warn,
};
use buspro_rs::{DeviceAddress, OperateCode, Telegram};

/// Tests that the leveled helpers do not panic after init.
#[test]
fn test_logging() {
    init_logger();
    log_error("This is an error message");
    log_warn("This is a warning message");
    log_info("This is an info message");
    log_debug("This is a debug message");
}

/// Tests that initializing twice is harmless.
#[test]
fn test_init_logger_twice() {
    init_logger();
    init_logger();
}

/// Tests the telegram hex dump, including a telegram too large to pack.
#[test]
fn test_log_telegram_hex() {
    init_logger();
    let telegram = Telegram::new(
        OperateCode::ReadSensorStatus,
        DeviceAddress::new(1, 20),
        Vec::new(),
    );
    log_telegram_hex("Status request", &telegram);

    let oversized = Telegram::new(
        OperateCode::ReadStatusOfChannelsResponse,
        DeviceAddress::new(1, 20),
        vec![0; 300],
    );
    log_telegram_hex("Oversized", &oversized);
}
