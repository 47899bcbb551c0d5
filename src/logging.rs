use crate::buspro::telegram::{pack_frame, Telegram};
use log::{debug, error, info, log_enabled, warn, Level};

/// Initializes the logger with the `env_logger` crate.
///
/// Verbosity follows `RUST_LOG`. Calling it twice is harmless.
pub fn init_logger() {
    let _ = env_logger::try_init();
}

/// Logs an error message.
pub fn log_error(message: &str) {
    if log_enabled!(Level::Error) {
        error!("{message}");
    }
}

/// Logs a warning message.
pub fn log_warn(message: &str) {
    if log_enabled!(Level::Warn) {
        warn!("{message}");
    }
}

/// Logs an informational message.
pub fn log_info(message: &str) {
    if log_enabled!(Level::Info) {
        info!("{message}");
    }
}

/// Logs a debug message.
pub fn log_debug(message: &str) {
    if log_enabled!(Level::Debug) {
        debug!("{message}");
    }
}

/// Logs the wire form of a telegram at trace level.
pub fn log_telegram_hex(prefix: &str, telegram: &Telegram) {
    if !log_enabled!(Level::Trace) {
        return;
    }
    match pack_frame(telegram) {
        Ok(bytes) => log::trace!("{prefix}: {}", crate::util::hex::format_hex_compact(&bytes)),
        Err(e) => log::trace!("{prefix}: <unpackable: {e}>"),
    }
}
