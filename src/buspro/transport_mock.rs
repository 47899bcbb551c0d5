//! Mock transport implementation for testing
//!
//! This module provides a transport that records every submitted telegram and can
//! be told to fail the next submission, so the sensor core can be exercised
//! without a bus.

use crate::buspro::telegram::Telegram;
use crate::buspro::transport::BusTransport;
use crate::error::BusproError;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Mock transport that captures outgoing telegrams
#[derive(Clone, Default)]
pub struct MockTransport {
    /// Telegrams submitted so far
    pub sent: Arc<Mutex<Vec<Telegram>>>,
    /// Simulated failure for the next submission
    pub next_error: Arc<Mutex<Option<String>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get telegrams that were submitted
    pub fn sent_telegrams(&self) -> Vec<Telegram> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }

    /// Number of telegrams submitted
    pub fn sent_count(&self) -> usize {
        self.sent.lock().map(|sent| sent.len()).unwrap_or(0)
    }

    /// Clear the record
    pub fn clear(&self) {
        if let Ok(mut sent) = self.sent.lock() {
            sent.clear();
        }
    }

    /// Set an error to be returned on the next submission
    pub fn set_next_error(&self, message: &str) {
        if let Ok(mut next) = self.next_error.lock() {
            *next = Some(message.to_string());
        }
    }
}

#[async_trait]
impl BusTransport for MockTransport {
    async fn send_telegram(&self, telegram: &Telegram) -> Result<(), BusproError> {
        let pending = self
            .next_error
            .lock()
            .map_err(|e| BusproError::TransportError(e.to_string()))?
            .take();
        if let Some(message) = pending {
            return Err(BusproError::TransportError(message));
        }

        self.sent
            .lock()
            .map_err(|e| BusproError::TransportError(e.to_string()))?
            .push(telegram.clone());
        Ok(())
    }
}
