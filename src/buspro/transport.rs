//! # Buspro Transport
//!
//! The transport is the collaborator that owns the socket. The sensor core only
//! ever asks it to submit a telegram; incoming telegrams reach the core through a
//! channel handed to [`crate::sensor_hub::SensorHub::run`].

use crate::buspro::telegram::Telegram;
use crate::error::BusproError;
use async_trait::async_trait;
use tokio::sync::mpsc;

/// Trait for submitting telegrams to the bus
#[async_trait]
pub trait BusTransport: Send + Sync {
    async fn send_telegram(&self, telegram: &Telegram) -> Result<(), BusproError>;
}

/// Forwards outbound telegrams into a channel, for hosts that run their own socket task.
#[derive(Debug, Clone)]
pub struct ChannelTransport {
    tx: mpsc::Sender<Telegram>,
}

impl ChannelTransport {
    pub fn new(tx: mpsc::Sender<Telegram>) -> Self {
        ChannelTransport { tx }
    }
}

#[async_trait]
impl BusTransport for ChannelTransport {
    async fn send_telegram(&self, telegram: &Telegram) -> Result<(), BusproError> {
        self.tx
            .send(telegram.clone())
            .await
            .map_err(|e| BusproError::TransportError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buspro::telegram::{DeviceAddress, OperateCode};

    #[tokio::test]
    async fn test_channel_transport_forwards() {
        let (tx, mut rx) = mpsc::channel(4);
        let transport = ChannelTransport::new(tx);
        let telegram = Telegram::new(
            OperateCode::ReadSensorStatus,
            DeviceAddress::new(200, 200),
            Vec::new(),
        );
        transport.send_telegram(&telegram).await.unwrap();
        assert_eq!(rx.recv().await.unwrap(), telegram);
    }

    #[tokio::test]
    async fn test_channel_transport_closed() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let transport = ChannelTransport::new(tx);
        let telegram = Telegram::new(
            OperateCode::ReadSensorStatus,
            DeviceAddress::new(200, 200),
            Vec::new(),
        );
        assert!(matches!(
            transport.send_telegram(&telegram).await,
            Err(BusproError::TransportError(_))
        ));
    }
}
