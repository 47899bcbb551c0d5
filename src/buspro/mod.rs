//! The buspro module contains the components responsible for the HDL Buspro wire
//! protocol: the telegram envelope and codec, and the transport seam.

pub mod telegram;
pub mod transport;
pub mod transport_mock;

pub use telegram::*;
pub use transport::{BusTransport, ChannelTransport};
pub use transport_mock::MockTransport;
