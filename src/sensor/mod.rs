//! # Sensor Module
//!
//! Sensor identity, state, status requests and the host-facing sensor device.

pub mod device;
pub mod entity;
pub mod identity;
pub mod request;
pub mod state;

pub use device::{Sensor, SensorChanged};
pub use entity::{SensorEntity, SensorType};
pub use identity::{matches, DeviceKind, Flavor, SensorIdentity};
pub use request::{build_status_request, StatusRequest};
pub use state::SensorState;
