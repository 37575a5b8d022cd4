//! ledgrid-device - HTTP gateway to the LED matrix device
//!
//! The only crate that talks to the network. It knows the device's URL
//! layout and JSON payloads, and turns transport failures into
//! [`DeviceError`] values. It never reads or writes local grid state.

pub mod error;
pub mod gateway;
pub mod protocol;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;

pub use error::DeviceError;
pub use gateway::{DeviceGateway, HttpGateway, DEFAULT_REQUEST_TIMEOUT};
pub use protocol::{DeviceMode, PixelQuery, WireLed};
