// HTTP client for the Webmo rotating platform
//
// Provides DeviceClient, which forwards motion and status commands to the
// device's HTTP API and converts between angle and step units.

mod device_client;
mod form;

pub use device_client::{DeviceClient, DEFAULT_HOST};
pub use form::Form;
