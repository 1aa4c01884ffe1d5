// Webmo - remote control for a stepper-driven rotating platform
// Library exports

pub mod client; // HTTP client for the device API
pub mod config;
pub mod errors;
pub mod units; // Angle, step and speed conversions

pub use client::DeviceClient;
pub use errors::{DeviceError, Result};
