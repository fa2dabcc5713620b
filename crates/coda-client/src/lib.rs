#![doc = include_str!("../README.md")]

mod admin;
pub mod bytesize;
mod client;
pub mod coerce;
mod error;
mod http;
mod router;
mod wifi;

pub use admin::{DeviceStatus, UsersCsrf};
pub use client::{CableModem, RequestBody};
pub use error::ApiError;
pub use self::http::{DebugLog, DebugSink, TracingSink};
pub use router::RouterSysInfo;
pub use wifi::{WiFiRadio, WiFiRadioAdvanced};
