//! Wi-Fi radio settings records and operations.

use serde::Deserialize;

use crate::{client::CableModem, error::ApiError};

/// Settings of one Wi-Fi radio, from `/WiFi/Radios/{n}`.
///
/// The device reports numeric fields as strings; those decode leniently and
/// default to zero when missing or garbled.
#[derive(Debug, Clone, Deserialize)]
pub struct WiFiRadio {
    /// Frequency band, e.g. `"2.4G"` or `"5G"`.
    pub band: String,
    /// Whether the radio is enabled, as reported (`"ON"`/`"OFF"`).
    pub enable: String,
    /// Channel bandwidth, e.g. `"20MHz"`.
    pub bandwidth: String,
    /// Current channel number.
    #[serde(deserialize_with = "crate::coerce::deserialize_i64")]
    pub channel: i64,
    /// Whether automatic channel selection is on (`"ON"`/`"OFF"`).
    #[serde(rename = "autoChannel")]
    pub auto_channel: String,
    /// Operating mode, e.g. `"802.11b/g/n mixed"`.
    #[serde(rename = "wirelessMode")]
    pub wireless_mode: String,
}

/// Advanced settings of one Wi-Fi radio, from `/WiFi/Radios/{n}/Advanced`.
#[derive(Debug, Clone, Deserialize)]
pub struct WiFiRadioAdvanced {
    /// Beacon interval in milliseconds.
    #[serde(
        rename = "beaconInterval",
        deserialize_with = "crate::coerce::deserialize_i64"
    )]
    pub beacon_interval: i64,
    /// DTIM interval in beacons.
    #[serde(
        rename = "dtimInterval",
        deserialize_with = "crate::coerce::deserialize_i64"
    )]
    pub dtim_interval: i64,
    /// Transmit power as a percentage of the maximum.
    #[serde(
        rename = "transmitPower",
        deserialize_with = "crate::coerce::deserialize_i64"
    )]
    pub transmit_power: i64,
    /// Whether WMM is enabled (`"ON"`/`"OFF"`).
    pub wmm: String,
}

impl CableModem {
    /// Fetch the settings of radio `radio` from `/WiFi/Radios/{n}`.
    pub async fn wifi_radio_details(&self, radio: u32) -> Result<WiFiRadio, ApiError> {
        self.get_json(&format!("/WiFi/Radios/{radio}")).await
    }

    /// Fetch the advanced settings of radio `radio` from
    /// `/WiFi/Radios/{n}/Advanced`.
    pub async fn wifi_radio_advanced_details(
        &self,
        radio: u32,
    ) -> Result<WiFiRadioAdvanced, ApiError> {
        self.get_json(&format!("/WiFi/Radios/{radio}/Advanced"))
            .await
    }
}
