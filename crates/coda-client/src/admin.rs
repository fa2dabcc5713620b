//! Administrative operations: CSRF token, reboot, factory reset, log
//! maintenance and the Easy Connect setup wizard.
//!
//! Every mutating endpoint requires a CSRF token fetched immediately before
//! the write; the operations here sequence that fetch themselves. The device
//! acknowledges writes with a [`DeviceStatus`] record rather than an HTTP
//! error, so a 200 response still needs its `errCode` inspected.

use serde::Deserialize;

use crate::{client::CableModem, error::ApiError};

/// Generic status/error record returned by mutating device endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceStatus {
    /// Device-side result code; `"000"` signals success.
    #[serde(rename = "errCode")]
    pub error_code: String,
    /// Human-readable message accompanying the code.
    #[serde(rename = "errMsg", default)]
    pub error_message: String,
}

impl DeviceStatus {
    /// Whether the device reported the operation as successful.
    pub fn is_success(&self) -> bool {
        self.error_code == "000"
    }
}

/// CSRF token record returned by the `/Users/CSRF` read endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct UsersCsrf {
    /// The token to include as the `csrf` form field on mutating POSTs.
    #[serde(rename = "Csrf")]
    pub csrf: String,
}

impl CableModem {
    /// Fetch a fresh CSRF token for a subsequent mutating call.
    pub async fn users_csrf(&self) -> Result<UsersCsrf, ApiError> {
        self.get_json("/Users/CSRF").await
    }

    /// Reboot the device.
    pub async fn reboot(&self) -> Result<DeviceStatus, ApiError> {
        let token = self.users_csrf().await?;

        self.post_form(
            "/CM/Reboot",
            &[("model", r#"{"reboot":1}"#), ("csrf", token.csrf.as_str())],
        )
        .await
    }

    /// Reset the device to factory defaults.
    ///
    /// Posts to the same `/CM/Reboot` path as [`CableModem::reboot`],
    /// differing only in the payload. That is how the device API behaves,
    /// not an oversight here.
    pub async fn factory_reset(&self) -> Result<DeviceStatus, ApiError> {
        let token = self.users_csrf().await?;

        self.post_form(
            "/CM/Reboot",
            &[("model", r#"{"factoryReset":1}"#), ("csrf", token.csrf.as_str())],
        )
        .await
    }

    /// Clear the device event log.
    ///
    /// The device simulates PUT over POST via the `_method` form field.
    pub async fn clear_log(&self) -> Result<DeviceStatus, ApiError> {
        let token = self.users_csrf().await?;

        self.post_form(
            "/CM/Log",
            &[("model", "[]"), ("csrf", token.csrf.as_str()), ("_method", "PUT")],
        )
        .await
    }

    /// Initialize the modem by completing the Easy Connect setup wizard.
    pub async fn self_install(&self) -> Result<DeviceStatus, ApiError> {
        let credentials = self.credentials();
        let model = serde_json::json!({
            "name": credentials.username,
            "password": credentials.password,
        })
        .to_string();

        self.post_form("/SelfInstall", &[("model", model.as_str())]).await
    }
}
