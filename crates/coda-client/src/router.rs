//! Router system information.

use serde::Deserialize;

use crate::{client::CableModem, error::ApiError};

/// System information record from `/Router/SysInfo`.
///
/// Memory quantities arrive as formatted size strings (`"236.1M"`) and
/// throughput as stringly floats; both decode through the lenient codecs.
#[derive(Debug, Clone, Deserialize)]
pub struct RouterSysInfo {
    /// Operating mode, e.g. `"Router"` or `"Bridge"`.
    #[serde(rename = "routerMode")]
    pub router_mode: String,
    /// LAN-side uptime as reported, e.g. `"02 Days,03 Hours,22 Minutes"`.
    #[serde(rename = "systemLanUptime")]
    pub lan_uptime: String,
    /// Total system memory in bytes.
    #[serde(rename = "memTotal", deserialize_with = "crate::bytesize::deserialize")]
    pub memory_total: i64,
    /// Used system memory in bytes.
    #[serde(rename = "memUsed", deserialize_with = "crate::bytesize::deserialize")]
    pub memory_used: i64,
    /// WAN throughput in Mbps.
    #[serde(
        rename = "wanThroughput",
        deserialize_with = "crate::coerce::deserialize_f64"
    )]
    pub wan_throughput: f64,
    /// LAN throughput in Mbps.
    #[serde(
        rename = "lanThroughput",
        deserialize_with = "crate::coerce::deserialize_f64"
    )]
    pub lan_throughput: f64,
}

impl CableModem {
    /// Fetch system information from `/Router/SysInfo`.
    pub async fn router_sys_info(&self) -> Result<RouterSysInfo, ApiError> {
        self.get_json("/Router/SysInfo").await
    }
}
