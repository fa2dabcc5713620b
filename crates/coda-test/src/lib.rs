#![doc = include_str!("../README.md")]

use coda_client::CableModem;

/// Default username the mock session is created with.
pub const TEST_USERNAME: &str = "admin";
/// Default password the mock session is created with.
pub const TEST_PASSWORD: &str = "hunter2";

/// Helper for testing the device client using wiremock.
///
/// Starts a mock device, registers the given mocks and returns a session
/// pointed at it. All device resources live under the `/1/Device/` prefix,
/// so mocks should match paths like `/1/Device/CM/Reboot`.
///
/// Warning: when using `Mock::expect` ensure the returned server is not
/// dropped before the test completes, as expectations are verified on drop.
pub async fn start_device_mock(mocks: Vec<wiremock::Mock>) -> (wiremock::MockServer, CableModem) {
    let server = wiremock::MockServer::start().await;

    for mock in mocks {
        server.register(mock).await;
    }

    let host = server.address().to_string();
    let modem = CableModem::new(&host, TEST_USERNAME, TEST_PASSWORD)
        .expect("mock server address should form a valid host");

    (server, modem)
}

/// Prefix a device resource path with the `/1/Device/` base for use in
/// wiremock path matchers.
pub fn device_path(path: &str) -> String {
    format!("/1/Device/{}", path.trim_start_matches('/'))
}
