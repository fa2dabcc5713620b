//! Transport-level behavior of the generic dispatch path, against a mock
//! device.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use coda_client::{ApiError, DebugSink, RequestBody, RouterSysInfo};
use coda_test::{device_path, start_device_mock};
use reqwest::Method;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_string, header, method, path},
};

fn sys_info_body() -> serde_json::Value {
    serde_json::json!({
        "routerMode": "Router",
        "systemLanUptime": "02 Days,03 Hours,22 Minutes",
        "memTotal": "256M",
        "memUsed": "128.5M",
        "wanThroughput": "102.5",
        "lanThroughput": "240.0",
    })
}

#[tokio::test]
async fn ok_response_fully_populates_the_record() {
    let (_server, modem) = start_device_mock(vec![
        Mock::given(method("GET"))
            .and(path(device_path("/Router/SysInfo")))
            .respond_with(ResponseTemplate::new(200).set_body_json(sys_info_body())),
    ])
    .await;

    let info: RouterSysInfo = modem.router_sys_info().await.unwrap();

    assert_eq!(info.router_mode, "Router");
    assert_eq!(info.lan_uptime, "02 Days,03 Hours,22 Minutes");
    assert_eq!(info.memory_total, 256 * 1024 * 1024);
    assert_eq!(info.memory_used, (128.5 * 1024.0 * 1024.0) as i64);
    assert_eq!(info.wan_throughput, 102.5);
    assert_eq!(info.lan_throughput, 240.0);
}

#[tokio::test]
async fn non_200_status_carries_status_body_and_headers() {
    let (_server, modem) = start_device_mock(vec![
        Mock::given(method("GET"))
            .and(path(device_path("/CM/Log")))
            .respond_with(
                ResponseTemplate::new(500)
                    .insert_header("x-request-trace", "abc123")
                    .set_body_string("device says no"),
            ),
    ])
    .await;

    let err = modem
        .get_json::<serde_json::Value>("/CM/Log")
        .await
        .unwrap_err();

    match err {
        ApiError::Response {
            status,
            content,
            headers,
        } => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(content, "device says no");
            assert_eq!(headers.get("x-request-trace").unwrap(), "abc123");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_json_is_a_decode_error() {
    let (_server, modem) = start_device_mock(vec![
        Mock::given(method("GET"))
            .and(path(device_path("/CM/Log")))
            .respond_with(ResponseTemplate::new(200).set_body_string("{not json")),
    ])
    .await;

    let err = modem
        .get_json::<serde_json::Value>("/CM/Log")
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Serde(_)), "got {err:?}");
}

#[tokio::test]
async fn redirects_are_returned_literally_not_followed() {
    let (server, modem) = start_device_mock(vec![
        Mock::given(method("GET"))
            .and(path(device_path("/CM/Log")))
            .respond_with(
                ResponseTemplate::new(302).insert_header("location", "/1/Device/elsewhere"),
            ),
    ])
    .await;

    Mock::given(method("GET"))
        .and(path("/1/Device/elsewhere"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let err = modem
        .get_json::<serde_json::Value>("/CM/Log")
        .await
        .unwrap_err();

    match err {
        ApiError::Response { status, .. } => assert_eq!(status.as_u16(), 302),
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn cookies_persist_across_calls_on_the_same_session() {
    let (server, modem) = start_device_mock(vec![
        Mock::given(method("GET"))
            .and(path(device_path("/Users/CSRF")))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("set-cookie", "session=abc123; Path=/")
                    .set_body_json(serde_json::json!({"Csrf": "tok"})),
            ),
    ])
    .await;

    Mock::given(method("GET"))
        .and(path(device_path("/CM/Log")))
        .and(header("cookie", "session=abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;

    modem.users_csrf().await.unwrap();
    modem
        .get_json::<serde_json::Value>("/CM/Log")
        .await
        .unwrap();
}

#[tokio::test]
async fn form_bodies_are_url_encoded_with_the_form_content_type() {
    let (_server, modem) = start_device_mock(vec![
        Mock::given(method("POST"))
            .and(path(device_path("/CM/Reboot")))
            .and(header(
                "content-type",
                "application/x-www-form-urlencoded",
            ))
            .and(body_string("model=%7B%22reboot%22%3A1%7D&csrf=token123"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"errCode": "000", "errMsg": ""})),
            ),
    ])
    .await;

    modem
        .post_form::<serde_json::Value>(
            "/CM/Reboot",
            &[("model", r#"{"reboot":1}"#), ("csrf", "token123")],
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn raw_bodies_are_sent_unmodified() {
    let (_server, modem) = start_device_mock(vec![
        Mock::given(method("POST"))
            .and(path(device_path("/CM/Log")))
            .and(body_string("raw payload"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({}))),
    ])
    .await;

    modem
        .send_request::<serde_json::Value>(
            Method::POST,
            "/CM/Log",
            RequestBody::Raw(b"raw payload".to_vec()),
        )
        .await
        .unwrap();
}

async fn mock_log_endpoint(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(device_path("/CM/Log")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"entries": 3})),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn debug_sink_captures_two_entries_without_changing_the_outcome() {
    let (server, plain) = start_device_mock(vec![]).await;
    mock_log_endpoint(&server).await;

    let entries: Arc<Mutex<Vec<String>>> = Arc::default();
    let captured = entries.clone();
    let sink = DebugSink::new(move |entry: &str| {
        captured.lock().unwrap().push(entry.to_string());
    });

    let host = server.address().to_string();
    let dumping = coda_client::CableModem::new(&host, "admin", "hunter2")
        .unwrap()
        .with_debug_sink(sink);

    let with_sink: serde_json::Value = dumping.get_json("/CM/Log").await.unwrap();
    let without_sink: serde_json::Value = plain.get_json("/CM/Log").await.unwrap();

    assert_eq!(with_sink, without_sink);

    let entries = entries.lock().unwrap();
    assert_eq!(entries.len(), 2);
    assert!(entries[0].starts_with("request: GET "));
    assert!(entries[0].contains("/1/Device/CM/Log"));
    assert!(entries[1].starts_with("response: "));
    assert!(entries[1].contains("200"));
    assert!(entries[1].contains(r#"{"entries":3}"#));
}

#[tokio::test]
async fn dropping_the_dispatch_future_cancels_the_call() {
    let (_server, modem) = start_device_mock(vec![
        Mock::given(method("GET"))
            .and(path(device_path("/CM/Log")))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({}))
                    .set_delay(Duration::from_secs(30)),
            ),
    ])
    .await;

    let result = tokio::time::timeout(
        Duration::from_millis(200),
        modem.get_json::<serde_json::Value>("/CM/Log"),
    )
    .await;

    assert!(result.is_err(), "dispatch should have been cancelled");
}
