#![allow(clippy::unwrap_used)]
// End-to-end: `Monitor` over a real `PrinterClient` against wiremock.

use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use printlink_core::title::window_title;
use printlink_core::{CoreError, EnglishLabels, ErrorSink, LinkState, Monitor, MonitorConfig};

#[derive(Default)]
struct RecordingSink(Mutex<Vec<bool>>);

impl ErrorSink for RecordingSink {
    fn handle(&self, error: &CoreError) {
        self.0.lock().unwrap().push(error.is_not_found());
    }
}

async fn setup() -> (MockServer, Monitor, Arc<RecordingSink>) {
    let server = MockServer::start().await;
    let mut config = MonitorConfig::new(Url::parse(&server.uri()).unwrap());
    config.api_key = Some(SecretString::from("s3cret".to_string()));
    let sink = Arc::new(RecordingSink::default());
    let monitor = Monitor::from_config_with_sink(&config, sink.clone()).unwrap();
    (server, monitor, sink)
}

async fn mount_info(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/v1/info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Printer A",
            "location": "Room 1",
            "serial": "SN-1",
            "nozzle_diameter": 0.4
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn poll_fetches_status_info_and_job_detail() {
    let (server, monitor, sink) = setup().await;
    mount_info(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/status"))
        .and(header("X-Api-Key", "s3cret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "printer": { "state": "PRINTING", "temp_nozzle": 215.0 },
            "job": { "id": 297, "progress": 42.6 },
            "storage": [{ "path": "/usb", "name": "usb", "free_space": 1024 }]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/job"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 297,
            "name": "BENCHY~1.GCO",
            "display_name": "benchy.gcode",
            "size": 123_456,
            "refs": { "thumbnail": "/thumb/s/usb/BENCHY~1.GCO" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    monitor.poll_once().await.unwrap();
    monitor.poll_once().await.unwrap();
    monitor.context().settle().await;

    let snap = monitor.context().snapshot();
    assert_eq!(snap.state, LinkState::Printing);
    assert_eq!(snap.telemetry.temperature.nozzle.current, Some(215.0));
    assert_eq!(snap.storage.len(), 1);

    let file = snap.job.file().unwrap();
    assert_eq!(file.display_name.as_deref(), Some("benchy.gcode"));
    assert_eq!(
        file.refs.thumbnail.as_deref(),
        Some("/thumb/s/usb/BENCHY~1.GCO")
    );

    assert_eq!(
        window_title(&snap, &EnglishLabels),
        "Printing 43% - Room 1 - Printer A"
    );
    assert!(sink.0.lock().unwrap().is_empty());
}

#[tokio::test]
async fn vanished_job_is_reported_as_not_found() {
    let (server, monitor, sink) = setup().await;
    mount_info(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "printer": { "state": "PRINTING" },
            "job": { "id": 5, "progress": 1.0 }
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/job"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    monitor.poll_once().await.unwrap();
    monitor.context().settle().await;

    let snap = monitor.context().snapshot();
    assert_eq!(snap.job.progress(), Some(1.0));
    assert!(snap.job.file().is_none());
    assert_eq!(*sink.0.lock().unwrap(), vec![true]);
}

#[tokio::test]
async fn rejected_status_poll_leaves_view_unknown() {
    let (server, monitor, _sink) = setup().await;
    mount_info(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/status"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = monitor.poll_once().await.unwrap_err();

    assert!(matches!(err, CoreError::AuthenticationFailed { .. }), "{err:?}");
    let snap = monitor.context().snapshot();
    assert_eq!(snap.state, LinkState::Unknown);
    assert_eq!(snap.updated_at, None);
    assert!(snap.printer.is_some());
}
