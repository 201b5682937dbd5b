use std::sync::{mpsc, Arc};
use std::time::Duration;

use serde_json::json;
use tempfile::TempDir;
use vidsum_engine::{
    AtomicFileWriter, ChannelEventSink, ClientSettings, EngineEvent, EngineHandle, FailureKind,
    ReqwestVideoApi, SaveError,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn start_engine(
    server: &MockServer,
    output: &TempDir,
) -> (EngineHandle, mpsc::Receiver<EngineEvent>) {
    let api = ReqwestVideoApi::new(ClientSettings {
        base_url: server.uri(),
        ..ClientSettings::default()
    })
    .expect("client");
    let (tx, rx) = mpsc::channel();
    let engine = EngineHandle::new(
        Arc::new(api),
        AtomicFileWriter::new(output.path().to_path_buf()),
        Arc::new(ChannelEventSink::new(tx)),
    )
    .expect("engine");
    (engine, rx)
}

async fn next_event(
    rx: mpsc::Receiver<EngineEvent>,
) -> (EngineEvent, mpsc::Receiver<EngineEvent>) {
    tokio::task::spawn_blocking(move || {
        let event = rx.recv_timeout(Duration::from_secs(10)).expect("engine event");
        (event, rx)
    })
    .await
    .expect("join")
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn summarize_and_thumbnail_echo_request_ids() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/summarize"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "video_info": {
                "id": "abc123",
                "thumbnail": "https://img.youtube.com/vi/abc123/maxresdefault.jpg"
            },
            "english_summary": "en",
            "hindi_summary": "hi"
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/download-thumbnail"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "no thumbnail" })))
        .mount(&server)
        .await;

    let output = TempDir::new().unwrap();
    let (engine, rx) = start_engine(&server, &output);

    engine.summarize(7, "https://youtu.be/abc123");
    let (event, rx) = next_event(rx).await;
    match event {
        EngineEvent::Summarized { request_id, result } => {
            assert_eq!(request_id, 7);
            assert_eq!(result.expect("summary").video_info.id, "abc123");
        }
        other => panic!("unexpected event {other:?}"),
    }

    engine.fetch_thumbnail(7, "https://youtu.be/abc123");
    let (event, _rx) = next_event(rx).await;
    match event {
        EngineEvent::ThumbnailFetched { request_id, result } => {
            assert_eq!(request_id, 7);
            let err = result.unwrap_err();
            assert_eq!(err.kind, FailureKind::HttpStatus(500));
            assert_eq!(err.backend_message.as_deref(), Some("no thumbnail"));
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn save_image_writes_into_output_dir() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/static/thumbnails/abc123.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(vec![0xFF, 0xD8], "image/jpeg"))
        .mount(&server)
        .await;

    let output = TempDir::new().unwrap();
    let (engine, rx) = start_engine(&server, &output);

    engine.save_image(
        format!("{}/static/thumbnails/abc123.jpg", server.uri()),
        "youtube-thumbnail-abc123.jpg",
    );
    let (event, rx) = next_event(rx).await;
    match event {
        EngineEvent::ImageSaved { result } => {
            let path = result.expect("saved");
            assert_eq!(path, output.path().join("youtube-thumbnail-abc123.jpg"));
            assert_eq!(std::fs::read(path).unwrap(), vec![0xFF, 0xD8]);
        }
        other => panic!("unexpected event {other:?}"),
    }

    engine.save_image(format!("{}/missing.jpg", server.uri()), "x.jpg");
    let (event, _rx) = next_event(rx).await;
    match event {
        EngineEvent::ImageSaved {
            result: Err(SaveError::Download(err)),
        } => assert_eq!(err.kind, FailureKind::HttpStatus(404)),
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn unreachable_backend_reports_unhealthy() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let output = TempDir::new().unwrap();
    let (engine, rx) = start_engine(&server, &output);

    engine.check_health();
    let (event, _rx) = next_event(rx).await;
    match event {
        EngineEvent::HealthChecked { healthy } => assert!(!healthy),
        other => panic!("unexpected event {other:?}"),
    }
}
