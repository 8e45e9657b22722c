use axum::body::Bytes;
use cutlink::application::services::IngestionPipeline;
use cutlink::domain::entities::{FilePayload, UploadResult};
use cutlink::domain::repositories::{ObjectStore, StoreError, UploadTarget};
use cutlink::infrastructure::storage::DiskStore;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_bytes, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "test-token";

fn store_for(server: &MockServer, timeout: Duration) -> DiskStore {
    DiskStore::new(&server.uri(), TOKEN, timeout).unwrap()
}

async fn mount_upload_target(server: &MockServer, filename: &str) {
    Mock::given(method("GET"))
        .and(path("/resources/upload"))
        .and(query_param("path", format!("app:/{filename}")))
        .and(query_param("overwrite", "true"))
        .and(header("Authorization", format!("OAuth {TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "href": format!("{}/upload/{filename}", server.uri()),
            "method": "PUT",
            "templated": false,
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_upload_flow() {
    let server = MockServer::start().await;
    mount_upload_target(&server, "report.pdf").await;

    Mock::given(method("PUT"))
        .and(path("/upload/report.pdf"))
        .and(body_bytes(b"pdf bytes".to_vec()))
        .respond_with(
            ResponseTemplate::new(201).insert_header("Location", "/disk/My%20Files/report.pdf"),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/resources/download"))
        .and(query_param("path", "/My Files/report.pdf"))
        .and(header("Authorization", format!("OAuth {TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "href": "https://downloader.test/report.pdf?sig=abc",
            "method": "GET",
        })))
        .mount(&server)
        .await;

    let store = store_for(&server, Duration::from_secs(5));

    let target = store.request_upload_target("report.pdf").await.unwrap();
    assert_eq!(target.path, "app:/report.pdf");

    let location = store
        .transfer(&target, Bytes::from_static(b"pdf bytes"))
        .await
        .unwrap();
    assert_eq!(location, "/My Files/report.pdf");

    let link = store.request_download_link(&location).await.unwrap();
    assert_eq!(link, "https://downloader.test/report.pdf?sig=abc");
}

#[tokio::test]
async fn test_transfer_without_location_uses_requested_path() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/upload/a.txt"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    let store = store_for(&server, Duration::from_secs(5));
    let target = UploadTarget {
        path: "app:/a.txt".to_string(),
        href: format!("{}/upload/a.txt", server.uri()),
    };

    let location = store
        .transfer(&target, Bytes::from_static(b"hello"))
        .await
        .unwrap();

    assert_eq!(location, "app:/a.txt");
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/resources/upload"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "UnauthorizedError",
        })))
        .mount(&server)
        .await;

    let store = store_for(&server, Duration::from_secs(5));
    let err = store.request_upload_target("a.txt").await.unwrap_err();

    match err {
        StoreError::Status { status, body } => {
            assert_eq!(status, 401);
            assert!(body.contains("UnauthorizedError"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_href_is_invalid_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/resources/download"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "method": "GET" })))
        .mount(&server)
        .await;

    let store = store_for(&server, Duration::from_secs(5));
    let err = store.request_download_link("/a.txt").await.unwrap_err();

    assert!(matches!(err, StoreError::InvalidResponse(_)), "got {err:?}");
}

#[tokio::test]
async fn test_slow_transfer_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/upload/slow.bin"))
        .respond_with(ResponseTemplate::new(201).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let store = store_for(&server, Duration::from_secs(1));
    let target = UploadTarget {
        path: "app:/slow.bin".to_string(),
        href: format!("{}/upload/slow.bin", server.uri()),
    };

    let err = store
        .transfer(&target, Bytes::from_static(b"zzz"))
        .await
        .unwrap_err();

    assert_eq!(err, StoreError::Timeout(1));
}

#[tokio::test]
async fn test_pipeline_over_disk_store_isolates_failures() {
    let server = MockServer::start().await;
    mount_upload_target(&server, "good.txt").await;
    mount_upload_target(&server, "bad.txt").await;

    Mock::given(method("PUT"))
        .and(path("/upload/good.txt"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/upload/bad.txt"))
        .respond_with(ResponseTemplate::new(507).set_body_string("insufficient storage"))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/resources/download"))
        .and(query_param("path", "app:/good.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "href": "https://downloader.test/good.txt",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = store_for(&server, Duration::from_secs(5));
    let pipeline = IngestionPipeline::new(Arc::new(store), Duration::from_secs(5));

    let results = pipeline
        .ingest(vec![
            FilePayload::new("good.txt", Bytes::from_static(b"good")),
            FilePayload::new("bad.txt", Bytes::from_static(b"bad")),
        ])
        .await;

    assert_eq!(
        results[0],
        UploadResult::Uploaded {
            filename: "good.txt".to_string(),
            target_url: "https://downloader.test/good.txt".to_string(),
        }
    );
    assert_eq!(
        results[1],
        UploadResult::Failed {
            filename: "bad.txt".to_string(),
            reason: "transfer: remote returned status 507: insufficient storage".to_string(),
        }
    );
}
