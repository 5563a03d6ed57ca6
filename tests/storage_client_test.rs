//! Storage client integration tests against a mocked object store

use assert_matches::assert_matches;
use wiremock::matchers::{header, method, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

use campushub::config::StorageConfig;
use campushub::services::storage::{MediaKind, StorageClient};
use campushub::utils::errors::{CampusHubError, StorageError};

fn client_for(server: &MockServer) -> StorageClient {
    StorageClient::new(StorageConfig {
        api_url: server.uri(),
        public_base_url: format!("{}/object/public", server.uri()),
        image_bucket: "event-images".to_string(),
        video_bucket: "event-videos".to_string(),
        timeout_seconds: 5,
        max_image_bytes: 1024,
        max_video_bytes: 4096,
    })
    .unwrap()
}

#[tokio::test]
async fn image_upload_returns_public_url() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path_regex(r"^/object/event-images/7/[0-9a-f-]+\.png$"))
        .and(header("content-type", "image/png"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let url = client_for(&server)
        .upload_media(7, MediaKind::Image, "image/png", vec![0u8; 512])
        .await
        .unwrap();

    assert!(url.starts_with(&format!("{}/object/public/event-images/7/", server.uri())));
    assert!(url.ends_with(".png"));
}

#[tokio::test]
async fn video_upload_lands_in_the_video_bucket() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path_regex(r"^/object/event-videos/7/[0-9a-f-]+\.mp4$"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let url = client_for(&server)
        .upload_media(7, MediaKind::Video, "video/mp4", vec![0u8; 2048])
        .await
        .unwrap();

    assert!(url.contains("/event-videos/"));
}

#[tokio::test]
async fn oversized_image_is_rejected_without_a_request() {
    let server = MockServer::start().await;
    // No mocks mounted; a request would fail loudly

    let result = client_for(&server)
        .upload_media(7, MediaKind::Image, "image/png", vec![0u8; 2048])
        .await;

    assert_matches!(
        result,
        Err(CampusHubError::Storage(StorageError::FileTooLarge { size: 2048, limit: 1024 }))
    );
}

#[tokio::test]
async fn unsupported_content_type_is_rejected() {
    let server = MockServer::start().await;

    let result = client_for(&server)
        .upload_media(7, MediaKind::Image, "application/pdf", vec![0u8; 10])
        .await;

    assert_matches!(
        result,
        Err(CampusHubError::Storage(StorageError::UnsupportedContentType(_)))
    );
}

#[tokio::test]
async fn upstream_error_surfaces_as_upload_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("backend down"))
        .mount(&server)
        .await;

    let result = client_for(&server)
        .upload_media(7, MediaKind::Image, "image/jpeg", vec![0u8; 100])
        .await;

    assert_matches!(
        result,
        Err(CampusHubError::Storage(StorageError::UploadFailed(_)))
    );
}
