//! Integration tests for blobup-client
//!
//! These tests spin up a mock upload endpoint and drive it through the real
//! multipart client, both directly and via the upload handler.

use std::time::Duration;

use blobup_client::testing::{MockReply, MockUploadEndpoint, TestServer};
use blobup_client::{UploaderClient, UploaderConfig};
use blobup_core::{
    DisplayStatus, FileSelection, OutcomeDisplay, SelectedFile, UploadError, UploadHandler,
    EMPTY_SELECTION_MESSAGE,
};
use pretty_assertions::assert_eq;

fn selection(names: &[&str]) -> FileSelection {
    names
        .iter()
        .map(|name| SelectedFile::new(*name, format!("contents of {}", name)))
        .collect()
}

// =============================================================================
// Client
// =============================================================================

#[tokio::test]
async fn test_upload_sends_files_in_order() {
    let endpoint = MockUploadEndpoint::default();
    let server = TestServer::start_mock(&endpoint).await.unwrap();

    let files = selection(&["b.txt", "a.txt", "c.csv"]);
    let reply = server.client.upload_files(&files).await.unwrap();

    assert_eq!(reply.message, "3 files uploaded");
    assert_eq!(endpoint.request_count(), 1);

    let received = endpoint.received();
    assert_eq!(received.len(), 1);
    let parts = &received[0].parts;
    assert!(parts.iter().all(|p| p.field == "files"));
    assert_eq!(
        received[0].file_names(),
        vec!["b.txt".to_string(), "a.txt".to_string(), "c.csv".to_string()]
    );
    assert_eq!(&parts[1].data[..], b"contents of a.txt");
}

#[tokio::test]
async fn test_upload_sends_content_type() {
    let endpoint = MockUploadEndpoint::default();
    let server = TestServer::start_mock(&endpoint).await.unwrap();

    let files = FileSelection::new()
        .with_file(SelectedFile::new("report.csv", "a,b\n1,2\n").with_content_type("text/csv"));
    server.client.upload_files(&files).await.unwrap();

    let received = endpoint.received();
    assert_eq!(
        received[0].parts[0].content_type.as_deref(),
        Some("text/csv")
    );
}

#[tokio::test]
async fn test_server_error_field() {
    let endpoint = MockUploadEndpoint::failing(413, "too large");
    let server = TestServer::start_mock(&endpoint).await.unwrap();

    let err = server
        .client
        .upload_files(&selection(&["big.bin"]))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        UploadError::Server {
            status: 413,
            message: "too large".to_string()
        }
    );
}

#[tokio::test]
async fn test_server_error_without_body() {
    let endpoint = MockUploadEndpoint::new(MockReply::Raw {
        status: 500,
        body: "Internal Server Error".to_string(),
    });
    let server = TestServer::start_mock(&endpoint).await.unwrap();

    let err = server
        .client
        .upload_files(&selection(&["a.txt"]))
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(500));
    assert_eq!(err.display_message(), "Upload failed");
}

#[tokio::test]
async fn test_custom_endpoint_and_field() {
    let endpoint = MockUploadEndpoint::default();
    let server = TestServer::start(endpoint.router_at("/api/upload"))
        .await
        .unwrap();

    let config = UploaderConfig::builder(server.base_url())
        .endpoint("/api/upload")
        .field_name("attachments")
        .build();
    let client = UploaderClient::new(config).unwrap();

    // The mock only counts `files` parts, so a renamed field is rejected
    let err = client
        .upload_files(&selection(&["a.txt"]))
        .await
        .unwrap_err();
    assert_eq!(err.display_message(), "No file uploaded");

    let received = endpoint.received();
    assert_eq!(received[0].parts[0].field, "attachments");
}

#[tokio::test]
async fn test_unreachable_server() {
    let endpoint = MockUploadEndpoint::default();
    let server = TestServer::start_mock(&endpoint).await.unwrap();
    let base_url = server.base_url();
    server.shutdown().await;

    let config = UploaderConfig::builder(base_url)
        .connect_timeout_ms(500)
        .request_timeout_ms(1_000)
        .build();
    let client = UploaderClient::new(config).unwrap();

    let err = client
        .upload_files(&selection(&["a.txt"]))
        .await
        .unwrap_err();
    assert!(matches!(err, UploadError::Transport(_)));
}

// =============================================================================
// Handler over HTTP
// =============================================================================

#[tokio::test]
async fn test_handler_success_scenario() {
    let endpoint = MockUploadEndpoint::new(MockReply::Json {
        status: 200,
        body: serde_json::json!({ "message": "2 files uploaded" }),
    });
    let server = TestServer::start_mock(&endpoint).await.unwrap();
    let handler = UploadHandler::from_transport(server.client.clone());

    let mut files = selection(&["a.txt", "b.txt"]);
    let mut display = OutcomeDisplay::new();
    let outcome = handler.handle_upload(&mut files, &mut display).await;

    assert!(outcome.is_success());
    assert_eq!(display.text(), "2 files uploaded");
    assert_eq!(display.class_name(), "success");
    assert!(files.is_empty());
    assert_eq!(endpoint.received()[0].file_names().len(), 2);
}

#[tokio::test]
async fn test_handler_empty_selection_makes_no_request() {
    let endpoint = MockUploadEndpoint::default();
    let server = TestServer::start_mock(&endpoint).await.unwrap();
    let handler = UploadHandler::from_transport(server.client.clone());

    let mut files = FileSelection::new();
    let mut display = OutcomeDisplay::new();
    handler.handle_upload(&mut files, &mut display).await;

    assert_eq!(display.text(), EMPTY_SELECTION_MESSAGE);
    assert_eq!(display.class_name(), "error");
    assert_eq!(endpoint.request_count(), 0);
}

#[tokio::test]
async fn test_handler_failure_then_success() {
    let endpoint = MockUploadEndpoint::failing(400, "Unsupported file format");
    let server = TestServer::start_mock(&endpoint).await.unwrap();
    let handler = UploadHandler::from_transport(server.client.clone());
    let mut display = OutcomeDisplay::new();

    let mut files = selection(&["photo.png"]);
    handler.handle_upload(&mut files, &mut display).await;
    assert_eq!(display.text(), "Error: Unsupported file format");
    assert_eq!(display.status(), DisplayStatus::Error);

    endpoint.set_reply(MockReply::Accept);
    display.clear_transitions();

    let mut files = selection(&["report.xlsx"]);
    handler.handle_upload(&mut files, &mut display).await;
    assert_eq!(display.text(), "1 file uploaded");
    assert_eq!(
        display.transitions(),
        &[
            DisplayStatus::Neutral,
            DisplayStatus::Uploading,
            DisplayStatus::Success
        ]
    );
    assert_eq!(endpoint.request_count(), 2);
}

#[tokio::test]
async fn test_handler_non_json_success_body() {
    let endpoint = MockUploadEndpoint::new(MockReply::Raw {
        status: 200,
        body: "uploaded".to_string(),
    });
    let server = TestServer::start_with_timeout(
        endpoint.router(),
        Duration::from_secs(5),
        Duration::from_secs(2),
    )
    .await
    .unwrap();
    let handler = UploadHandler::from_transport(server.client.clone());

    let mut files = selection(&["a.txt"]);
    let mut display = OutcomeDisplay::new();
    handler.handle_upload(&mut files, &mut display).await;

    assert!(display.text().starts_with("Error: "));
    assert_eq!(display.class_name(), "error");
}
