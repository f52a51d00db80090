//! Test utilities for blobup-client
//!
//! Provides a mock upload endpoint that speaks the same JSON contract as the
//! blob uploader function app, and a server wrapper that binds any axum
//! router to an ephemeral port.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Multipart, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use bytes::Bytes;
use parking_lot::Mutex;
use tokio::net::TcpListener;

use crate::config::{UploaderConfig, DEFAULT_ENDPOINT, DEFAULT_FIELD_NAME};
use crate::{Result, UploaderClient};

/// One multipart part as seen by the mock endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedPart {
    pub field: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// One request received by the mock endpoint
#[derive(Debug, Clone, Default)]
pub struct ReceivedUpload {
    pub parts: Vec<ReceivedPart>,
}

impl ReceivedUpload {
    /// File names of the parts, in arrival order
    pub fn file_names(&self) -> Vec<String> {
        self.parts
            .iter()
            .filter_map(|p| p.file_name.clone())
            .collect()
    }
}

/// How the mock endpoint answers uploads
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Accept any request with at least one `files` part and answer
    /// `{"message": "<n> files uploaded"}`; answer 400 otherwise
    Accept,
    /// Answer with a fixed status and JSON body
    Json {
        status: u16,
        body: serde_json::Value,
    },
    /// Answer with a fixed status and raw body
    Raw { status: u16, body: String },
}

/// In-memory stand-in for the upload endpoint
#[derive(Debug, Clone)]
pub struct MockUploadEndpoint {
    reply: Arc<Mutex<MockReply>>,
    received: Arc<Mutex<Vec<ReceivedUpload>>>,
    requests: Arc<AtomicUsize>,
}

impl Default for MockUploadEndpoint {
    fn default() -> Self {
        Self::new(MockReply::Accept)
    }
}

impl MockUploadEndpoint {
    pub fn new(reply: MockReply) -> Self {
        Self {
            reply: Arc::new(Mutex::new(reply)),
            received: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Endpoint that rejects every upload with `status` and `{"error": message}`
    pub fn failing(status: u16, message: &str) -> Self {
        Self::new(MockReply::Json {
            status,
            body: serde_json::json!({ "error": message }),
        })
    }

    /// Change the reply for subsequent requests
    pub fn set_reply(&self, reply: MockReply) {
        *self.reply.lock() = reply;
    }

    /// Number of requests that reached the handler
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Requests whose multipart body was read completely
    pub fn received(&self) -> Vec<ReceivedUpload> {
        self.received.lock().clone()
    }

    /// Router serving the endpoint at [`DEFAULT_ENDPOINT`]
    pub fn router(&self) -> Router {
        self.router_at(DEFAULT_ENDPOINT)
    }

    /// Router serving the endpoint at `path`
    pub fn router_at(&self, path: &str) -> Router {
        Router::new()
            .route(path, post(receive_upload).options(preflight))
            .with_state(self.clone())
    }
}

fn json_error(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(serde_json::json!({ "error": message.into() }))).into_response()
}

async fn preflight() -> impl IntoResponse {
    (
        StatusCode::OK,
        [
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (header::ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
        ],
    )
}

async fn receive_upload(
    State(endpoint): State<MockUploadEndpoint>,
    mut multipart: Multipart,
) -> Response {
    endpoint.requests.fetch_add(1, Ordering::SeqCst);

    let mut upload = ReceivedUpload::default();
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return json_error(StatusCode::BAD_REQUEST, e.to_string()),
        };

        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(String::from);
        let content_type = field.content_type().map(String::from);
        let data = match field.bytes().await {
            Ok(data) => data,
            Err(e) => return json_error(StatusCode::BAD_REQUEST, e.to_string()),
        };

        upload.parts.push(ReceivedPart {
            field: name,
            file_name,
            content_type,
            data,
        });
    }

    let files = upload
        .parts
        .iter()
        .filter(|p| p.field == DEFAULT_FIELD_NAME)
        .count();
    tracing::info!(parts = upload.parts.len(), files, "Mock endpoint received upload");
    endpoint.received.lock().push(upload);

    let reply = endpoint.reply.lock().clone();
    match reply {
        MockReply::Accept if files == 0 => json_error(StatusCode::BAD_REQUEST, "No file uploaded"),
        MockReply::Accept => {
            let message = if files == 1 {
                "1 file uploaded".to_string()
            } else {
                format!("{} files uploaded", files)
            };
            (StatusCode::OK, Json(serde_json::json!({ "message": message }))).into_response()
        }
        MockReply::Json { status, body } => {
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, Json(body)).into_response()
        }
        MockReply::Raw { status, body } => {
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, body).into_response()
        }
    }
}

/// A test server that automatically shuts down when dropped
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: UploaderClient,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl TestServer {
    /// Create a new test server from an axum Router
    ///
    /// # Example
    ///
    /// ```ignore
    /// use blobup_client::testing::{MockUploadEndpoint, TestServer};
    ///
    /// let endpoint = MockUploadEndpoint::default();
    /// let server = TestServer::start(endpoint.router()).await?;
    ///
    /// // Use server.client to make requests
    /// let reply = server.client.upload_files(&selection).await?;
    /// ```
    pub async fn start(router: Router) -> Result<Self> {
        Self::start_with_timeout(router, Duration::from_secs(5), Duration::from_secs(2)).await
    }

    /// Serve a mock upload endpoint at its default path
    pub async fn start_mock(endpoint: &MockUploadEndpoint) -> Result<Self> {
        Self::start(endpoint.router()).await
    }

    /// Create a new test server with custom timeouts
    pub async fn start_with_timeout(
        router: Router,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self> {
        // Bind to any available port
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

        // Spawn the server
        let handle = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .ok();
        });

        // Give server a moment to start
        tokio::time::sleep(Duration::from_millis(10)).await;

        let config = UploaderConfig::builder(format!("http://{}", addr))
            .request_timeout_ms(timeout.as_millis() as u64)
            .connect_timeout_ms(connect_timeout.as_millis() as u64)
            .build();
        let client = UploaderClient::new(config)?;

        Ok(Self {
            addr,
            client,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        })
    }

    /// Get the base URL of the test server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Get a reference to the client
    pub fn client(&self) -> &UploaderClient {
        &self.client
    }

    /// Shutdown the server gracefully
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        // Send shutdown signal if not already done
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        // Abort the task if still running
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_server_urls_point_at_bound_port() {
        let endpoint = MockUploadEndpoint::default();
        let server = TestServer::start_mock(&endpoint).await.unwrap();

        let base_url = server.base_url();
        assert!(base_url.starts_with("http://127.0.0.1:"));
        assert_ne!(server.addr.port(), 0);
        assert_eq!(base_url, format!("http://{}", server.addr));
        assert_eq!(
            server.client().upload_url().unwrap().as_str(),
            format!("{}/api/blobuploader", base_url)
        );

        server.shutdown().await;
    }

    #[test]
    fn test_received_file_names() {
        let upload = ReceivedUpload {
            parts: vec![
                ReceivedPart {
                    field: "files".to_string(),
                    file_name: Some("a.txt".to_string()),
                    content_type: None,
                    data: Bytes::from_static(b"a"),
                },
                ReceivedPart {
                    field: "note".to_string(),
                    file_name: None,
                    content_type: None,
                    data: Bytes::from_static(b"n"),
                },
            ],
        };
        assert_eq!(upload.file_names(), vec!["a.txt".to_string()]);
    }
}
