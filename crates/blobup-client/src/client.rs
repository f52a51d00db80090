//! Uploader HTTP client implementation

use std::time::Duration;

use async_trait::async_trait;
use blobup_core::{
    parse_upload_reply, FileSelection, UploadError, UploadResponse, UploadResult, UploadTransport,
};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::config::UploaderConfig;
use crate::error::{transport_error, Result};

/// Multipart upload client for the blob uploader endpoint
///
/// Every call issues a single POST whose body holds one part per selected
/// file, all under the configured field name.
#[derive(Debug, Clone)]
pub struct UploaderClient {
    client: Client,
    base_url: Url,
    config: UploaderConfig,
}

impl UploaderClient {
    /// Create a new uploader client from configuration
    pub fn new(config: UploaderConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeouts.request_ms))
            .connect_timeout(Duration::from_millis(config.timeouts.connect_ms))
            .build()?;

        let base_url = Url::parse(&config.base_url)?;
        // Fail early on an endpoint that cannot be joined
        base_url.join(&config.endpoint)?;

        info!("Uploader client created for {}", base_url);

        Ok(Self {
            client,
            base_url,
            config,
        })
    }

    /// Create a client for a server using the default endpoint and timeouts
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the server (e.g., "http://localhost:7071")
    pub fn for_server(base_url: &str) -> Result<Self> {
        Self::new(UploaderConfig::builder(base_url).build())
    }

    /// Create an uploader client from a YAML config file
    pub fn from_yaml_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        Self::new(UploaderConfig::from_yaml_file(path)?)
    }

    /// Get the base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get the configuration
    pub fn config(&self) -> &UploaderConfig {
        &self.config
    }

    /// Full URL of the upload endpoint
    pub fn upload_url(&self) -> Result<Url> {
        self.base_url.join(&self.config.endpoint).map_err(Into::into)
    }

    /// Upload every file in `selection` with one multipart POST
    #[instrument(skip(self, selection), fields(files = selection.len()))]
    pub async fn upload_files(&self, selection: &FileSelection) -> UploadResult<UploadResponse> {
        let url = self
            .upload_url()
            .map_err(|e| UploadError::Transport(e.to_string()))?;
        let form = self.build_form(selection)?;

        info!(
            "Uploading {} file(s), {} bytes to {}",
            selection.len(),
            selection.total_bytes(),
            url
        );

        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(transport_error)?;
        debug!(status = status.as_u16(), bytes = body.len(), "Upload response received");

        let reply = parse_upload_reply(status.as_u16(), &body);
        if let Err(e) = &reply {
            warn!(status = status.as_u16(), error = %e, "Upload rejected");
        }
        reply
    }

    /// Build the multipart body, one part per file in selection order
    fn build_form(&self, selection: &FileSelection) -> UploadResult<Form> {
        let mut form = Form::new();

        for file in selection {
            let mut part = Part::bytes(file.data.to_vec()).file_name(file.name.clone());
            if let Some(content_type) = &file.content_type {
                part = part.mime_str(content_type).map_err(|e| {
                    UploadError::Transport(format!(
                        "Invalid content type for {}: {}",
                        file.name, e
                    ))
                })?;
            }
            debug!(name = %file.name, size = file.len(), "Adding part");
            form = form.part(self.config.field_name.clone(), part);
        }

        Ok(form)
    }
}

#[async_trait]
impl UploadTransport for UploaderClient {
    async fn upload(&self, selection: &FileSelection) -> UploadResult<UploadResponse> {
        self.upload_files(selection).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = UploaderClient::for_server("http://localhost:7071");
        assert!(client.is_ok());
    }

    #[test]
    fn test_invalid_url() {
        let client = UploaderClient::for_server("not a url");
        assert!(client.is_err());
    }

    #[test]
    fn test_upload_url() {
        let client = UploaderClient::for_server("http://localhost:7071").unwrap();
        assert_eq!(
            client.upload_url().unwrap().as_str(),
            "http://localhost:7071/api/blobuploader"
        );

        let config = UploaderConfig::builder("http://uploads.example.com/base/")
            .endpoint("/api/other")
            .build();
        let client = UploaderClient::new(config).unwrap();
        assert_eq!(
            client.upload_url().unwrap().as_str(),
            "http://uploads.example.com/api/other"
        );
    }
}
