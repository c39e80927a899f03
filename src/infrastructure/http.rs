// SPDX-License-Identifier: MPL-2.0
//! Uploader posting files to an HTTP endpoint.
//!
//! The request is a `multipart/form-data` POST with a single `file` part.
//! A 2xx answer whose JSON body is `{ "url": "..." }` is a success;
//! everything else is an [`UploadError`].

use crate::application::port::{UploadError, UploadResponse, Uploader};
use crate::domain::upload::SelectedFile;
use futures_util::future::BoxFuture;
use reqwest::multipart::{Form, Part};
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
const USER_AGENT: &str = concat!("IcedUploader/", env!("CARGO_PKG_VERSION"));

/// Name of the multipart field carrying the file.
pub const FILE_FIELD: &str = "file";

#[derive(Debug, Clone)]
pub struct HttpUploader {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpUploader {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(endpoint: impl Into<String>) -> crate::error::Result<Self> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self::with_client(client, endpoint))
    }

    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Uploader for HttpUploader {
    fn upload(&self, file: SelectedFile) -> BoxFuture<'static, Result<UploadResponse, UploadError>> {
        let client = self.client.clone();
        let endpoint = self.endpoint.clone();
        Box::pin(async move {
            let part = Part::bytes(file.bytes().to_vec())
                .file_name(file.name().to_string())
                .mime_str(file.mime())
                .map_err(|err| UploadError::Other(err.to_string()))?;
            let form = Form::new().part(FILE_FIELD, part);

            let response = client
                .post(&endpoint)
                .multipart(form)
                .send()
                .await
                .map_err(|err| UploadError::Transport(err.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                return Err(UploadError::Status(status.as_u16()));
            }

            let body = response
                .bytes()
                .await
                .map_err(|err| UploadError::Transport(err.to_string()))?;
            parse_response(&body)
        })
    }
}

/// Parses a success body into an [`UploadResponse`].
///
/// # Errors
///
/// Returns [`UploadError::InvalidResponse`] if the body is not JSON with a
/// non-empty `url` string.
pub fn parse_response(body: &[u8]) -> Result<UploadResponse, UploadError> {
    let response: UploadResponse = serde_json::from_slice(body)
        .map_err(|err| UploadError::InvalidResponse(err.to_string()))?;
    if response.url.trim().is_empty() {
        return Err(UploadError::InvalidResponse("empty url".to_string()));
    }
    Ok(response)
}
