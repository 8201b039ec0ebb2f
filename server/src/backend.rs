use std::time::Duration;

use async_trait::async_trait;
use handscript_shared::AnnotateRequest;
use serde_json::Value;

use crate::error::RelayError;

pub const DEFAULT_ENDPOINT: &str = "https://vision.googleapis.com/v1/images:annotate";

/// What the OCR endpoint answered, passed back to the browser as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamReply {
    pub status: u16,
    pub body: Value,
}

#[async_trait]
pub trait OcrBackend: Send + Sync {
    async fn annotate(&self, request: &AnnotateRequest) -> Result<UpstreamReply, RelayError>;
}

pub struct VisionBackend {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl VisionBackend {
    pub fn new(
        endpoint: String,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        let api_key = api_key.filter(|key| !key.trim().is_empty());
        Ok(Self {
            http,
            endpoint,
            api_key,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl OcrBackend for VisionBackend {
    async fn annotate(&self, request: &AnnotateRequest) -> Result<UpstreamReply, RelayError> {
        let api_key = self.api_key.as_deref().ok_or(RelayError::NotConfigured)?;
        let response = self
            .http
            .post(&self.endpoint)
            .query(&[("key", api_key)])
            .json(request)
            .send()
            .await
            .map_err(upstream)?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(upstream)?;
        let body = serde_json::from_str(&text)
            .map_err(|error| RelayError::UpstreamBody(format!("status {status}: {error}")))?;
        Ok(UpstreamReply { status, body })
    }
}

/// The request URL carries the API key, so it never goes into the error.
fn upstream(error: reqwest::Error) -> RelayError {
    RelayError::Upstream(error.without_url())
}
