use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("invalid annotate request: {0}")]
    InvalidRequest(String),
    #[error("image is {size} bytes, the limit is {limit}")]
    ImageTooLarge { size: usize, limit: usize },
    #[error("no OCR API key configured")]
    NotConfigured,
    #[error("OCR endpoint unreachable: {0}")]
    Upstream(reqwest::Error),
    #[error("OCR endpoint sent an unreadable reply: {0}")]
    UpstreamBody(String),
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::InvalidRequest(_) | RelayError::ImageTooLarge { .. } => {
                StatusCode::BAD_REQUEST
            }
            RelayError::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            RelayError::Upstream(_) | RelayError::UpstreamBody(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.to_string() });
        (self.status(), Json(body)).into_response()
    }
}

/// Failures that stop the relay before it can serve.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
    #[error("failed to load TLS certificate: {0}")]
    Tls(std::io::Error),
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        source: std::io::Error,
    },
    #[error("server stopped: {0}")]
    Serve(std::io::Error),
}
