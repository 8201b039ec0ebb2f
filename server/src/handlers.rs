use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use handscript_shared::AnnotateRequest;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::RelayError;
use crate::logic::validate_request;
use crate::state::AppState;

pub async fn ping_handler() -> impl IntoResponse {
    StatusCode::NO_CONTENT
}

pub async fn annotate_handler(State(state): State<AppState>, body: Bytes) -> impl IntoResponse {
    let request_id = Uuid::new_v4();
    match relay(&state, &body, request_id).await {
        Ok((status, reply)) => {
            info!(%request_id, status = status.as_u16(), "annotate relayed");
            (status, Json(reply)).into_response()
        }
        Err(error) => {
            warn!(%request_id, status = error.status().as_u16(), %error, "annotate rejected");
            error.into_response()
        }
    }
}

async fn relay(
    state: &AppState,
    body: &[u8],
    request_id: Uuid,
) -> Result<(StatusCode, serde_json::Value), RelayError> {
    let request: AnnotateRequest = serde_json::from_slice(body)
        .map_err(|error| RelayError::InvalidRequest(error.to_string()))?;
    let image_bytes = validate_request(&request, state.max_image_bytes)?;
    info!(%request_id, image_bytes, "forwarding annotate request");
    let reply = state.backend.annotate(&request).await?;
    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::BAD_GATEWAY);
    Ok((status, reply.body))
}
