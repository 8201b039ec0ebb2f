use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use handscript_shared::AnnotateRequest;

use crate::error::RelayError;

/// Checks that a request carries one usable image within `max_image_bytes`.
/// Returns the decoded image size.
pub fn validate_request(
    request: &AnnotateRequest,
    max_image_bytes: usize,
) -> Result<usize, RelayError> {
    let content = request
        .single_image()
        .ok_or_else(|| invalid("expected exactly one image"))?;
    if request.requests.iter().any(|entry| entry.features.is_empty()) {
        return Err(invalid("no features requested"));
    }
    if content.is_empty() {
        return Err(invalid("image content is empty"));
    }
    // Reject before decoding when even the smallest decoding would be over the limit.
    let min_decoded = (content.len() / 4 * 3).saturating_sub(2);
    if min_decoded > max_image_bytes {
        return Err(RelayError::ImageTooLarge {
            size: min_decoded,
            limit: max_image_bytes,
        });
    }
    let decoded = STANDARD
        .decode(content)
        .map_err(|_| invalid("image content is not base64"))?;
    if decoded.is_empty() {
        return Err(invalid("image content is empty"));
    }
    if decoded.len() > max_image_bytes {
        return Err(RelayError::ImageTooLarge {
            size: decoded.len(),
            limit: max_image_bytes,
        });
    }
    Ok(decoded.len())
}

fn invalid(reason: &str) -> RelayError {
    RelayError::InvalidRequest(reason.to_string())
}
