//! Turning the canvas into recognized text.
//!
//! The request itself is sent by the browser glue; this module builds the
//! payload and folds whatever came back into exactly one displayable
//! [`Recognition`].

use thiserror::Error;

use handscript_shared::{AnnotateRequest, AnnotateResponse, Extracted};

use crate::surface::{Surface, SurfaceError};

pub const NO_TEXT_MESSAGE: &str = "No text detected. Please try writing more clearly.";
pub const ERROR_MESSAGE: &str = "Error processing image. Please try again.";

#[derive(Clone, Debug, PartialEq)]
pub enum Recognition {
    Text(String),
    NoText,
    Failed,
}

impl Recognition {
    pub fn message(&self) -> &str {
        match self {
            Recognition::Text(text) => text,
            Recognition::NoText => NO_TEXT_MESSAGE,
            Recognition::Failed => ERROR_MESSAGE,
        }
    }

    /// Short tag used in logs and as the result panel's `data-state`.
    pub fn kind(&self) -> &'static str {
        match self {
            Recognition::Text(_) => "text",
            Recognition::NoText => "no-text",
            Recognition::Failed => "failed",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RecognitionPhase {
    #[default]
    Idle,
    Recognizing,
}

#[derive(Debug, Error)]
pub enum RecognizeError {
    #[error("could not export canvas: {0}")]
    Export(#[from] SurfaceError),
    #[error("request failed: {0}")]
    Transport(String),
    #[error("annotate endpoint answered HTTP {0}")]
    Status(u16),
    #[error("malformed annotate payload: {0}")]
    Body(#[from] serde_json::Error),
    #[error("annotate endpoint reported error {code}: {message}")]
    Service { code: i32, message: String },
}

/// Busy phase plus the last displayed result.
///
/// Re-entrancy is the caller's business: it must not call [`begin`] while
/// [`phase`] is `Recognizing`.
///
/// [`begin`]: Recognizer::begin
/// [`phase`]: Recognizer::phase
#[derive(Debug, Default)]
pub struct Recognizer {
    phase: RecognitionPhase,
    result: Option<Recognition>,
}

impl Recognizer {
    pub fn phase(&self) -> RecognitionPhase {
        self.phase
    }

    pub fn result(&self) -> Option<&Recognition> {
        self.result.as_ref()
    }

    pub fn begin(&mut self) {
        self.phase = RecognitionPhase::Recognizing;
    }

    /// Records the outcome of a request. Always leaves the phase `Idle`.
    ///
    /// A late response still overwrites whatever is displayed, even if the
    /// board was cleared while it was in flight.
    pub fn finish(&mut self, outcome: Result<String, RecognizeError>) -> &Recognition {
        let recognition = interpret(outcome);
        log::info!("recognition finished: {}", recognition.kind());
        self.phase = RecognitionPhase::Idle;
        self.result.insert(recognition)
    }

    pub fn clear_result(&mut self) {
        self.result = None;
    }
}

/// Serializes the current canvas into an annotate request body.
pub fn request_body<S: Surface + ?Sized>(surface: &S) -> Result<String, RecognizeError> {
    let content = surface.export_png_base64()?;
    let request = AnnotateRequest::document_text(content);
    Ok(serde_json::to_string(&request)?)
}

pub fn interpret(outcome: Result<String, RecognizeError>) -> Recognition {
    match outcome.and_then(|body| extract_text(&body)) {
        Ok(Some(text)) => Recognition::Text(text),
        Ok(None) => Recognition::NoText,
        Err(error) => {
            log::error!("OCR error: {error}");
            Recognition::Failed
        }
    }
}

fn extract_text(body: &str) -> Result<Option<String>, RecognizeError> {
    let response: AnnotateResponse = serde_json::from_str(body)?;
    match response.first_text() {
        Extracted::Text(text) => Ok(Some(text.to_string())),
        Extracted::NoText => Ok(None),
        Extracted::Error(status) => Err(RecognizeError::Service {
            code: status.code,
            message: status.message.clone(),
        }),
    }
}
