mod annotate;

pub use annotate::{
    AnnotateRequest, AnnotateResponse, Extracted, Feature, ImageContent, ImageRequest,
    ImageResponse, Status, TextAnnotation, DOCUMENT_TEXT_DETECTION,
};

/// Path the browser posts annotate requests to; the relay forwards them upstream.
pub const ANNOTATE_PATH: &str = "/api/annotate";
