//! Wire format of the image annotation endpoint.
//!
//! Only the fields this application reads or writes are modelled; unknown
//! response fields are ignored on decode.

use serde::{Deserialize, Serialize};

pub const DOCUMENT_TEXT_DETECTION: &str = "DOCUMENT_TEXT_DETECTION";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AnnotateRequest {
    pub requests: Vec<ImageRequest>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ImageRequest {
    pub image: ImageContent,
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ImageContent {
    /// Base64 encoded image bytes.
    #[serde(default)]
    pub content: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: String,
    pub max_results: u32,
}

impl AnnotateRequest {
    /// Single image, single feature: full document text detection, one result.
    pub fn document_text(content: String) -> Self {
        Self {
            requests: vec![ImageRequest {
                image: ImageContent { content },
                features: vec![Feature {
                    kind: DOCUMENT_TEXT_DETECTION.to_string(),
                    max_results: 1,
                }],
            }],
        }
    }

    /// The image payload when the request carries exactly one image.
    pub fn single_image(&self) -> Option<&str> {
        match self.requests.as_slice() {
            [request] => Some(request.image.content.as_str()),
            _ => None,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct AnnotateResponse {
    #[serde(default)]
    pub responses: Vec<ImageResponse>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImageResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_text_annotation: Option<TextAnnotation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Status>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct TextAnnotation {
    #[serde(default)]
    pub text: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Status {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, PartialEq)]
pub enum Extracted<'a> {
    Text(&'a str),
    NoText,
    Error(&'a Status),
}

impl AnnotateResponse {
    /// Reads the full text annotation of the first response entry.
    pub fn first_text(&self) -> Extracted<'_> {
        let Some(first) = self.responses.first() else {
            return Extracted::NoText;
        };
        if let Some(status) = &first.error {
            return Extracted::Error(status);
        }
        match &first.full_text_annotation {
            Some(annotation) if !annotation.text.trim().is_empty() => {
                Extracted::Text(&annotation.text)
            }
            _ => Extracted::NoText,
        }
    }
}
