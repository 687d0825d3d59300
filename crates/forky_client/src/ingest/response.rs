//! Typed reading of the ingest endpoint's reply.

use serde::Deserialize;

use crate::markup::element_by_id;

/// Id of the element the server renders when it refuses a submission.
pub const ERROR_MARKER_ID: &str = "error-message";

/// What the ingest endpoint answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestResponse {
    /// A full page to swap in
    Page(String),
    /// Submission refused; the current page stays
    Rejected { message: String },
}

#[derive(Deserialize)]
struct JsonRejection {
    error: serde_json::Value,
}

impl IngestResponse {
    /// Classify a response body.
    ///
    /// A JSON `{"error": ...}` payload or markup carrying the
    /// `#error-message` element is a rejection. The element's `data-message`
    /// attribute wins over its text. Everything else is a page.
    pub fn from_body(content_type: Option<&str>, body: String) -> Self {
        let is_json = content_type.is_some_and(|ct| ct.contains("json"))
            || body.trim_start().starts_with('{');
        if is_json {
            if let Some(message) = json_rejection(&body) {
                return IngestResponse::Rejected { message };
            }
        }

        if let Some(marker) = element_by_id(&body, ERROR_MARKER_ID) {
            let message = marker
                .attr("data-message")
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| marker.text())
                .to_string();
            return IngestResponse::Rejected { message };
        }

        IngestResponse::Page(body)
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, IngestResponse::Rejected { .. })
    }
}

fn json_rejection(body: &str) -> Option<String> {
    let payload: JsonRejection = serde_json::from_str(body).ok()?;
    match payload.error {
        serde_json::Value::Null | serde_json::Value::Bool(false) => None,
        serde_json::Value::String(s) if s.is_empty() => None,
        serde_json::Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}
