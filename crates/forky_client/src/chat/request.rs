//! Chat request and reply payloads for `POST /chat`.

use forky_constant::defaults::fields;
use reqwest::multipart::Form;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{ClientError, Result};
use crate::ingest::MemoryPage;
use crate::markup::element_with_attribute;
use crate::message::MessageFormat;

/// Attribute marking the element that holds the digest summary.
pub const SUMMARY_ATTRIBUTE: &str = "data-summary";
/// Attribute marking the element that holds the digest content.
pub const CONTENT_ATTRIBUTE: &str = "data-content";

/// Repository context read from the page, sent along with every message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoContext {
    pub summary: Option<String>,
    pub content: Option<String>,
}

impl RepoContext {
    /// Empty strings are treated as absent.
    pub fn new(summary: Option<String>, content: Option<String>) -> Self {
        Self {
            summary: summary.filter(|s| !s.is_empty()),
            content: content.filter(|s| !s.is_empty()),
        }
    }

    /// Text of the `[data-summary]` and `[data-content]` elements of a result
    /// page. Missing or empty elements leave the field absent.
    pub fn from_markup(markup: &str) -> Self {
        let text = |attribute| {
            element_with_attribute(markup, attribute).map(|el| el.text().to_string())
        };
        Self::new(text(SUMMARY_ATTRIBUTE), text(CONTENT_ATTRIBUTE))
    }

    pub fn from_page(page: &MemoryPage) -> Self {
        Self::from_markup(page.markup())
    }

    /// Fields set on `self` win; absent ones are taken from `fallback`.
    pub fn or(self, fallback: RepoContext) -> Self {
        Self {
            summary: self.summary.or(fallback.summary),
            content: self.content.or(fallback.content),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub message: String,
    pub repo_summary: Option<String>,
    pub repo_content: Option<String>,
}

impl ChatRequest {
    /// Build a request from raw input. `None` when the trimmed input is empty.
    pub fn from_input(input: &str, context: &RepoContext) -> Option<Self> {
        let message = input.trim();
        if message.is_empty() {
            return None;
        }
        Some(Self {
            message: message.to_string(),
            repo_summary: context.summary.clone().filter(|s| !s.is_empty()),
            repo_content: context.content.clone().filter(|s| !s.is_empty()),
        })
    }

    /// Field list in posting order; optional context fields are omitted when absent.
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        let mut out = vec![(fields::MESSAGE, self.message.as_str())];
        if let Some(summary) = &self.repo_summary {
            out.push((fields::REPO_SUMMARY, summary.as_str()));
        }
        if let Some(content) = &self.repo_content {
            out.push((fields::REPO_CONTENT, content.as_str()));
        }
        out
    }

    pub fn to_multipart(&self) -> Form {
        self.fields()
            .into_iter()
            .fold(Form::new(), |form, (name, value)| form.text(name, value.to_string()))
    }
}

/// JSON body returned by the chat endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub error: Option<Value>,
}

/// Successful assistant answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantReply {
    pub text: String,
    pub format: MessageFormat,
}

impl ChatReply {
    pub fn from_json(body: &str) -> Result<Self> {
        serde_json::from_str(body).map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// The error field's text, if it is set to anything truthy.
    fn error_message(&self) -> Option<String> {
        match self.error.as_ref()? {
            Value::Null | Value::Bool(false) => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// An explicit `error` field wins over `response`.
    pub fn into_result(self) -> Result<AssistantReply> {
        if let Some(message) = self.error_message() {
            return Err(ClientError::Application(message));
        }
        let text = self
            .response
            .ok_or_else(|| ClientError::Decode("reply has no response field".to_string()))?;
        Ok(AssistantReply {
            text,
            format: MessageFormat::from_tag(self.format.as_deref()),
        })
    }
}

/// Enter submits; Shift+Enter is left to the input as a newline.
///
/// For hosts that own a key-driven text input; the line-based CLI has no key
/// events and sends each argument as a message.
///
/// ```
/// use forky_client::chat::should_submit_on_key;
///
/// assert!(should_submit_on_key("Enter", false));
/// assert!(!should_submit_on_key("Enter", true));
/// ```
pub fn should_submit_on_key(key: &str, shift: bool) -> bool {
    key == "Enter" && !shift
}
