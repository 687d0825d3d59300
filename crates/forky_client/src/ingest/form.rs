//! Ingest form contents and the derived fields recomputed on submit.

use forky_constant::defaults::{fields, INGEST_ACTION};

use crate::size::log_slider_to_size;

/// Snapshot of the ingest form at submission time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestForm {
    pub action: String,
    fields: Vec<(String, String)>,
    /// Slider position, when the page has a slider
    pub slider_position: Option<u32>,
    /// Pattern type control (e.g. "exclude" / "include")
    pub pattern_type: Option<String>,
    /// Pattern text control
    pub pattern: Option<String>,
}

impl Default for IngestForm {
    fn default() -> Self {
        Self::new(INGEST_ACTION)
    }
}

impl IngestForm {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            fields: Vec::new(),
            slider_position: None,
            pattern_type: None,
            pattern: None,
        }
    }

    /// Form with only the repository field set.
    pub fn for_repository(action: impl Into<String>, repository: impl Into<String>) -> Self {
        Self::new(action).with_field(fields::INPUT_TEXT, repository)
    }

    /// Append a raw form field, as serialised from the page.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn with_slider(mut self, position: u32) -> Self {
        self.slider_position = Some(position);
        self
    }

    pub fn with_pattern(mut self, pattern_type: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.pattern_type = Some(pattern_type.into());
        self.pattern = Some(pattern.into());
        self
    }

    /// Value of the repository field, if present.
    pub fn input_text(&self) -> Option<&str> {
        self.field(fields::INPUT_TEXT)
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Fields to post. `max_file_size` is replaced by the KB value of the
    /// slider; `pattern_type` and `pattern` are replaced only when both
    /// controls are present.
    pub fn prepared_fields(&self) -> Vec<(String, String)> {
        let mut out = self.fields.clone();

        if let Some(position) = self.slider_position {
            out.retain(|(n, _)| n != fields::MAX_FILE_SIZE);
            out.push((
                fields::MAX_FILE_SIZE.to_string(),
                log_slider_to_size(position).to_string(),
            ));
        }

        if let (Some(pattern_type), Some(pattern)) = (&self.pattern_type, &self.pattern) {
            out.retain(|(n, _)| n != fields::PATTERN_TYPE && n != fields::PATTERN);
            out.push((fields::PATTERN_TYPE.to_string(), pattern_type.clone()));
            out.push((fields::PATTERN.to_string(), pattern.clone()));
        }

        out
    }
}
