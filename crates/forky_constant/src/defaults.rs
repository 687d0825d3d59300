//! Defaults for endpoints, timers and the file-size slider.

/// Base URL of the backend when nothing else is configured.
pub const BASE_URL: &str = "http://127.0.0.1:8000";
/// Chat endpoint path, relative to the base URL.
pub const CHAT_PATH: &str = "/chat";
/// Ingest form action when the page does not provide one.
pub const INGEST_ACTION: &str = "/";

/// Deadline for a single chat request.
pub const CHAT_TIMEOUT_MS: u64 = 30_000;
/// How long the copy button shows its feedback label.
pub const COPY_FEEDBACK_MS: u64 = 1_000;
/// How long the full-digest copy button shows its feedback label.
pub const DIGEST_COPY_FEEDBACK_MS: u64 = 2_000;

/// Highest slider position; the lowest is 0.
pub const SLIDER_MAX: u32 = 500;
/// Position a freshly rendered page starts with.
pub const SLIDER_DEFAULT_POSITION: u32 = 243;
/// Size (KB) at position 0.
pub const MIN_SIZE_KB: u64 = 1;
/// Size (KB) at `SLIDER_MAX`, i.e. 100 MB.
pub const MAX_SIZE_KB: u64 = 102_400;
/// Warp applied to the normalized position; > 1 favours small sizes.
pub const SIZE_CURVE_EXPONENT: f64 = 1.5;

/// Form field names posted by the ingest form.
pub mod fields {
    pub const INPUT_TEXT: &str = "input_text";
    pub const MAX_FILE_SIZE: &str = "max_file_size";
    pub const PATTERN_TYPE: &str = "pattern_type";
    pub const PATTERN: &str = "pattern";

    pub const MESSAGE: &str = "message";
    pub const REPO_SUMMARY: &str = "repo_summary";
    pub const REPO_CONTENT: &str = "repo_content";
}
