//! User-facing texts. Kept in one place so views and tests agree on wording.

pub const RATE_LIMITED: &str = "Rate limit exceeded. Please try again in a moment.";
pub const NETWORK_NOT_OK: &str = "Network response was not ok";
pub const TIMED_OUT: &str =
    "The request took too long to process. Please try again or simplify your query.";
pub const GENERIC_FAILURE: &str = "Sorry, there was an error processing your request.";

pub const EMPTY_REPOSITORY: &str = "Please enter a repository URL";
pub const INVALID_REPOSITORY: &str = "Please enter a valid GitHub repository URL";
pub const INGEST_FAILED: &str =
    "An error occurred while processing your request. Please try again.";

pub const COPIED: &str = "Copied!";
pub const COPY_FAILED: &str = "Failed to copy";

/// Separator between the directory tree and the file contents in a full digest.
pub const DIGEST_FILES_HEADER: &str = "\n\nFiles Content:\n\n";
