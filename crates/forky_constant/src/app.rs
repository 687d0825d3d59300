//! Application metadata constants

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Label used for assistant messages in the transcript.
pub const ASSISTANT_NAME: &str = "Forky";
/// Label used for user messages in the transcript.
pub const USER_NAME: &str = "You";
