//! Client-side flows of the Forky repository digest app.
//!
//! - **chat**: one request per question, raced against a 30 s deadline,
//!   with every outcome mapped to a transcript entry
//! - **ingest**: form validation, submission and page replacement
//! - **slider**: logarithmic file-size slider binding
//! - **clipboard**: copy buttons with transient feedback
//!
//! Host surfaces (transcript, page, slider, clipboard) are traits; the crate
//! never reaches for a global document.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use forky_client::{ChatController, ClientConfig, CommonMarkRenderer, HttpChatBackend, RepoContext, Transcript};
//!
//! # async fn run() -> forky_client::Result<()> {
//! let config = ClientConfig::from_env();
//! let transcript = Arc::new(Transcript::new());
//! let chat = ChatController::new(
//!     Arc::new(HttpChatBackend::new(&config)?),
//!     transcript.clone(),
//!     Arc::new(CommonMarkRenderer),
//!     config.chat_timeout,
//! );
//! chat.send_message("What does this repo do?", &RepoContext::default()).await;
//! # Ok(())
//! # }
//! ```

pub mod chat;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod ingest;
pub mod markup;
pub mod message;
pub mod render;
pub mod size;
pub mod slider;
pub mod transcript;

pub use chat::{ChatBackend, ChatController, HttpChatBackend, RepoContext, RequestState};
pub use clipboard::{copy_full_digest, copy_text, Clipboard, CopyOutcome, CopyTarget};
pub use config::ClientConfig;
pub use error::{ClientError, ErrorKind, Result, ValidationError};
pub use ingest::{HttpIngestBackend, IngestController, IngestForm, IngestOutcome, MemoryPage, PageView};
pub use message::{ChatMessage, MessageFormat, Role};
pub use render::{CommonMarkRenderer, MarkdownRenderer};
pub use size::{format_size, log_slider_to_size};
pub use slider::{refresh_slider, SizeSlider, SliderControl};
pub use transcript::{ChatView, RenderedMessage, Transcript};
