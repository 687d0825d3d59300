//! Repository chat: request payloads, transport, deadline and lifecycle.

mod backend;
mod deadline;
mod lifecycle;
mod request;

pub use backend::{ChatBackend, HttpChatBackend};
pub use deadline::Deadline;
pub use lifecycle::{ChatController, FailureReason, RequestState};
pub use request::{
    should_submit_on_key, AssistantReply, ChatReply, ChatRequest, RepoContext, CONTENT_ATTRIBUTE,
    SUMMARY_ATTRIBUTE,
};
