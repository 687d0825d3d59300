//! Chat request lifecycle: `Idle → Pending → {Succeeded, Failed, TimedOut}`.
//!
//! Ordering per request: the user message is appended before the backend is
//! called; the reply (or error text) is appended after it settles; then the
//! loading indicator is hidden and the deadline disarmed, exactly once.
//! Overlapping requests are independent and each gets its own deadline.

use std::sync::Arc;
use std::time::{Duration, Instant};

use forky_observability::chat_request_span;
use tracing::{debug, info, warn, Instrument};
use uuid::Uuid;

use super::backend::ChatBackend;
use super::deadline::Deadline;
use super::request::{ChatRequest, RepoContext};
use crate::error::ClientError;
use crate::message::{ChatMessage, MessageFormat};
use crate::render::{render_message, timestamp_now, MarkdownRenderer};
use crate::transcript::{ChatView, RenderedMessage};

/// Why a request ended in `Failed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    RateLimited,
    Network,
    Application(String),
    Decode,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed(FailureReason),
    TimedOut,
}

impl RequestState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RequestState::Succeeded | RequestState::Failed(_) | RequestState::TimedOut
        )
    }

    /// Terminal state for a request that settled with `error`.
    pub fn from_error(error: &ClientError) -> Self {
        match error {
            ClientError::Timeout => RequestState::TimedOut,
            ClientError::RateLimited => RequestState::Failed(FailureReason::RateLimited),
            ClientError::Application(message) => {
                RequestState::Failed(FailureReason::Application(message.clone()))
            }
            ClientError::Network { .. } | ClientError::Transport(_) => {
                RequestState::Failed(FailureReason::Network)
            }
            _ => RequestState::Failed(FailureReason::Decode),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            RequestState::Idle => "idle",
            RequestState::Pending => "pending",
            RequestState::Succeeded => "succeeded",
            RequestState::Failed(_) => "failed",
            RequestState::TimedOut => "timed_out",
        }
    }
}

/// Runs the terminal cleanup when dropped: hide the loading indicator and
/// disarm the deadline. Dropping is the only way to run it, so it runs once.
struct Settle<'a> {
    view: &'a dyn ChatView,
    deadline: Deadline,
}

impl Drop for Settle<'_> {
    fn drop(&mut self) {
        self.deadline.disarm();
        self.view.set_loading(false);
    }
}

/// Drives chat submissions against a backend and a view.
pub struct ChatController<B> {
    backend: Arc<B>,
    view: Arc<dyn ChatView>,
    renderer: Arc<dyn MarkdownRenderer>,
    timeout: Duration,
}

impl<B> Clone for ChatController<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            view: Arc::clone(&self.view),
            renderer: Arc::clone(&self.renderer),
            timeout: self.timeout,
        }
    }
}

impl<B: ChatBackend> ChatController<B> {
    pub fn new(
        backend: Arc<B>,
        view: Arc<dyn ChatView>,
        renderer: Arc<dyn MarkdownRenderer>,
        timeout: Duration,
    ) -> Self {
        Self {
            backend,
            view,
            renderer,
            timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn append(&self, message: ChatMessage) {
        let html = render_message(&message, &timestamp_now(), self.renderer.as_ref());
        self.view.append_message(RenderedMessage { message, html });
    }

    /// Submit raw input. Returns the terminal state, or `Idle` when the
    /// trimmed input was empty and nothing was sent.
    pub async fn send_message(&self, input: &str, context: &RepoContext) -> RequestState {
        let Some(request) = ChatRequest::from_input(input, context) else {
            debug!("empty chat input ignored");
            return RequestState::Idle;
        };

        let request_id = Uuid::new_v4();
        let span = chat_request_span!(request_id, request.message.len());
        self.run(request).instrument(span).await
    }

    async fn run(&self, request: ChatRequest) -> RequestState {
        self.append(ChatMessage::user(request.message.clone()));
        self.view.set_loading(true);
        self.view.clear_input();

        let settle = Settle {
            view: self.view.as_ref(),
            deadline: Deadline::arm(self.timeout),
        };
        let state = RequestState::Pending;
        debug!(state = state.label(), timeout_ms = self.timeout.as_millis() as u64, "chat request sent");

        let start = Instant::now();
        let outcome = tokio::select! {
            biased;
            _ = tokio::time::sleep_until(settle.deadline.at()) => Err(ClientError::Timeout),
            reply = self.backend.send(&request, settle.deadline.token()) => reply,
        };
        // A reply observed at or after the deadline instant is late, whichever
        // future happened to be polled first.
        let outcome = if settle.deadline.expired() {
            Err(ClientError::Timeout)
        } else {
            outcome.and_then(|reply| reply.into_result())
        };

        let state = match outcome {
            Ok(reply) => {
                self.append(ChatMessage::assistant(reply.text, reply.format));
                RequestState::Succeeded
            }
            Err(error) => {
                warn!(error = %error, "chat request failed");
                self.append(ChatMessage::assistant(error.chat_message(), MessageFormat::Plain));
                RequestState::from_error(&error)
            }
        };
        drop(settle);

        let span = tracing::Span::current();
        span.record("outcome", state.label());
        forky_observability::record_duration("duration_ms", start.elapsed());
        info!(outcome = state.label(), "chat request settled");
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::request::ChatReply;
    use crate::error::Result;
    use crate::message::Role;
    use crate::render::CommonMarkRenderer;
    use crate::transcript::Transcript;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio_util::sync::CancellationToken;

    enum Script {
        Reply(&'static str),
        Status(u16),
    }

    /// Backend that answers after `delay`, honouring cancellation.
    struct ScriptedBackend {
        delay: Duration,
        script: Script,
        calls: AtomicUsize,
    }

    impl ScriptedBackend {
        fn new(delay: Duration, script: Script) -> Arc<Self> {
            Arc::new(Self {
                delay,
                script,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ChatBackend for ScriptedBackend {
        async fn send(&self, _request: &ChatRequest, cancel: CancellationToken) -> Result<ChatReply> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::select! {
                biased;
                _ = cancel.cancelled() => Err(ClientError::Timeout),
                _ = tokio::time::sleep(self.delay) => match self.script {
                    Script::Reply(body) => ChatReply::from_json(body),
                    Script::Status(code) => Err(ClientError::from_status(
                        reqwest::StatusCode::from_u16(code).unwrap(),
                    )),
                },
            }
        }
    }

    fn controller(backend: Arc<ScriptedBackend>) -> (ChatController<ScriptedBackend>, Arc<Transcript>) {
        let transcript = Arc::new(Transcript::new());
        let controller = ChatController::new(
            backend,
            transcript.clone(),
            Arc::new(CommonMarkRenderer),
            Duration::from_millis(30_000),
        );
        (controller, transcript)
    }

    #[tokio::test(start_paused = true)]
    async fn blank_input_stays_idle_without_network() {
        let backend = ScriptedBackend::new(Duration::ZERO, Script::Reply(r#"{"response":"x"}"#));
        let (chat, transcript) = controller(backend.clone());

        assert_eq!(chat.send_message("   ", &RepoContext::default()).await, RequestState::Idle);
        assert_eq!(chat.send_message("", &RepoContext::default()).await, RequestState::Idle);

        assert_eq!(backend.calls(), 0);
        assert!(transcript.is_empty());
        assert_eq!(transcript.loading_hidden_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn success_appends_user_then_assistant() {
        let backend = ScriptedBackend::new(
            Duration::from_millis(100),
            Script::Reply(r#"{"response":"**hi**","format":"markdown"}"#),
        );
        let (chat, transcript) = controller(backend.clone());

        let state = chat.send_message("  hello ", &RepoContext::default()).await;
        assert_eq!(state, RequestState::Succeeded);

        let entries = transcript.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].message, ChatMessage::user("hello"));
        assert_eq!(entries[1].message.role, Role::Assistant);
        assert_eq!(entries[1].message.format, MessageFormat::Markdown);
        assert!(entries[1].html.contains("<strong>hi</strong>"));
        assert_eq!(transcript.scroll_index(), Some(1));
        assert!(!transcript.is_loading());
        assert_eq!(transcript.loading_hidden_count(), 1);
        assert_eq!(transcript.input_cleared_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn plain_reply_is_escaped() {
        let backend = ScriptedBackend::new(
            Duration::ZERO,
            Script::Reply(r#"{"response":"<img src=x onerror=alert(1)>"}"#),
        );
        let (chat, transcript) = controller(backend);

        chat.send_message("hi", &RepoContext::default()).await;
        let html = transcript.last().unwrap().html;
        assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
        assert!(!html.contains("<img"));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_reply_times_out() {
        let backend = ScriptedBackend::new(
            Duration::from_millis(30_500),
            Script::Reply(r#"{"response":"too late"}"#),
        );
        let (chat, transcript) = controller(backend);

        let state = chat.send_message("hello", &RepoContext::default()).await;
        assert_eq!(state, RequestState::TimedOut);

        let last = transcript.last().unwrap().message;
        assert_eq!(
            last.content,
            "The request took too long to process. Please try again or simplify your query."
        );
        assert_ne!(last.content, "Error: Network response was not ok");
        assert_eq!(transcript.loading_hidden_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn reply_exactly_at_deadline_times_out() {
        let backend = ScriptedBackend::new(
            Duration::from_millis(30_000),
            Script::Reply(r#"{"response":"on the dot"}"#),
        );
        let (chat, transcript) = controller(backend);

        let state = chat.send_message("hello", &RepoContext::default()).await;
        assert_eq!(state, RequestState::TimedOut);
        assert_eq!(
            transcript.last().unwrap().message.content,
            "The request took too long to process. Please try again or simplify your query."
        );
        assert_eq!(transcript.loading_hidden_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn reply_just_before_deadline_succeeds() {
        let backend = ScriptedBackend::new(
            Duration::from_millis(29_999),
            Script::Reply(r#"{"response":"made it"}"#),
        );
        let (chat, transcript) = controller(backend);

        let state = chat.send_message("hello", &RepoContext::default()).await;
        assert_eq!(state, RequestState::Succeeded);
        assert_eq!(transcript.last().unwrap().message.content, "made it");
    }

    #[tokio::test(start_paused = true)]
    async fn rate_limit_has_specific_text() {
        let backend = ScriptedBackend::new(Duration::ZERO, Script::Status(429));
        let (chat, transcript) = controller(backend);

        let state = chat.send_message("hello", &RepoContext::default()).await;
        assert_eq!(state, RequestState::Failed(FailureReason::RateLimited));
        assert_eq!(
            transcript.last().unwrap().message.content,
            "Error: Rate limit exceeded. Please try again in a moment."
        );
    }

    #[tokio::test(start_paused = true)]
    async fn server_error_has_generic_network_text() {
        let backend = ScriptedBackend::new(Duration::ZERO, Script::Status(500));
        let (chat, transcript) = controller(backend);

        let state = chat.send_message("hello", &RepoContext::default()).await;
        assert_eq!(state, RequestState::Failed(FailureReason::Network));
        assert_eq!(
            transcript.last().unwrap().message.content,
            "Error: Network response was not ok"
        );
        // The user message stays even though the call failed.
        assert_eq!(transcript.entries()[0].message, ChatMessage::user("hello"));
    }

    #[tokio::test(start_paused = true)]
    async fn error_field_is_application_failure() {
        let backend = ScriptedBackend::new(
            Duration::ZERO,
            Script::Reply(r#"{"error":"No repository loaded"}"#),
        );
        let (chat, transcript) = controller(backend);

        let state = chat.send_message("hello", &RepoContext::default()).await;
        assert_eq!(
            state,
            RequestState::Failed(FailureReason::Application("No repository loaded".into()))
        );
        assert_eq!(
            transcript.last().unwrap().message.content,
            "Error: No repository loaded"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn overlapping_requests_settle_independently() {
        let backend = ScriptedBackend::new(
            Duration::from_millis(1_000),
            Script::Reply(r#"{"response":"ok"}"#),
        );
        let (chat, transcript) = controller(backend.clone());
        let ctx = RepoContext::default();

        let (a, b) = tokio::join!(chat.send_message("first", &ctx), chat.send_message("second", &ctx));
        assert_eq!(a, RequestState::Succeeded);
        assert_eq!(b, RequestState::Succeeded);
        assert_eq!(backend.calls(), 2);
        assert_eq!(transcript.len(), 4);
        assert_eq!(transcript.loading_hidden_count(), 2);
    }

    #[test]
    fn state_mapping_from_errors() {
        assert_eq!(RequestState::from_error(&ClientError::Timeout), RequestState::TimedOut);
        assert_eq!(
            RequestState::from_error(&ClientError::Network { status: 503 }),
            RequestState::Failed(FailureReason::Network)
        );
        assert_eq!(
            RequestState::from_error(&ClientError::Decode("x".into())),
            RequestState::Failed(FailureReason::Decode)
        );
        assert!(RequestState::TimedOut.is_terminal());
        assert!(!RequestState::Pending.is_terminal());
        assert!(!RequestState::Idle.is_terminal());
    }
}
