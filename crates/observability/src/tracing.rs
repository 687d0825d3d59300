//! Span helpers shared by the client crates

/// Span for one chat request, from submission until it settles.
///
/// `outcome` starts empty and is recorded when the request settles.
///
/// ```rust
/// use forky_observability::chat_request_span;
///
/// let span = chat_request_span!("3f1c", 42);
/// span.record("outcome", "succeeded");
/// ```
#[macro_export]
macro_rules! chat_request_span {
    ($request_id:expr, $message_len:expr) => {
        tracing::info_span!(
            "chat.request",
            request.id = %$request_id,
            message.len = $message_len,
            outcome = tracing::field::Empty,
            duration_ms = tracing::field::Empty,
            error = tracing::field::Empty,
            error.message = tracing::field::Empty,
        )
    };
}

/// Span for one ingest form submission.
///
/// ```rust
/// use forky_observability::ingest_span;
///
/// let span = ingest_span!("/", "https://github.com/foo/bar");
/// let _guard = span.enter();
/// ```
#[macro_export]
macro_rules! ingest_span {
    ($action:expr, $repository:expr) => {
        tracing::info_span!(
            "ingest.submit",
            form.action = %$action,
            repository = %$repository,
            outcome = tracing::field::Empty,
            duration_ms = tracing::field::Empty,
            error = tracing::field::Empty,
            error.message = tracing::field::Empty,
        )
    };
}

/// Log an error and flag it on the current span.
pub fn record_error<E: std::error::Error>(error: &E) {
    let span = tracing::Span::current();
    span.record("error", true);
    span.record("error.message", error.to_string());
    tracing::error!(error = %error, "Operation failed");
}

/// Record a duration in milliseconds on the current span under `key`.
///
/// ```rust
/// use forky_observability::record_duration;
/// use std::time::Instant;
///
/// let start = Instant::now();
/// record_duration("duration_ms", start.elapsed());
/// ```
pub fn record_duration(key: &str, duration: std::time::Duration) {
    let span = tracing::Span::current();
    span.record(key, duration.as_millis() as u64);
}
