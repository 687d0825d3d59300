//! Ingest submission: validate, post, then either report the rejection or
//! swap in the returned page and re-bind its controls.

use std::sync::Arc;
use std::time::Instant;

use forky_constant::messages;
use forky_observability::{ingest_span, record_duration, record_error};
use tracing::{debug, info, warn, Instrument};

use super::backend::IngestBackend;
use super::form::IngestForm;
use super::page::PageView;
use super::response::IngestResponse;
use super::validate::validate_repository;
use crate::error::{ClientError, ValidationError};
use crate::slider::refresh_slider;

/// How a submission ended.
#[derive(Debug)]
pub enum IngestOutcome {
    /// Stopped before any request
    Invalid(ValidationError),
    /// Server refused; page kept
    Rejected(String),
    /// Page replaced by the server's response
    Replaced,
    /// Request failed in transit
    Failed(ClientError),
}

impl IngestOutcome {
    fn label(&self) -> &'static str {
        match self {
            IngestOutcome::Invalid(_) => "invalid",
            IngestOutcome::Rejected(_) => "rejected",
            IngestOutcome::Replaced => "replaced",
            IngestOutcome::Failed(_) => "failed",
        }
    }
}

pub struct IngestController<B> {
    backend: Arc<B>,
}

impl<B> Clone for IngestController<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
        }
    }
}

impl<B: IngestBackend> IngestController<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    /// Submit `form` on behalf of `page`.
    ///
    /// With `show_loading` the submit button shows its loading state until
    /// the request settles.
    pub async fn submit(
        &self,
        form: &IngestForm,
        page: &mut dyn PageView,
        show_loading: bool,
    ) -> IngestOutcome {
        let repository = form.input_text().unwrap_or_default().trim().to_string();
        let span = ingest_span!(form.action, repository);
        let start = Instant::now();

        let outcome = self.run(form, page, show_loading).instrument(span.clone()).await;

        span.in_scope(|| {
            tracing::Span::current().record("outcome", outcome.label());
            record_duration("duration_ms", start.elapsed());
            info!(outcome = outcome.label(), "ingest settled");
        });
        outcome
    }

    async fn run(
        &self,
        form: &IngestForm,
        page: &mut dyn PageView,
        show_loading: bool,
    ) -> IngestOutcome {
        if let Err(error) = validate_repository(form.input_text().unwrap_or_default()) {
            debug!(%error, "ingest input rejected");
            page.show_error(&error.to_string());
            return IngestOutcome::Invalid(error);
        }

        let mut prepared = form.clone();
        if prepared.slider_position.is_none() {
            prepared.slider_position = page.slider().map(|s| s.position());
        }
        let fields = prepared.prepared_fields();

        let stars = page.stars_text().filter(|s| !s.is_empty());
        if show_loading {
            page.set_submitting(true);
        }

        match self.backend.submit(&form.action, &fields).await {
            Ok(IngestResponse::Rejected { message }) => {
                warn!(%message, "ingest rejected by server");
                page.show_error(&message);
                page.set_submitting(false);
                IngestOutcome::Rejected(message)
            }
            Ok(IngestResponse::Page(markup)) => {
                page.replace_content(&markup);
                if let Some(slider) = page.slider() {
                    refresh_slider(slider);
                }
                if let Some(stars) = stars {
                    page.set_stars_text(&stars);
                }
                page.scroll_to_results();
                IngestOutcome::Replaced
            }
            Err(error) => {
                record_error(&error);
                page.set_submitting(false);
                page.show_error(messages::INGEST_FAILED);
                IngestOutcome::Failed(error)
            }
        }
    }
}
