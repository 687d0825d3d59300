//! `forky ingest`: submit a repository and print its digest.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use forky_client::clipboard::LabelButton;
use forky_client::ingest::{SLIDER_ID, STARS_ID};
use forky_client::{
    copy_full_digest, ClientConfig, Clipboard, CopyOutcome, HttpIngestBackend, IngestController,
    IngestForm, IngestOutcome, MemoryPage,
};
use forky_constant::defaults::{fields, SLIDER_DEFAULT_POSITION, SLIDER_MAX};
use tracing::debug;

use crate::output;
use crate::views::{DigestSink, SystemClipboard, TerminalPage};

pub struct IngestArgs {
    pub url: String,
    pub position: Option<u32>,
    /// `(pattern_type, pattern)`
    pub pattern: Option<(String, String)>,
    pub action: String,
    pub page: Option<PathBuf>,
    pub out: Option<PathBuf>,
    pub copy: bool,
}

/// Bare ingest form, as served on the landing page.
fn landing_page(position: u32) -> String {
    format!(
        r#"<form id="ingestForm">
  <input id="{input}" name="{input}">
  <input type="range" id="{SLIDER_ID}" name="{size}" min="0" max="{SLIDER_MAX}" value="{position}">
</form>
<span id="{STARS_ID}"></span>"#,
        input = fields::INPUT_TEXT,
        size = fields::MAX_FILE_SIZE,
    )
}

pub async fn handle(config: ClientConfig, args: IngestArgs) -> Result<()> {
    let markup = match &args.page {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading {}", path.display()))?,
        None => landing_page(args.position.unwrap_or(SLIDER_DEFAULT_POSITION)),
    };
    let mut page = TerminalPage::new(MemoryPage::new(markup));

    let mut form = IngestForm::for_repository(args.action.as_str(), args.url.as_str());
    if let Some(position) = args.position {
        form = form.with_slider(position.min(SLIDER_MAX));
    }
    if let Some((pattern_type, pattern)) = args.pattern {
        form = form.with_pattern(pattern_type, pattern);
    }

    debug!(base_url = %config.base_url, action = %form.action, "submitting ingest form");
    let controller = IngestController::new(Arc::new(HttpIngestBackend::new(config)));
    match controller.submit(&form, &mut page, true).await {
        IngestOutcome::Invalid(_) => bail!("nothing was sent"),
        IngestOutcome::Rejected(_) => bail!("the server rejected the repository"),
        IngestOutcome::Failed(error) => return Err(error).context("ingest request failed"),
        IngestOutcome::Replaced => {}
    }

    let sink: Box<dyn Clipboard> = if args.copy {
        Box::new(SystemClipboard)
    } else {
        Box::new(DigestSink::new(args.out.clone()))
    };
    let mut button = LabelButton::new("Copy all");
    let outcome = copy_full_digest(page.page(), sink.as_ref(), &mut button, Duration::ZERO).await;

    match outcome {
        CopyOutcome::Copied => {
            if args.copy {
                output::success("Digest copied to clipboard");
            } else if let Some(path) = &args.out {
                output::success(&format!("Digest written to {}", path.display()));
            }
            Ok(())
        }
        CopyOutcome::Missing => {
            output::warning("Response has no digest; writing the page instead");
            let markup = page.page().markup().to_string();
            match &args.out {
                Some(path) => tokio::fs::write(path, markup)
                    .await
                    .with_context(|| format!("writing {}", path.display())),
                None => {
                    println!("{markup}");
                    Ok(())
                }
            }
        }
        CopyOutcome::Failed => bail!("could not write the digest"),
    }
}
