//! `forky chat`: send questions about a repository.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use forky_client::{ChatController, ClientConfig, CommonMarkRenderer, HttpChatBackend, RepoContext, RequestState};
use futures::future::join_all;
use tracing::debug;

use crate::output;
use crate::views::TerminalChat;

pub struct ChatArgs {
    pub messages: Vec<String>,
    pub page: Option<PathBuf>,
    pub summary_file: Option<PathBuf>,
    pub content_file: Option<PathBuf>,
    pub timeout_ms: Option<u64>,
    pub html: bool,
}

async fn read_optional(path: Option<&Path>) -> Result<Option<String>> {
    match path {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .map(Some)
            .with_context(|| format!("reading {}", path.display())),
        None => Ok(None),
    }
}

pub async fn handle(mut config: ClientConfig, args: ChatArgs) -> Result<()> {
    if let Some(ms) = args.timeout_ms {
        config = config.with_chat_timeout(Duration::from_millis(ms));
    }

    let page = match read_optional(args.page.as_deref()).await? {
        Some(markup) => RepoContext::from_markup(&markup),
        None => RepoContext::default(),
    };
    let context = RepoContext::new(
        read_optional(args.summary_file.as_deref()).await?,
        read_optional(args.content_file.as_deref()).await?,
    )
    .or(page);

    debug!(
        base_url = %config.base_url,
        requests = args.messages.len(),
        has_summary = context.summary.is_some(),
        has_content = context.content.is_some(),
        "starting chat"
    );
    let view = Arc::new(TerminalChat::new());
    let controller = ChatController::new(
        Arc::new(HttpChatBackend::new(&config)?),
        view.clone(),
        Arc::new(CommonMarkRenderer),
        config.chat_timeout,
    );

    // Each question is its own request with its own deadline.
    let states = join_all(
        args.messages
            .iter()
            .map(|message| controller.send_message(message, &context)),
    )
    .await;

    if args.html {
        println!("{}", view.transcript().to_html());
    }

    let sent = states.iter().filter(|s| **s != RequestState::Idle).count();
    let succeeded = states
        .iter()
        .filter(|s| **s == RequestState::Succeeded)
        .count();
    if sent == 0 {
        output::warning("Nothing to send: every message was empty");
        return Ok(());
    }
    if succeeded < sent {
        bail!("{} of {sent} chat requests failed", sent - succeeded);
    }
    output::dim(&format!("{succeeded} request(s) answered"));
    Ok(())
}
