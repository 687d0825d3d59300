//! Command dispatch.

pub mod chat;
pub mod ingest;
pub mod size;

use anyhow::Result;
use forky_client::ClientConfig;

use crate::cli::{Cli, Command};

pub async fn handle(cli: Cli) -> Result<()> {
    let mut config = ClientConfig::from_env();
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }

    match cli.command {
        Command::Chat {
            messages,
            page,
            summary_file,
            content_file,
            timeout_ms,
            html,
        } => {
            chat::handle(
                config,
                chat::ChatArgs {
                    messages,
                    page,
                    summary_file,
                    content_file,
                    timeout_ms,
                    html,
                },
            )
            .await
        }
        Command::Ingest {
            url,
            position,
            pattern_type,
            pattern,
            action,
            page,
            out,
            copy,
        } => {
            ingest::handle(
                config,
                ingest::IngestArgs {
                    url,
                    position,
                    pattern: pattern_type.zip(pattern),
                    action,
                    page,
                    out,
                    copy,
                },
            )
            .await
        }
        Command::Size { positions } => size::handle(&positions),
    }
}
