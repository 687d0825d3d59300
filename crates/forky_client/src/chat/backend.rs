//! Transport for chat requests.

use async_trait::async_trait;
use reqwest::Client;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use url::Url;

use super::request::{ChatReply, ChatRequest};
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

/// Sends one chat request and returns the decoded reply.
///
/// Implementations must return [`ClientError::Timeout`] once `cancel` fires
/// and must not retry.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn send(&self, request: &ChatRequest, cancel: CancellationToken) -> Result<ChatReply>;
}

/// `POST /chat` with a multipart body.
#[derive(Debug, Clone)]
pub struct HttpChatBackend {
    client: Client,
    url: Url,
}

impl HttpChatBackend {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            client: Client::new(),
            url: config.chat_url()?,
        })
    }

    /// Reuse an existing client (connection pool, proxies, default headers).
    pub fn with_client(client: Client, config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            client,
            url: config.chat_url()?,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    async fn post(&self, request: &ChatRequest) -> Result<ChatReply> {
        let response = self
            .client
            .post(self.url.clone())
            .multipart(request.to_multipart())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "chat endpoint returned an error status");
            return Err(ClientError::from_status(status));
        }

        let body = response.text().await?;
        debug!(bytes = body.len(), "chat reply received");
        ChatReply::from_json(&body)
    }
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    async fn send(&self, request: &ChatRequest, cancel: CancellationToken) -> Result<ChatReply> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ClientError::Timeout),
            reply = self.post(request) => reply,
        }
    }
}
