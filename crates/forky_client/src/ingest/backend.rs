//! Transport for ingest submissions.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::Form;
use reqwest::Client;
use tracing::debug;

use super::response::IngestResponse;
use crate::config::ClientConfig;
use crate::error::Result;

/// Posts form fields to an action and classifies the reply.
#[async_trait]
pub trait IngestBackend: Send + Sync {
    async fn submit(&self, action: &str, fields: &[(String, String)]) -> Result<IngestResponse>;
}

/// Multipart `POST` to the form action, resolved against the base URL.
///
/// The body is classified whatever the status: the server renders its
/// rejections as pages. No timeout is applied.
#[derive(Debug, Clone)]
pub struct HttpIngestBackend {
    client: Client,
    config: ClientConfig,
}

impl HttpIngestBackend {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn with_client(client: Client, config: ClientConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl IngestBackend for HttpIngestBackend {
    async fn submit(&self, action: &str, fields: &[(String, String)]) -> Result<IngestResponse> {
        let url = self.config.resolve(action)?;
        let form = fields
            .iter()
            .fold(Form::new(), |form, (name, value)| form.text(name.clone(), value.clone()));

        let response = self.client.post(url).multipart(form).send().await?;
        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = response.text().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "ingest response received");

        Ok(IngestResponse::from_body(content_type.as_deref(), body))
    }
}
