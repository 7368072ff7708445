use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;

use crate::error::NotifyError;
use crate::payload::Webhook;

/// Where an assembled webhook payload is delivered.
#[async_trait]
pub trait Sink: Send + Sync {
    /// Deliver once; returns the response status line on success.
    async fn deliver(&self, payload: &Webhook) -> Result<String, NotifyError>;
}

/// Slack Incoming Webhook over HTTP.
pub struct WebhookSink {
    client: reqwest::Client,
    endpoint: String,
}

impl WebhookSink {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// Host part of the endpoint; the full URL embeds a secret token.
    fn host(&self) -> String {
        Url::parse(&self.endpoint)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_else(|| "<invalid url>".to_string())
    }
}

#[async_trait]
impl Sink for WebhookSink {
    async fn deliver(&self, payload: &Webhook) -> Result<String, NotifyError> {
        let body = serde_json::to_vec(payload)?;
        tracing::debug!(payload = %String::from_utf8_lossy(&body), "sending to Slack");
        tracing::info!(host = %self.host(), bytes = body.len(), "posting webhook");

        let res = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = res.status();
        if status.as_u16() >= 299 {
            tracing::warn!(%status, "Slack rejected webhook");
            return Err(NotifyError::Status(status.to_string()));
        }
        Ok(status.to_string())
    }
}
