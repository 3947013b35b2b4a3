use {
    serde_json::{Map, Value},
    tracing::debug,
};

use crate::{
    config::WebhookConfig,
    error::{Error, Result},
};

/// Thin HTTP wrapper that posts message payloads to an incoming webhook.
///
/// Stateless apart from the target configuration; the inner
/// [`reqwest::Client`] is safe to share across concurrent sends.
#[derive(Debug, Clone)]
pub struct WebhookClient {
    http: reqwest::Client,
    config: WebhookConfig,
}

impl WebhookClient {
    #[must_use]
    pub fn new(config: WebhookConfig) -> Self {
        Self::with_http_client(reqwest::Client::new(), config)
    }

    /// Reuse a host-owned HTTP client, e.g. one with a custom timeout.
    #[must_use]
    pub fn with_http_client(http: reqwest::Client, config: WebhookConfig) -> Self {
        Self { http, config }
    }

    #[must_use]
    pub fn config(&self) -> &WebhookConfig {
        &self.config
    }

    /// Post a message payload to the webhook, addressed to `to`.
    ///
    /// The destination overwrites any `channel` already present in the
    /// payload. A non-success HTTP status maps to [`Error::Rejected`] with
    /// the raw response body; any other failure of the exchange maps to
    /// [`Error::Transport`].
    pub async fn post_message(&self, to: &str, mut payload: Map<String, Value>) -> Result<()> {
        payload.insert("channel".to_owned(), Value::String(to.to_owned()));

        let response = self
            .http
            .post(self.config.hook_url())
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        debug!(channel = to, status = status.as_u16(), "rocket.chat webhook accepted");
        Ok(())
    }
}
