use {
    secrecy::{ExposeSecret, Secret},
    serde::{Deserialize, Serialize},
};

/// Delivery target for a Rocket.Chat incoming webhook.
///
/// Built once by the host (directly or from its configuration files) and
/// handed to [`crate::WebhookClient`]; never mutated afterwards.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookConfig {
    /// Base URL of the Rocket.Chat server, e.g. `https://chat.example.com`.
    pub base_url: String,

    /// Incoming-webhook token; embedded in the hook URL path.
    #[serde(serialize_with = "serialize_secret")]
    pub token: Secret<String>,

    /// Channel used when neither the message nor the recipient route names
    /// one.
    pub default_channel: Option<String>,
}

impl WebhookConfig {
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
        default_channel: impl Into<Option<String>>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            token: Secret::new(token.into()),
            default_channel: default_channel.into(),
        }
    }

    /// Webhook endpoint URL. Trailing slashes on the base URL are stripped;
    /// the path always carries the configuration token.
    #[must_use]
    pub fn hook_url(&self) -> String {
        format!(
            "{}/hooks/{}",
            self.base_url.trim_end_matches('/'),
            self.token.expose_secret()
        )
    }

    #[must_use]
    pub fn has_token(&self) -> bool {
        !self.token.expose_secret().is_empty()
    }
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            token: Secret::new(String::new()),
            default_channel: None,
        }
    }
}

impl std::fmt::Debug for WebhookConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookConfig")
            .field("base_url", &self.base_url)
            .field("token", &"[REDACTED]")
            .field("default_channel", &self.default_channel)
            .finish()
    }
}

fn serialize_secret<S: serde::Serializer>(
    secret: &Secret<String>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}
