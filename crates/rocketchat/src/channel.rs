//! Delivery channel: resolves where and as whom a message is sent, then
//! hands it to the webhook client.

use tracing::info;

use crate::{
    client::WebhookClient,
    error::{Error, Result},
    message::Message,
};

/// Recipient-side routing capability supplied by the host's notification
/// system: given the recipient, name the channel its Rocket.Chat
/// notifications should go to.
pub trait RocketChatRoute {
    fn rocket_chat_route(&self) -> Option<String>;
}

/// Delivers [`Message`]s through a Rocket.Chat incoming webhook.
#[derive(Debug, Clone)]
pub struct WebhookChannel {
    client: WebhookClient,
}

impl WebhookChannel {
    #[must_use]
    pub fn new(client: WebhookClient) -> Self {
        Self { client }
    }

    /// Send `message` to the recipient.
    ///
    /// Channel resolution order: message override, recipient route,
    /// configured default. Token resolution order: message override,
    /// configured token. Both resolutions happen before any network I/O and
    /// short-circuit with [`Error::MissingChannel`] / [`Error::MissingToken`].
    /// No retries; each outcome is reported exactly once.
    pub async fn send(&self, notifiable: &impl RocketChatRoute, message: &Message) -> Result<()> {
        let to = self.resolve_channel(notifiable, message)?;
        self.resolve_access_token(message)?;

        info!(
            channel = %to,
            attachments = message.attachment_count(),
            "rocket.chat webhook send start"
        );
        self.client.post_message(&to, message.to_payload()).await?;
        info!(channel = %to, "rocket.chat webhook sent");
        Ok(())
    }

    fn resolve_channel(
        &self,
        notifiable: &impl RocketChatRoute,
        message: &Message,
    ) -> Result<String> {
        non_empty(message.channel().map(str::to_owned))
            .or_else(|| non_empty(notifiable.rocket_chat_route()))
            .or_else(|| non_empty(self.client.config().default_channel.clone()))
            .ok_or(Error::MissingChannel)
    }

    /// The hook URL always carries the configuration token; the resolved
    /// credential only has to exist.
    fn resolve_access_token(&self, message: &Message) -> Result<()> {
        let has_override = message.access_token().is_some_and(|token| !token.is_empty());
        if has_override || self.client.config().has_token() {
            Ok(())
        } else {
            Err(Error::MissingToken)
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
