//! Rocket.Chat incoming-webhook notification channel.
//!
//! Builds chat messages with optional rich attachments and posts them to a
//! Rocket.Chat incoming-webhook endpoint, mapping validation and transport
//! failures to a small typed error set.
//!
//! ```no_run
//! use rocketchat_notify::{
//!     Attachment, Message, RocketChatRoute, WebhookChannel, WebhookClient, WebhookConfig,
//! };
//!
//! struct Recipient;
//!
//! impl RocketChatRoute for Recipient {
//!     fn rocket_chat_route(&self) -> Option<String> {
//!         Some("#ops".to_owned())
//!     }
//! }
//!
//! # async fn run() -> rocketchat_notify::Result<()> {
//! let config = WebhookConfig::new("https://chat.example.com", "hook-token", None);
//! let channel = WebhookChannel::new(WebhookClient::new(config));
//!
//! let message = Message::new("Deploy finished")
//!     .alias("deploy-bot")
//!     .attachment(Attachment::new().color("#36a64f").title("v1.2.3"))?;
//! channel.send(&Recipient, &message).await
//! # }
//! ```

pub mod attachment;
pub mod channel;
pub mod client;
pub mod config;
pub mod error;
pub mod message;

pub use {
    attachment::{Attachment, Timestamp},
    channel::{RocketChatRoute, WebhookChannel},
    client::WebhookClient,
    config::WebhookConfig,
    error::{Error, Result},
    message::{AttachmentInput, Message},
};
