//! Message builder for webhook delivery.
//!
//! Same sparse-payload policy as [`crate::attachment`]: unset fields are
//! absent keys, never `null` or empty strings. The access token set with
//! [`Message::from`] is used for credential resolution only and is never
//! serialized.

use serde_json::{Map, Value};

use crate::{
    attachment::{Attachment, insert_string},
    error::Result,
};

/// Input accepted by [`Message::attachment`]: a built [`Attachment`] or a raw
/// configuration map, normalized through [`Attachment::from_map`] on append.
#[derive(Debug, Clone)]
pub enum AttachmentInput {
    Attachment(Attachment),
    Config(Map<String, Value>),
}

impl AttachmentInput {
    fn into_attachment(self) -> Result<Attachment> {
        match self {
            Self::Attachment(attachment) => Ok(attachment),
            Self::Config(map) => Attachment::from_map(&map),
        }
    }
}

impl From<Attachment> for AttachmentInput {
    fn from(value: Attachment) -> Self {
        Self::Attachment(value)
    }
}

impl From<Map<String, Value>> for AttachmentInput {
    fn from(value: Map<String, Value>) -> Self {
        Self::Config(value)
    }
}

/// A chat message bound for a Rocket.Chat incoming webhook.
///
/// The text content supports GitHub-flavoured markdown. Attachments keep
/// their insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Message {
    channel: Option<String>,
    access_token: Option<String>,
    content: String,
    alias: Option<String>,
    emoji: Option<String>,
    avatar: Option<String>,
    attachments: Vec<Attachment>,
}

impl Message {
    /// Create a message with initial text content (may be empty).
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    /// Build a message from an initial configuration map.
    ///
    /// Accepts `text`/`content`, `channel`/`to`, `from`, `alias`, `emoji`,
    /// `avatar`, and `attachments` (an array of attachment configuration
    /// maps). Unknown keys are ignored.
    pub fn from_map(map: &Map<String, Value>) -> Result<Self> {
        let mut message = Self::default();
        for (key, value) in map {
            match (key.as_str(), value) {
                ("text" | "content", Value::String(v)) => message.content = v.clone(),
                ("channel" | "to", Value::String(v)) => message.channel = Some(v.clone()),
                ("from", Value::String(v)) => message.access_token = Some(v.clone()),
                ("alias", Value::String(v)) => message.alias = Some(v.clone()),
                ("emoji", Value::String(v)) => message.emoji = Some(v.clone()),
                ("avatar", Value::String(v)) => message.avatar = Some(v.clone()),
                ("attachments", Value::Array(items)) => {
                    for item in items {
                        if let Value::Object(config) = item {
                            message.attachments.push(Attachment::from_map(config)?);
                        }
                    }
                },
                _ => {},
            }
        }
        Ok(message)
    }

    /// Override the sender's access token for this message.
    #[must_use]
    pub fn from(mut self, access_token: impl Into<String>) -> Self {
        self.access_token = Some(access_token.into());
        self
    }

    /// Override the destination channel for this message.
    #[must_use]
    pub fn to(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    /// Set the text content of the message.
    #[must_use]
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Display-name override for the sender.
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Avatar-as-emoji override, e.g. `:ghost:`.
    #[must_use]
    pub fn emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = Some(emoji.into());
        self
    }

    /// Avatar-as-image-URL override.
    #[must_use]
    pub fn avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    /// Append one attachment, normalizing a raw configuration map first.
    pub fn attachment(mut self, attachment: impl Into<AttachmentInput>) -> Result<Self> {
        self.attachments.push(attachment.into().into_attachment()?);
        Ok(self)
    }

    /// Append each attachment in order.
    pub fn attachments<I>(mut self, attachments: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<AttachmentInput>,
    {
        for attachment in attachments {
            self = self.attachment(attachment)?;
        }
        Ok(self)
    }

    /// Drop all previously-appended attachments.
    #[must_use]
    pub fn clear_attachments(mut self) -> Self {
        self.attachments.clear();
        self
    }

    /// Destination channel override, if any.
    #[must_use]
    pub fn channel(&self) -> Option<&str> {
        self.channel.as_deref()
    }

    /// Sender access-token override, if any.
    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    #[must_use]
    pub fn attachment_count(&self) -> usize {
        self.attachments.len()
    }

    /// Sparse wire payload: `text`, `channel`, `alias`, `emoji`, `avatar`,
    /// and `attachments` (recursively serialized), each emitted only when
    /// set and non-empty. The access token never appears.
    #[must_use]
    pub fn to_payload(&self) -> Map<String, Value> {
        let mut payload = Map::new();
        insert_string(&mut payload, "text", Some(&self.content));
        insert_string(&mut payload, "channel", self.channel.as_deref());
        insert_string(&mut payload, "alias", self.alias.as_deref());
        insert_string(&mut payload, "emoji", self.emoji.as_deref());
        insert_string(&mut payload, "avatar", self.avatar.as_deref());
        if !self.attachments.is_empty() {
            let attachments = self
                .attachments
                .iter()
                .map(|attachment| Value::Object(attachment.to_payload()))
                .collect();
            payload.insert("attachments".to_owned(), Value::Array(attachments));
        }
        payload
    }
}
