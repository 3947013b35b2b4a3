//! Rich-attachment builder for webhook messages.
//!
//! Every field is optional; only explicitly-set fields appear in the wire
//! payload. Booleans are tracked by invocation, so `collapsed(false)` emits
//! `"collapsed": false` while an untouched flag emits nothing.

use {
    chrono::{DateTime, SecondsFormat, TimeZone, Utc},
    serde_json::{Map, Value},
};

use crate::error::{Error, Result};

/// Timestamp input for [`Attachment::timestamp`]: either a pre-formatted
/// string passed through verbatim, or a date-time normalized to UTC and
/// formatted with millisecond precision (`2020-02-19T19:00:00.000Z`).
#[derive(Debug, Clone)]
pub enum Timestamp {
    Raw(String),
    Time(DateTime<Utc>),
}

impl Timestamp {
    fn into_wire(self) -> String {
        match self {
            Self::Raw(value) => value,
            Self::Time(value) => value.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

impl From<&str> for Timestamp {
    fn from(value: &str) -> Self {
        Self::Raw(value.to_owned())
    }
}

impl From<String> for Timestamp {
    fn from(value: String) -> Self {
        Self::Raw(value)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Timestamp {
    fn from(value: DateTime<Tz>) -> Self {
        Self::Time(value.with_timezone(&Utc))
    }
}

/// A rich-content block attached to a [`crate::Message`].
///
/// Pure value type: accumulates fields through owned fluent setters and
/// serializes them with [`Attachment::to_payload`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attachment {
    color: Option<String>,
    text: Option<String>,
    timestamp: Option<String>,
    thumbnail_url: Option<String>,
    message_link: Option<String>,
    collapsed: Option<bool>,
    author_name: Option<String>,
    author_link: Option<String>,
    author_icon: Option<String>,
    title: Option<String>,
    title_link: Option<String>,
    title_link_download: Option<bool>,
    image_url: Option<String>,
    audio_url: Option<String>,
    video_url: Option<String>,
    fields: Option<Vec<Value>>,
}

impl Attachment {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an attachment from an initial configuration map.
    ///
    /// Keys map statically onto the setters below (both the setter spelling
    /// and the wire spelling are accepted, e.g. `thumbnail_url` and
    /// `thumb_url`). Unknown keys are ignored. A `ts`/`timestamp` value of any
    /// non-string JSON type fails with [`Error::InvalidTimestamp`].
    pub fn from_map(map: &Map<String, Value>) -> Result<Self> {
        let mut attachment = Self::default();
        for (key, value) in map {
            match (key.as_str(), value) {
                ("color", Value::String(v)) => attachment.color = Some(v.clone()),
                ("text", Value::String(v)) => attachment.text = Some(v.clone()),
                ("ts" | "timestamp", Value::String(v)) => attachment.timestamp = Some(v.clone()),
                ("ts" | "timestamp", other) => {
                    return Err(Error::InvalidTimestamp {
                        found: json_type_name(other).to_owned(),
                    });
                },
                ("thumb_url" | "thumbnail_url", Value::String(v)) => {
                    attachment.thumbnail_url = Some(v.clone());
                },
                ("message_link", Value::String(v)) => attachment.message_link = Some(v.clone()),
                ("collapsed", Value::Bool(v)) => attachment.collapsed = Some(*v),
                ("author_name", Value::String(v)) => attachment.author_name = Some(v.clone()),
                ("author_link", Value::String(v)) => attachment.author_link = Some(v.clone()),
                ("author_icon", Value::String(v)) => attachment.author_icon = Some(v.clone()),
                ("title", Value::String(v)) => attachment.title = Some(v.clone()),
                ("title_link", Value::String(v)) => attachment.title_link = Some(v.clone()),
                ("title_link_download", Value::Bool(v)) => {
                    attachment.title_link_download = Some(*v);
                },
                ("image_url", Value::String(v)) => attachment.image_url = Some(v.clone()),
                ("audio_url", Value::String(v)) => attachment.audio_url = Some(v.clone()),
                ("video_url", Value::String(v)) => attachment.video_url = Some(v.clone()),
                ("fields", Value::Array(v)) => attachment.fields = Some(v.clone()),
                _ => {},
            }
        }
        Ok(attachment)
    }

    /// Color of the strip on the left side of the attachment; any value
    /// background-css supports.
    #[must_use]
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Text for this attachment, distinct from the message's own text.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Time displayed next to the attachment text.
    ///
    /// Accepts a pre-formatted string or any `chrono::DateTime`; date-times
    /// are normalized to UTC with millisecond precision and a literal `Z`.
    #[must_use]
    pub fn timestamp(mut self, timestamp: impl Into<Timestamp>) -> Self {
        self.timestamp = Some(timestamp.into().into_wire());
        self
    }

    /// Small image displayed to the left of the attachment text.
    #[must_use]
    pub fn thumbnail_url(mut self, thumbnail_url: impl Into<String>) -> Self {
        self.thumbnail_url = Some(thumbnail_url.into());
        self
    }

    /// Makes the displayed time clickable, pointing at this link.
    #[must_use]
    pub fn message_link(mut self, message_link: impl Into<String>) -> Self {
        self.message_link = Some(message_link.into());
        self
    }

    /// Hides the image, audio, and video sections when `true`.
    #[must_use]
    pub fn collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = Some(collapsed);
        self
    }

    /// Set the whole author block in one call.
    ///
    /// Empty `link`/`icon` arguments leave those sub-fields unset.
    #[must_use]
    pub fn author(
        self,
        name: impl Into<String>,
        link: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        let link = link.into();
        let icon = icon.into();
        let mut attachment = self.author_name(name);
        if !link.is_empty() {
            attachment = attachment.author_link(link);
        }
        if !icon.is_empty() {
            attachment = attachment.author_icon(icon);
        }
        attachment
    }

    #[must_use]
    pub fn author_name(mut self, author_name: impl Into<String>) -> Self {
        self.author_name = Some(author_name.into());
        self
    }

    /// Makes the author name clickable, pointing at this link.
    #[must_use]
    pub fn author_link(mut self, author_link: impl Into<String>) -> Self {
        self.author_link = Some(author_link.into());
        self
    }

    /// Tiny icon displayed to the left of the author name.
    #[must_use]
    pub fn author_icon(mut self, author_icon: impl Into<String>) -> Self {
        self.author_icon = Some(author_icon.into());
        self
    }

    /// Title displayed under the author block.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Makes the title clickable, pointing at this link.
    #[must_use]
    pub fn title_link(mut self, title_link: impl Into<String>) -> Self {
        self.title_link = Some(title_link.into());
        self
    }

    /// Shows a download icon next to the title; clicking it saves the linked
    /// file.
    #[must_use]
    pub fn title_link_download(mut self, title_link_download: bool) -> Self {
        self.title_link_download = Some(title_link_download);
        self
    }

    /// Large image displayed in the attachment body.
    #[must_use]
    pub fn image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Audio file to play; supports what HTML audio supports.
    #[must_use]
    pub fn audio_url(mut self, audio_url: impl Into<String>) -> Self {
        self.audio_url = Some(audio_url.into());
        self
    }

    /// Video file to play; supports what HTML video supports.
    #[must_use]
    pub fn video_url(mut self, video_url: impl Into<String>) -> Self {
        self.video_url = Some(video_url.into());
        self
    }

    /// Attachment field objects (`{short, title, value}` records), passed
    /// through to the wire verbatim and in order.
    #[must_use]
    pub fn fields(mut self, fields: impl IntoIterator<Item = Value>) -> Self {
        self.fields = Some(fields.into_iter().collect());
        self
    }

    /// Sparse wire payload: only explicitly-set fields are emitted, under
    /// their Rocket.Chat key spellings.
    #[must_use]
    pub fn to_payload(&self) -> Map<String, Value> {
        let mut payload = Map::new();
        insert_string(&mut payload, "color", self.color.as_deref());
        insert_string(&mut payload, "text", self.text.as_deref());
        insert_string(&mut payload, "ts", self.timestamp.as_deref());
        insert_string(&mut payload, "thumb_url", self.thumbnail_url.as_deref());
        insert_string(&mut payload, "message_link", self.message_link.as_deref());
        if let Some(collapsed) = self.collapsed {
            payload.insert("collapsed".to_owned(), Value::Bool(collapsed));
        }
        insert_string(&mut payload, "author_name", self.author_name.as_deref());
        insert_string(&mut payload, "author_link", self.author_link.as_deref());
        insert_string(&mut payload, "author_icon", self.author_icon.as_deref());
        insert_string(&mut payload, "title", self.title.as_deref());
        insert_string(&mut payload, "title_link", self.title_link.as_deref());
        if let Some(download) = self.title_link_download {
            payload.insert("title_link_download".to_owned(), Value::Bool(download));
        }
        insert_string(&mut payload, "image_url", self.image_url.as_deref());
        insert_string(&mut payload, "audio_url", self.audio_url.as_deref());
        insert_string(&mut payload, "video_url", self.video_url.as_deref());
        if let Some(fields) = &self.fields
            && !fields.is_empty()
        {
            payload.insert("fields".to_owned(), Value::Array(fields.clone()));
        }
        payload
    }
}

/// Insert a string field only when it is set and non-empty.
pub(crate) fn insert_string(payload: &mut Map<String, Value>, key: &str, value: Option<&str>) {
    if let Some(value) = value
        && !value.is_empty()
    {
        payload.insert(key.to_owned(), Value::String(value.to_owned()));
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
