use thiserror::Error;

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Typed failures for building and delivering webhook notifications.
#[derive(Debug, Error)]
pub enum Error {
    /// No destination channel could be resolved from the message, the
    /// recipient route, or the configured default. Raised before any I/O.
    #[error("notification was not sent: channel identifier is missing")]
    MissingChannel,

    /// No access token could be resolved from the message or the
    /// configuration. Raised before any I/O.
    #[error("notification was not sent: access token is missing")]
    MissingToken,

    /// Rocket.Chat answered with a non-success HTTP status.
    #[error("rocket.chat responded with an error `{status} - {body}`")]
    Rejected { status: u16, body: String },

    /// The HTTP exchange itself failed (connectivity, timeout, encoding).
    #[error("communication with rocket.chat failed: {source}")]
    Transport {
        #[from]
        source: reqwest::Error,
    },

    /// An attachment timestamp built from a configuration map was neither a
    /// string nor a date-time.
    #[error("timestamp must be a string or date-time, {found} given")]
    InvalidTimestamp { found: String },
}
