//! Error types for exjson.

use derive_more::{Display, Error, From};

/// Main error type for exjson operations.
///
/// Codec failures (`Stringify`, `Parse`) are fatal for the call that
/// triggered them: they are never caught inside the transform chains and
/// propagate to the call site.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// The codec failed to stringify an eligible payload.
    #[display("codec stringify error: {_0}")]
    #[from(skip)]
    Stringify(#[error(not(source))] String),

    /// The codec failed to parse a response body.
    #[display("codec parse error: {_0}")]
    #[from(skip)]
    Parse(#[error(not(source))] String),

    /// A response body tagged with the codec content type was not UTF-8.
    #[display("response body is not valid UTF-8: {_0}")]
    #[from]
    NonUtf8Body(std::str::Utf8Error),

    /// Network/connection errors.
    #[display("connection error: {_0}")]
    #[from(skip)]
    Connection(#[error(not(source))] String),

    /// Request timeout.
    #[display("request timeout")]
    #[from(skip)]
    Timeout,

    /// Invalid request configuration.
    #[display("invalid request: {_0}")]
    #[from(skip)]
    InvalidRequest(#[error(not(source))] String),

    /// JSON serialization error (client default transform).
    #[display("JSON serialization error: {_0}")]
    #[from]
    JsonSerialization(serde_json::Error),

    /// Form URL-encoded serialization error.
    #[display("form serialization error: {_0}")]
    #[from]
    FormSerialization(serde_html_form::ser::Error),

    /// URL parsing error.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),

    /// I/O error while reading a file payload.
    #[display("I/O error: {_0}")]
    #[from]
    Io(std::io::Error),
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a codec stringify error.
    #[must_use]
    pub fn stringify(message: impl Into<String>) -> Self {
        Self::Stringify(message.into())
    }

    /// Create a codec parse error.
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Create a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Returns `true` if this is a codec error (stringify or parse).
    #[must_use]
    pub const fn is_codec(&self) -> bool {
        matches!(self, Self::Stringify(_) | Self::Parse(_))
    }

    /// Returns `true` if this is a timeout error.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Returns `true` if this is a connection error.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}
