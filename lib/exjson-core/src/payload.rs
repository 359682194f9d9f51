//! Request/response body categories.
//!
//! A call's body has no fixed shape until it reaches the transform
//! chain, but it always falls into one of a closed set of categories.
//! The codec classifier switches on this tag: opaque categories are
//! never touched, only [`Payload::Structured`] values are candidates
//! for codec encoding.

use std::fmt;
use std::path::PathBuf;
use std::pin::Pin;

use bytes::Bytes;
use futures_core::Stream;

use crate::{Form, Result};

/// A streaming body: chunks of bytes arriving over time.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes>> + Send>>;

/// A call body, tagged by category.
///
/// Type parameter `V` is the codec's value model
/// ([`crate::Codec::Value`]).
pub enum Payload<V> {
    /// No body.
    Empty,
    /// Plain text.
    Text(String),
    /// Raw bytes: buffers, blobs, byte views.
    Bytes(Bytes),
    /// Multipart form data.
    Form(Form),
    /// URL-search-params style key/value pairs.
    UrlEncoded(Vec<(String, String)>),
    /// A file to be read at send time.
    File(PathBuf),
    /// A streaming body.
    Stream(ByteStream),
    /// A structured value, candidate for codec encoding.
    Structured(V),
}

impl<V> Payload<V> {
    /// Returns `true` for categories the codec never touches.
    ///
    /// These pass through the encoder untouched so the host client's own
    /// default encoding applies.
    #[must_use]
    pub const fn is_opaque(&self) -> bool {
        matches!(
            self,
            Self::Bytes(_) | Self::Form(_) | Self::UrlEncoded(_) | Self::File(_) | Self::Stream(_)
        )
    }

    /// Returns `true` if there is no body.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The category name, for logging.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Text(_) => "text",
            Self::Bytes(_) => "bytes",
            Self::Form(_) => "form",
            Self::UrlEncoded(_) => "url-encoded",
            Self::File(_) => "file",
            Self::Stream(_) => "stream",
            Self::Structured(_) => "structured",
        }
    }

    /// The structured value, if this is a [`Payload::Structured`] body.
    #[must_use]
    pub const fn as_structured(&self) -> Option<&V> {
        match self {
            Self::Structured(value) => Some(value),
            _ => None,
        }
    }

    /// The text content, if this is a [`Payload::Text`] body.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for Payload<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Empty"),
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Bytes(bytes) => f.debug_tuple("Bytes").field(&bytes.len()).finish(),
            Self::Form(form) => f.debug_tuple("Form").field(form).finish(),
            Self::UrlEncoded(pairs) => f.debug_tuple("UrlEncoded").field(pairs).finish(),
            Self::File(path) => f.debug_tuple("File").field(path).finish(),
            Self::Stream(_) => f.write_str("Stream(..)"),
            Self::Structured(value) => f.debug_tuple("Structured").field(value).finish(),
        }
    }
}

impl<V> From<String> for Payload<V> {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl<V> From<&str> for Payload<V> {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl<V> From<Bytes> for Payload<V> {
    fn from(bytes: Bytes) -> Self {
        Self::Bytes(bytes)
    }
}

impl<V> From<Form> for Payload<V> {
    fn from(form: Form) -> Self {
        Self::Form(form)
    }
}
