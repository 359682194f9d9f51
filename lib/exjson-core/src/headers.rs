//! Header map helpers with case-insensitive name semantics.
//!
//! Headers flow through the transform chains as a plain
//! `HashMap<String, String>`, so the same header can arrive under any
//! casing (`Content-Type`, `content-type`, ...) depending on the HTTP
//! stack that produced it. Lookups here scan for the first
//! case-insensitive match instead of hardcoding particular spellings.

use std::collections::HashMap;

/// Header map carried by a [`crate::CallConfig`] and by responses.
pub type Headers = HashMap<String, String>;

/// Canonical spelling used when this crate writes the content type.
pub const CONTENT_TYPE: &str = "Content-Type";

/// Well-known content types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// JSON content type (`application/json`).
    Json,
    /// Form URL-encoded content type (`application/x-www-form-urlencoded`).
    FormUrlEncoded,
    /// Multipart form content type (`multipart/form-data`).
    MultipartFormData,
    /// Plain text content type (`text/plain`).
    PlainText,
    /// Binary content type (`application/octet-stream`).
    OctetStream,
}

impl ContentType {
    /// Get the MIME type string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::FormUrlEncoded => "application/x-www-form-urlencoded",
            Self::MultipartFormData => "multipart/form-data",
            Self::PlainText => "text/plain",
            Self::OctetStream => "application/octet-stream",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Look up a header value by case-insensitive name.
#[must_use]
pub fn get<'a>(headers: &'a Headers, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

/// The declared content type, whatever the key casing.
#[must_use]
pub fn content_type(headers: &Headers) -> Option<&str> {
    get(headers, CONTENT_TYPE)
}

/// Returns `true` if the declared content type case-insensitively equals
/// `mime`.
#[must_use]
pub fn content_type_is(headers: &Headers, mime: &str) -> bool {
    content_type(headers).is_some_and(|value| value.eq_ignore_ascii_case(mime))
}

/// Set the content type, overwriting any prior value.
///
/// All case-variant spellings of the name are removed first so the map
/// ends up with a single `Content-Type` entry.
pub fn set_content_type(headers: &mut Headers, value: impl Into<String>) {
    headers.retain(|key, _| !key.eq_ignore_ascii_case(CONTENT_TYPE));
    headers.insert(CONTENT_TYPE.to_string(), value.into());
}

/// Set the content type only when none is declared yet.
pub fn set_content_type_if_absent(headers: &mut Headers, value: impl Into<String>) {
    if content_type(headers).is_none() {
        headers.insert(CONTENT_TYPE.to_string(), value.into());
    }
}
