//! The extended-codec collaborator seam.
//!
//! This crate never implements a codec grammar itself. It negotiates
//! *when* a codec applies and routes per-call options to it; the codec
//! (its value model, text format, and MIME identifier) is supplied by
//! the caller through the [`Codec`] trait.

use std::fmt;

use crate::Result;

/// Value model an extended codec round-trips.
///
/// The classifier only needs one question answered: is this value a
/// composite (map/sequence) rather than a primitive or null? Primitives
/// are left to the host client's own defaults.
pub trait CodecValue: fmt::Debug {
    /// Returns `true` for composite values (objects, arrays).
    fn is_composite(&self) -> bool;
}

impl CodecValue for serde_json::Value {
    fn is_composite(&self) -> bool {
        matches!(self, Self::Object(_) | Self::Array(_))
    }
}

/// An extended JSON-compatible codec.
///
/// The codec owns its wire grammar, its MIME identifier, and the meaning
/// of its option records. Options are opaque to this crate: they are
/// routed per call (see [`crate::CallConfig`]) and handed to
/// [`stringify`](Self::stringify) / [`parse`](Self::parse) untouched.
/// Passing `None` means the codec applies its own defaults.
///
/// Both operations are synchronous and infallible-on-success: an error
/// fails the whole call (no retries, no recovery).
pub trait Codec: Send + Sync {
    /// Dynamic value type the codec encodes and decodes.
    type Value: CodecValue;
    /// Options accepted by [`stringify`](Self::stringify).
    type StringifyOptions: Clone + Send + Sync;
    /// Options accepted by [`parse`](Self::parse).
    type ParseOptions: Clone + Send + Sync;

    /// The codec's canonical MIME identifier (distinct from
    /// `application/json`).
    fn mime_type(&self) -> &'static str;

    /// Encode a value to codec text.
    fn stringify(
        &self,
        value: &Self::Value,
        options: Option<&Self::StringifyOptions>,
    ) -> Result<String>;

    /// Decode codec text back into a value.
    fn parse(&self, text: &str, options: Option<&Self::ParseOptions>) -> Result<Self::Value>;
}

impl<C: Codec> Codec for std::sync::Arc<C> {
    type Value = C::Value;
    type StringifyOptions = C::StringifyOptions;
    type ParseOptions = C::ParseOptions;

    fn mime_type(&self) -> &'static str {
        (**self).mime_type()
    }

    fn stringify(
        &self,
        value: &Self::Value,
        options: Option<&Self::StringifyOptions>,
    ) -> Result<String> {
        (**self).stringify(value, options)
    }

    fn parse(&self, text: &str, options: Option<&Self::ParseOptions>) -> Result<Self::Value> {
        (**self).parse(text, options)
    }
}

/// Per-call codec options supplied outside the interceptor channel.
///
/// This is the documented fallback path for direct (non-interceptor)
/// use of the transforms: set it on the call's configuration
/// ([`crate::CallConfig::codec_options`]) and the transforms will pick
/// it up whenever the private channel slot is empty. The two sources
/// are never merged; see [`crate::CallConfig::resolved_options`].
pub struct CodecOptions<C: Codec> {
    /// Options forwarded to [`Codec::stringify`].
    pub stringify: Option<C::StringifyOptions>,
    /// Options forwarded to [`Codec::parse`].
    pub parse: Option<C::ParseOptions>,
}

impl<C: Codec> CodecOptions<C> {
    /// Create an empty options bag.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            stringify: None,
            parse: None,
        }
    }

    /// Set the stringify options.
    #[must_use]
    pub fn with_stringify(mut self, options: C::StringifyOptions) -> Self {
        self.stringify = Some(options);
        self
    }

    /// Set the parse options.
    #[must_use]
    pub fn with_parse(mut self, options: C::ParseOptions) -> Self {
        self.parse = Some(options);
        self
    }
}

impl<C: Codec> Default for CodecOptions<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Codec> Clone for CodecOptions<C> {
    fn clone(&self) -> Self {
        Self {
            stringify: self.stringify.clone(),
            parse: self.parse.clone(),
        }
    }
}

// Options are opaque records understood only by the codec; Debug prints
// presence, not contents.
impl<C: Codec> fmt::Debug for CodecOptions<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodecOptions")
            .field("stringify", &self.stringify.is_some())
            .field("parse", &self.parse.is_some())
            .finish()
    }
}
