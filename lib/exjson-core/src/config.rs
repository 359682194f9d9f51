//! Per-call configuration and transform chains.
//!
//! A [`CallConfig`] is created by the host client for a single HTTP
//! call, threaded through every transform step of that call, and
//! discarded when the call completes. It is exclusively owned by the
//! in-flight call: nothing here is shared between calls, which is what
//! keeps per-call codec options from leaking across concurrent
//! requests.
//!
//! Codec options reach the transforms from two places:
//!
//! 1. the private *options channel* written by
//!    [`crate::CodecInterceptor`], which never shows up in `Debug`
//!    output or serialized form;
//! 2. the public [`CallConfig::codec_options`] fallback bag, for direct
//!    (non-interceptor) use of the transforms.
//!
//! The channel slot wins; the two sources are never merged.

use std::fmt;
use std::sync::Arc;

use url::Url;

use crate::codec::{Codec, CodecOptions};
use crate::headers::Headers;
use crate::payload::Payload;
use crate::response::Response;
use crate::{Method, Result};

/// A request transform step.
///
/// Steps run in chain order, each receiving the body produced by the
/// previous step and a mutable view of the request headers. The options
/// argument replaces the implicit config binding of interceptor-style
/// HTTP clients: it carries exactly the codec options resolved for this
/// call.
pub type RequestTransform<C> = Arc<
    dyn for<'a> Fn(
            ResolvedOptions<'a, C>,
            Payload<<C as Codec>::Value>,
            &mut Headers,
        ) -> Result<Payload<<C as Codec>::Value>>
        + Send
        + Sync,
>;

/// A response transform step.
///
/// Same shape as [`RequestTransform`], but response headers are
/// read-only once the response has arrived.
pub type ResponseTransform<C> = Arc<
    dyn for<'a> Fn(
            ResolvedOptions<'a, C>,
            Payload<<C as Codec>::Value>,
            &Headers,
        ) -> Result<Payload<<C as Codec>::Value>>
        + Send
        + Sync,
>;

/// Codec options resolved for one call, borrowed from its
/// [`CallConfig`].
///
/// `None` in a slot means the codec applies its own defaults.
pub struct ResolvedOptions<'a, C: Codec> {
    /// Options for [`Codec::stringify`].
    pub stringify: Option<&'a C::StringifyOptions>,
    /// Options for [`Codec::parse`].
    pub parse: Option<&'a C::ParseOptions>,
}

impl<C: Codec> Clone for ResolvedOptions<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: Codec> Copy for ResolvedOptions<'_, C> {}

/// Private slot pair for interceptor-supplied codec options.
///
/// The original symbol-keyed slots become plain private fields here:
/// invisible to `Debug`, unique per `CallConfig` instance.
struct OptionsChannel<C: Codec> {
    stringify: Option<C::StringifyOptions>,
    parse: Option<C::ParseOptions>,
}

impl<C: Codec> Default for OptionsChannel<C> {
    fn default() -> Self {
        Self {
            stringify: None,
            parse: None,
        }
    }
}

/// The mutable configuration object for a single HTTP call.
pub struct CallConfig<C: Codec> {
    method: Method,
    url: Url,
    headers: Headers,
    body: Payload<C::Value>,
    request_chain: Vec<RequestTransform<C>>,
    response_chain: Vec<ResponseTransform<C>>,
    channel: OptionsChannel<C>,
    /// Fallback codec options for direct (non-interceptor) use.
    pub codec_options: Option<CodecOptions<C>>,
}

impl<C: Codec> CallConfig<C> {
    /// Create a config with no body, no headers, and empty transform
    /// chains.
    #[must_use]
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: Headers::new(),
            body: Payload::Empty,
            request_chain: Vec::new(),
            response_chain: Vec::new(),
            channel: OptionsChannel::default(),
            codec_options: None,
        }
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Request URL.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Request headers.
    #[must_use]
    pub const fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Mutable access to headers.
    pub const fn headers_mut(&mut self) -> &mut Headers {
        &mut self.headers
    }

    /// Request body.
    #[must_use]
    pub const fn body(&self) -> &Payload<C::Value> {
        &self.body
    }

    /// Consume into the body.
    #[must_use]
    pub fn into_body(self) -> Payload<C::Value> {
        self.body
    }

    /// Take the body out, leaving [`Payload::Empty`] behind.
    ///
    /// Used by the host client when the body goes on the wire but the
    /// config is still needed to run the response chain.
    #[must_use]
    pub fn take_body(&mut self) -> Payload<C::Value> {
        std::mem::replace(&mut self.body, Payload::Empty)
    }

    /// Set a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set the request body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Payload<C::Value>>) -> Self {
        self.body = body.into();
        self
    }

    /// Set the fallback codec options bag.
    #[must_use]
    pub fn with_codec_options(mut self, options: CodecOptions<C>) -> Self {
        self.codec_options = Some(options);
        self
    }

    /// Append a request transform (runs after the existing steps).
    #[must_use]
    pub fn with_request_transform(mut self, transform: RequestTransform<C>) -> Self {
        self.request_chain.push(transform);
        self
    }

    /// Append a response transform (runs after the existing steps).
    #[must_use]
    pub fn with_response_transform(mut self, transform: ResponseTransform<C>) -> Self {
        self.response_chain.push(transform);
        self
    }

    /// Insert a request transform at the front of the chain.
    ///
    /// A step that declines (returns its input unchanged) lets the
    /// steps behind it, typically the host client's defaults, still
    /// run.
    pub fn prepend_request_transform(&mut self, transform: RequestTransform<C>) {
        self.request_chain.insert(0, transform);
    }

    /// Insert a response transform at the front of the chain.
    pub fn prepend_response_transform(&mut self, transform: ResponseTransform<C>) {
        self.response_chain.insert(0, transform);
    }

    /// Number of request transform steps.
    #[must_use]
    pub fn request_chain_len(&self) -> usize {
        self.request_chain.len()
    }

    /// Number of response transform steps.
    #[must_use]
    pub fn response_chain_len(&self) -> usize {
        self.response_chain.len()
    }

    /// Overwrite the private channel slots.
    ///
    /// `None` clears a slot; the previous contents are always replaced.
    pub(crate) fn set_channel_options(
        &mut self,
        stringify: Option<C::StringifyOptions>,
        parse: Option<C::ParseOptions>,
    ) {
        self.channel.stringify = stringify;
        self.channel.parse = parse;
    }

    /// Resolve the codec options for this call.
    ///
    /// Precedence per slot: channel first, else the fallback bag, else
    /// `None` (codec defaults). The sources are never merged: whichever
    /// one supplies a slot supplies it wholesale.
    #[must_use]
    pub fn resolved_options(&self) -> ResolvedOptions<'_, C> {
        resolve(&self.channel, self.codec_options.as_ref())
    }

    /// Fold the body through the request transform chain, in order.
    ///
    /// Each step may rewrite the body and mutate the request headers.
    /// The first error aborts the chain and fails the call; the body is
    /// left empty in that case.
    pub fn run_request_chain(&mut self) -> Result<()> {
        let chain = std::mem::take(&mut self.request_chain);
        let outcome = {
            let Self {
                headers,
                body,
                channel,
                codec_options,
                ..
            } = self;
            let options = resolve(channel, codec_options.as_ref());

            let mut data = std::mem::replace(body, Payload::Empty);
            let mut result = Ok(());
            for step in &chain {
                match step(options, data, headers) {
                    Ok(next) => data = next,
                    Err(err) => {
                        result = Err(err);
                        data = Payload::Empty;
                        break;
                    }
                }
            }
            *body = data;
            result
        };
        self.request_chain = chain;
        outcome
    }

    /// Fold a response body through the response transform chain, in
    /// order.
    pub fn run_response_chain(
        &self,
        response: Response<Payload<C::Value>>,
    ) -> Result<Response<Payload<C::Value>>> {
        let options = self.resolved_options();
        let (status, headers, mut body) = response.into_parts();
        for step in &self.response_chain {
            body = step(options, body, &headers)?;
        }
        Ok(Response::new(status, headers, body))
    }
}

fn resolve<'a, C: Codec>(
    channel: &'a OptionsChannel<C>,
    fallback: Option<&'a CodecOptions<C>>,
) -> ResolvedOptions<'a, C> {
    ResolvedOptions {
        stringify: channel
            .stringify
            .as_ref()
            .or_else(|| fallback.and_then(|bag| bag.stringify.as_ref())),
        parse: channel
            .parse
            .as_ref()
            .or_else(|| fallback.and_then(|bag| bag.parse.as_ref())),
    }
}

// The channel is deliberately absent: interceptor-supplied options must
// not surface in logs.
impl<C: Codec> fmt::Debug for CallConfig<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallConfig")
            .field("method", &self.method)
            .field("url", &self.url.as_str())
            .field("headers", &self.headers)
            .field("body", &self.body)
            .field("codec_options", &self.codec_options)
            .field("request_chain", &self.request_chain.len())
            .field("response_chain", &self.response_chain.len())
            .finish_non_exhaustive()
    }
}
