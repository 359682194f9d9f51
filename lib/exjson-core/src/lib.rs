//! Extended-JSON codec negotiation for HTTP client transform chains.
//!
//! An *extended codec* is a JSON-compatible serialization format that
//! round-trips richer value types than plain JSON, identified by its
//! own MIME type. This crate decides when such a codec applies to a
//! request body, performs the encode/decode transforms, and routes
//! per-call codec options without leaking them across concurrent calls:
//!
//! - [`classify::is_eligible`] - the payload classifier
//! - [`encode`] / [`decode`] - the request encoder and response decoder
//! - [`CallConfig`] - the per-call configuration carrying headers,
//!   transform chains, and the private options channel
//! - [`CodecInterceptor`] - the factory that wires the transforms into
//!   a call
//!
//! The codec itself is a collaborator supplied through the [`Codec`]
//! trait; this crate implements no codec grammar.
//!
//! # Example
//!
//! ```ignore
//! use exjson_core::{CallConfig, CodecInterceptor, Method, Payload};
//!
//! let interceptor = CodecInterceptor::new(my_codec);
//! let mut config = interceptor.apply(
//!     CallConfig::new(Method::Post, url).with_body(Payload::Structured(value)),
//! );
//! config.run_request_chain()?;
//! // config now carries the codec MIME type and the stringified body
//! ```

pub mod classify;
mod codec;
mod config;
mod error;
mod headers;
mod interceptor;
mod method;
mod multipart;
mod payload;
pub mod prelude;
mod response;
#[cfg(test)]
pub(crate) mod testing;
mod transform;

pub use codec::{Codec, CodecOptions, CodecValue};
pub use config::{CallConfig, RequestTransform, ResolvedOptions, ResponseTransform};
pub use error::{Error, Result};
pub use headers::{
    CONTENT_TYPE, ContentType, Headers, content_type, content_type_is, get as header_get,
    set_content_type, set_content_type_if_absent,
};
pub use interceptor::{CodecInterceptor, Intercept};
pub use method::Method;
pub use multipart::{Form, Part};
pub use payload::{ByteStream, Payload};
pub use response::Response;
pub use transform::{decode, encode, request_transform, response_transform};
