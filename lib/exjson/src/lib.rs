//! HTTP client with extended-JSON codec negotiation.
//!
//! This crate hosts the transform chains from [`exjson_core`] in a real
//! hyper-based client: register a [`CodecInterceptor`] and eligible
//! request bodies are encoded by the codec (with its MIME type on the
//! wire), while responses tagged with that MIME type are decoded back
//! into the codec's value model. Everything else falls through to the
//! client's own defaults.
//!
//! # Example
//!
//! ```ignore
//! use exjson::{Client, CodecInterceptor, Method, Payload};
//!
//! let client = Client::builder()
//!     .interceptor(CodecInterceptor::new(my_codec))
//!     .build();
//!
//! let config = client
//!     .call(Method::Post, url)
//!     .with_body(Payload::Structured(value));
//! let response = client.execute(config).await?;
//! ```

mod client;
mod config;
mod defaults;
pub mod prelude;
#[cfg(test)]
pub(crate) mod testing;

pub use client::{Client, ClientBuilder};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use defaults::request_transform as default_request_transform;

// Re-export core types
pub use exjson_core::{
    ByteStream, CONTENT_TYPE, CallConfig, Codec, CodecInterceptor, CodecOptions, CodecValue,
    ContentType, Error, Form, Headers, Intercept, Method, Part, Payload, RequestTransform,
    ResolvedOptions, Response, ResponseTransform, Result, classify, content_type,
    content_type_is, decode, encode, header_get, set_content_type, set_content_type_if_absent,
};

// Re-export crates callers need at the API boundary
pub use url;
