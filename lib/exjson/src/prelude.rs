//! Prelude module for convenient imports.
//!
//! ```ignore
//! use exjson::prelude::*;
//! ```

pub use crate::{
    CallConfig, Client, ClientBuilder, ClientConfig, Codec, CodecInterceptor, CodecOptions,
    CodecValue, ContentType, Error, Form, Headers, Intercept, Method, Part, Payload, Response,
    Result,
};
