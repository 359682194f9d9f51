//! Prelude module for convenient imports.
//!
//! ```ignore
//! use exjson_core::prelude::*;
//! ```

pub use crate::{
    CallConfig, Codec, CodecInterceptor, CodecOptions, CodecValue, ContentType, Error, Form,
    Headers, Intercept, Method, Part, Payload, Response, Result, decode, encode,
};
