//! Shared codec double for unit tests.
//!
//! A plain JSON pass-through codec over `serde_json::Value`. Transforms
//! under test here never call into the codec itself; they only need a
//! concrete `Codec` type to instantiate against.

use exjson_core::{Codec, Error, Result};
use serde_json::Value;

/// MIME identifier of the test codec.
pub const MIME_TYPE: &str = "application/x-plain-test";

/// A minimal stand-in codec with no options of interest.
pub struct PlainCodec;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoOptions;

impl Codec for PlainCodec {
    type Value = Value;
    type StringifyOptions = NoOptions;
    type ParseOptions = NoOptions;

    fn mime_type(&self) -> &'static str {
        MIME_TYPE
    }

    fn stringify(&self, value: &Value, _options: Option<&NoOptions>) -> Result<String> {
        serde_json::to_string(value).map_err(|e| Error::stringify(e.to_string()))
    }

    fn parse(&self, text: &str, _options: Option<&NoOptions>) -> Result<Value> {
        serde_json::from_str(text).map_err(|e| Error::parse(e.to_string()))
    }
}
