//! Shared codec double for unit tests.
//!
//! Wraps `serde_json` with observable options: pretty-printing for
//! stringify and a marker key injected on parse, so tests can tell
//! which option source reached the codec.

use serde_json::Value;

use crate::codec::Codec;
use crate::{Error, Result};

/// MIME identifier of the test codec.
pub const MIME_TYPE: &str = "application/x-test-ejson";

/// Stringify options for [`TestCodec`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringifyOptions {
    /// Emit pretty-printed output.
    pub pretty: bool,
}

impl StringifyOptions {
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

/// Parse options for [`TestCodec`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Marker inserted under `parsed_with` in parsed objects.
    pub tag: &'static str,
}

/// A minimal stand-in for an extended codec.
pub struct TestCodec;

impl Codec for TestCodec {
    type Value = Value;
    type StringifyOptions = StringifyOptions;
    type ParseOptions = ParseOptions;

    fn mime_type(&self) -> &'static str {
        MIME_TYPE
    }

    fn stringify(&self, value: &Value, options: Option<&StringifyOptions>) -> Result<String> {
        let pretty = options.is_some_and(|o| o.pretty);
        let out = if pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        out.map_err(|e| Error::stringify(e.to_string()))
    }

    fn parse(&self, text: &str, options: Option<&ParseOptions>) -> Result<Value> {
        let mut value: Value =
            serde_json::from_str(text).map_err(|e| Error::parse(e.to_string()))?;
        if let (Some(options), Some(object)) = (options, value.as_object_mut()) {
            object.insert(
                "parsed_with".to_string(),
                Value::String(options.tag.to_string()),
            );
        }
        Ok(value)
    }
}
