//! The codec request encoder and response decoder.
//!
//! Both are plain functions over a body, a header map, and the options
//! resolved for the call. [`request_transform`] and
//! [`response_transform`] wrap them as chain steps for a given codec.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::classify;
use crate::codec::Codec;
use crate::config::{RequestTransform, ResolvedOptions, ResponseTransform};
use crate::headers::{self, Headers};
use crate::payload::Payload;
use crate::{Error, Result};

/// Encode an eligible request body with the codec.
///
/// Ineligible bodies come back unchanged with the headers untouched, so
/// later steps in the chain (the host client's defaults) see exactly
/// the state they would have seen without the codec. For an eligible
/// body the content type is overwritten with the codec's MIME
/// identifier and the stringified text replaces the body; a stringify
/// failure fails the call.
pub fn encode<C: Codec>(
    codec: &C,
    options: ResolvedOptions<'_, C>,
    payload: Payload<C::Value>,
    headers: &mut Headers,
) -> Result<Payload<C::Value>> {
    if !classify::is_eligible(&payload, headers) {
        trace!(category = payload.category(), "payload not codec-eligible");
        return Ok(payload);
    }

    let Payload::Structured(value) = payload else {
        // is_eligible only accepts structured payloads.
        return Ok(payload);
    };

    debug!(mime = codec.mime_type(), "encoding request body");
    headers::set_content_type(headers, codec.mime_type());
    let text = codec.stringify(&value, options.stringify)?;
    Ok(Payload::Text(text))
}

/// Decode a response body tagged with the codec's content type.
///
/// Anything else, including an absent content type, passes through
/// unchanged; no assumption is made that such a body is even textual. A
/// matching body that is not UTF-8 text, or that the codec rejects,
/// fails the call.
pub fn decode<C: Codec>(
    codec: &C,
    options: ResolvedOptions<'_, C>,
    body: Payload<C::Value>,
    headers: &Headers,
) -> Result<Payload<C::Value>> {
    if !headers::content_type_is(headers, codec.mime_type()) {
        trace!("response content type is not the codec's, passing through");
        return Ok(body);
    }

    let value = match &body {
        Payload::Text(text) => codec.parse(text, options.parse)?,
        Payload::Bytes(bytes) => {
            let text = std::str::from_utf8(bytes).map_err(Error::NonUtf8Body)?;
            codec.parse(text, options.parse)?
        }
        _ => return Ok(body),
    };

    debug!(mime = codec.mime_type(), "decoded response body");
    Ok(Payload::Structured(value))
}

/// Build a request-chain step running [`encode`] with the given codec.
pub fn request_transform<C: Codec + 'static>(codec: Arc<C>) -> RequestTransform<C> {
    Arc::new(move |options, payload, headers| encode(codec.as_ref(), options, payload, headers))
}

/// Build a response-chain step running [`decode`] with the given codec.
pub fn response_transform<C: Codec + 'static>(codec: Arc<C>) -> ResponseTransform<C> {
    Arc::new(move |options, body, headers| decode(codec.as_ref(), options, body, headers))
}
