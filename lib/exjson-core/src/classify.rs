//! Payload eligibility for codec encoding.

use crate::codec::CodecValue;
use crate::headers::{self, ContentType, Headers};
use crate::payload::Payload;

/// Decide whether a request body should be codec-encoded.
///
/// Pure function of its inputs. The decision, in order:
///
/// 1. opaque categories (buffers, multipart forms, URL-encoded pairs,
///    files, streams) are never encoded;
/// 2. an explicit `multipart/form-data` or `application/json` content
///    type suppresses encoding, whatever the body shape, so callers who
///    declared their intent get the host client's defaults;
/// 3. composite structured values are eligible;
/// 4. everything else (text, primitives, no body) is not.
#[must_use]
pub fn is_eligible<V: CodecValue>(payload: &Payload<V>, headers: &Headers) -> bool {
    if payload.is_opaque() {
        return false;
    }

    if let Some(declared) = headers::content_type(headers) {
        let suppressed = declared.eq_ignore_ascii_case(ContentType::MultipartFormData.as_str())
            || declared.eq_ignore_ascii_case(ContentType::Json.as_str());
        if suppressed {
            return false;
        }
    }

    match payload {
        Payload::Structured(value) => value.is_composite(),
        _ => false,
    }
}
