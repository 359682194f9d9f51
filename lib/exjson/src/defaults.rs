//! The client's own default request encoding.
//!
//! This step sits at the back of every request chain built by
//! [`crate::Client::call`]. When the codec encoder (or any other
//! earlier step) declines a body, these defaults take over: structured
//! values become plain JSON, URL-encoded pairs become form text,
//! multipart forms are encoded with their boundary, and binary bodies
//! get a binary content type. Explicitly declared content types are
//! left alone (except for multipart, where the boundary must match the
//! encoded body).

use std::sync::Arc;

use exjson_core::{
    Codec, ContentType, Payload, RequestTransform, set_content_type, set_content_type_if_absent,
};

/// Build the default request-encoding step.
pub fn request_transform<C>() -> RequestTransform<C>
where
    C: Codec + 'static,
    C::Value: serde::Serialize,
{
    Arc::new(|_options, payload, headers| match payload {
        Payload::Structured(value) => {
            let text = serde_json::to_string(&value)?;
            set_content_type_if_absent(headers, ContentType::Json.as_str());
            Ok(Payload::Text(text))
        }
        Payload::UrlEncoded(pairs) => {
            let text = serde_html_form::to_string(&pairs)?;
            set_content_type_if_absent(headers, ContentType::FormUrlEncoded.as_str());
            Ok(Payload::Text(text))
        }
        Payload::Form(form) => {
            let (content_type, body) = form.into_body();
            set_content_type(headers, content_type);
            Ok(Payload::Bytes(body))
        }
        payload @ (Payload::Bytes(_) | Payload::File(_) | Payload::Stream(_)) => {
            set_content_type_if_absent(headers, ContentType::OctetStream.as_str());
            Ok(payload)
        }
        payload @ Payload::Text(_) => {
            set_content_type_if_absent(headers, ContentType::PlainText.as_str());
            Ok(payload)
        }
        Payload::Empty => Ok(Payload::Empty),
    })
}
