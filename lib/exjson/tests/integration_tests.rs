//! Integration tests for the codec-aware `Client` using wiremock.

mod common;

use std::collections::BTreeMap;
use std::time::Duration;

use assert2::{check, let_assert};
use bytes::Bytes;
use exjson::{Client, CodecInterceptor, CodecOptions, Form, Method, Payload};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

use common::{Json64, MIME_TYPE, ParseOptions, StringifyOptions, Value};

/// Echo the request body back under the request's own content type.
struct Echo;

impl Respond for Echo {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let content_type = request
            .headers
            .get("content-type")
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();

        ResponseTemplate::new(200)
            .insert_header("content-type", content_type.as_str())
            .set_body_bytes(request.body.clone())
    }
}

fn codec_client() -> Client<Json64> {
    Client::builder()
        .interceptor(CodecInterceptor::new(Json64))
        .build()
}

fn event(ms: i64) -> Value {
    Value::Object(BTreeMap::from([
        ("label".to_string(), Value::String("launch".to_string())),
        ("when".to_string(), Value::Date(ms)),
    ]))
}

fn endpoint(server: &MockServer, route: &str) -> url::Url {
    url::Url::parse(&format!("{}{route}", server.uri())).expect("url")
}

#[tokio::test]
async fn structured_body_round_trips_through_the_codec() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/echo"))
        .and(header("Content-Type", MIME_TYPE))
        .and(body_json(serde_json::json!({
            "label": "launch",
            "when": { "$date": 1_700_000_000_000_i64 }
        })))
        .respond_with(Echo)
        .mount(&mock_server)
        .await;

    let client = codec_client();
    let body = event(1_700_000_000_000);
    let config = client
        .call(Method::Post, endpoint(&mock_server, "/echo"))
        .with_body(Payload::Structured(body.clone()));

    let response = client.execute(config).await.expect("response");

    check!(response.is_success());
    let_assert!(Payload::Structured(decoded) = response.into_body());
    check!(decoded == body);
}

#[tokio::test]
async fn plain_json_response_stays_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"when": "2023-11-14"})),
        )
        .mount(&mock_server)
        .await;

    let client = codec_client();
    let response = client
        .get(&format!("{}/data", mock_server.uri()))
        .await
        .expect("response");

    // application/json is not the codec's MIME type; the decoder leaves
    // the body as unparsed text.
    let_assert!(Payload::Text(text) = response.into_body());
    check!(text.contains("2023-11-14"));
}

#[tokio::test]
async fn explicit_json_content_type_suppresses_the_codec() {
    let mock_server = MockServer::start().await;

    // The date arrives as a bare number: the codec declined, so the
    // client's default JSON encoding (lossy for dates) applied.
    Mock::given(method("POST"))
        .and(path("/events"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(serde_json::json!({
            "label": "launch",
            "when": 1_700_000_000_000_i64
        })))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let client = codec_client();
    let config = client
        .call(Method::Post, endpoint(&mock_server, "/events"))
        .with_header("Content-Type", "application/json")
        .with_body(Payload::Structured(event(1_700_000_000_000)));

    let response = client.execute(config).await.expect("response");
    check!(response.status() == 204);
}

#[tokio::test]
async fn bytes_body_gets_binary_content_type() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/blob"))
        .and(header("Content-Type", "application/octet-stream"))
        .respond_with(Echo)
        .mount(&mock_server)
        .await;

    let client = codec_client();
    let blob = Bytes::from_static(b"\x00\xff\x01");
    let config = client
        .call(Method::Post, endpoint(&mock_server, "/blob"))
        .with_body(Payload::Bytes(blob.clone()));

    let response = client.execute(config).await.expect("response");

    check!(response.is_success());
    // Not valid UTF-8, so the body stays raw.
    let_assert!(Payload::Bytes(bytes) = response.into_body());
    check!(bytes == blob);
}

#[tokio::test]
async fn multipart_form_passes_through_the_codec() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/upload"))
        .and(header("Content-Type", "multipart/form-data; boundary=BOUND"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&mock_server)
        .await;

    let client = codec_client();
    let form = Form::with_boundary("BOUND").text("name", "alice");
    let config = client
        .call(Method::Post, endpoint(&mock_server, "/upload"))
        .with_body(Payload::Form(form));

    let response = client.execute(config).await.expect("response");
    check!(response.status() == 201);
}

#[tokio::test]
async fn interceptor_options_override_the_per_call_bag() {
    let mock_server = MockServer::start().await;

    // The wire body must use the interceptor's date key, not the bag's.
    Mock::given(method("POST"))
        .and(path("/echo"))
        .and(body_json(serde_json::json!({
            "label": "launch",
            "when": { "$at": 1_700_000_000_000_i64 }
        })))
        .respond_with(Echo)
        .mount(&mock_server)
        .await;

    let interceptor = CodecInterceptor::new(Json64)
        .with_stringify_options(StringifyOptions {
            date_key: "$at".to_string(),
        })
        .with_parse_options(ParseOptions {
            date_key: "$at".to_string(),
        });
    let client = Client::builder().interceptor(interceptor).build();

    let body = event(1_700_000_000_000);
    let config = client
        .call(Method::Post, endpoint(&mock_server, "/echo"))
        .with_codec_options(
            CodecOptions::new()
                .with_stringify(StringifyOptions {
                    date_key: "$bag".to_string(),
                })
                .with_parse(ParseOptions {
                    date_key: "$bag".to_string(),
                }),
        )
        .with_body(Payload::Structured(body.clone()));

    let response = client.execute(config).await.expect("response");

    let_assert!(Payload::Structured(decoded) = response.into_body());
    check!(decoded == body);
}

#[tokio::test]
async fn concurrent_calls_keep_per_call_options_isolated() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/a"))
        .and(body_json(serde_json::json!({
            "label": "launch",
            "when": { "$a": 1_700_000_000_000_i64 }
        })))
        .respond_with(Echo)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/b"))
        .and(body_json(serde_json::json!({
            "label": "launch",
            "when": { "$b": 1_800_000_000_000_i64 }
        })))
        .respond_with(Echo)
        .mount(&mock_server)
        .await;

    let client = codec_client();

    let bag = |key: &str| {
        CodecOptions::new()
            .with_stringify(StringifyOptions {
                date_key: key.to_string(),
            })
            .with_parse(ParseOptions {
                date_key: key.to_string(),
            })
    };

    let config_a = client
        .call(Method::Post, endpoint(&mock_server, "/a"))
        .with_codec_options(bag("$a"))
        .with_body(Payload::Structured(event(1_700_000_000_000)));
    let config_b = client
        .call(Method::Post, endpoint(&mock_server, "/b"))
        .with_codec_options(bag("$b"))
        .with_body(Payload::Structured(event(1_800_000_000_000)));

    let (response_a, response_b) =
        tokio::join!(client.execute(config_a), client.execute(config_b));

    let_assert!(Payload::Structured(decoded_a) = response_a.expect("response a").into_body());
    check!(decoded_a == event(1_700_000_000_000));
    let_assert!(Payload::Structured(decoded_b) = response_b.expect("response b").into_body());
    check!(decoded_b == event(1_800_000_000_000));
}

#[tokio::test]
async fn concurrent_calls_keep_channel_slot_options_isolated() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/a"))
        .and(body_json(serde_json::json!({
            "label": "launch",
            "when": { "$a": 1_700_000_000_000_i64 }
        })))
        .respond_with(Echo)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/b"))
        .and(body_json(serde_json::json!({
            "label": "launch",
            "when": { "$b": 1_800_000_000_000_i64 }
        })))
        .respond_with(Echo)
        .mount(&mock_server)
        .await;

    // One interceptor per call, each writing different options into
    // its config's private channel slots.
    let client = Client::<Json64>::builder().build();

    let with_key = |key: &str| {
        CodecInterceptor::new(Json64)
            .with_stringify_options(StringifyOptions {
                date_key: key.to_string(),
            })
            .with_parse_options(ParseOptions {
                date_key: key.to_string(),
            })
    };

    let config_a = with_key("$a").apply(
        client
            .call(Method::Post, endpoint(&mock_server, "/a"))
            .with_body(Payload::Structured(event(1_700_000_000_000))),
    );
    let config_b = with_key("$b").apply(
        client
            .call(Method::Post, endpoint(&mock_server, "/b"))
            .with_body(Payload::Structured(event(1_800_000_000_000))),
    );

    let (response_a, response_b) =
        tokio::join!(client.execute(config_a), client.execute(config_b));

    let_assert!(Payload::Structured(decoded_a) = response_a.expect("response a").into_body());
    check!(decoded_a == event(1_700_000_000_000));
    let_assert!(Payload::Structured(decoded_b) = response_b.expect("response b").into_body());
    check!(decoded_b == event(1_800_000_000_000));
}

#[tokio::test]
async fn malformed_codec_response_fails_the_call() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("{not json64", MIME_TYPE),
        )
        .mount(&mock_server)
        .await;

    let client = codec_client();
    let err = client
        .get(&format!("{}/broken", mock_server.uri()))
        .await
        .expect_err("parse must fail");

    check!(err.is_codec());
}

#[tokio::test]
async fn plain_get_without_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(200).set_body_string("pong"))
        .mount(&mock_server)
        .await;

    let client = codec_client();
    let response = client
        .get(&format!("{}/ping", mock_server.uri()))
        .await
        .expect("response");

    check!(response.is_success());
    check!(response.body().as_text() == Some("pong"));
}

#[tokio::test]
async fn error_status_is_not_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&mock_server)
        .await;

    let client = codec_client();
    let response = client
        .get(&format!("{}/missing", mock_server.uri()))
        .await
        .expect("response");

    check!(response.is_client_error());
    check!(response.status() == 404);
}

#[tokio::test]
async fn timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&mock_server)
        .await;

    let client = Client::<Json64>::builder()
        .timeout(Duration::from_millis(100))
        .interceptor(CodecInterceptor::new(Json64))
        .build();

    let err = client
        .get(&format!("{}/slow", mock_server.uri()))
        .await
        .expect_err("must time out");

    check!(err.is_timeout());
}
