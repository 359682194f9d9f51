//! HTTP client implementation using hyper-util.
//!
//! The client owns the connection pool and the interceptor list. Each
//! call gets a fresh [`CallConfig`] so nothing per-call is shared:
//! interceptors rewrite the config before dispatch, the request chain
//! encodes the body, the wire exchange runs under the configured
//! timeout, and the response chain decodes the result.

use std::sync::Arc;
use std::time::{Duration, Instant};

use bytes::Bytes;
use exjson_core::{
    CallConfig, Codec, Error, Headers, Intercept, Method, Payload, Response, Result,
};
use futures_util::StreamExt;
use http_body_util::{BodyExt, Full};
use hyper_util::{
    client::legacy::{Client as HyperClient, connect::HttpConnector},
    rt::TokioExecutor,
};
use tracing::debug;
use url::Url;

use crate::config::{ClientConfig, ClientConfigBuilder};
use crate::defaults;

/// HTTP client with connection pooling and codec-aware transform
/// chains.
///
/// # Example
///
/// ```ignore
/// use exjson::{Client, CodecInterceptor, Method, Payload};
///
/// let client = Client::builder()
///     .interceptor(CodecInterceptor::new(my_codec))
///     .build();
///
/// let config = client
///     .call(Method::Post, url)
///     .with_body(Payload::Structured(value));
/// let response = client.execute(config).await?;
/// ```
pub struct Client<C: Codec> {
    inner: HyperClient<HttpConnector, Full<Bytes>>,
    config: ClientConfig,
    interceptors: Vec<Arc<dyn Intercept<C>>>,
}

impl<C: Codec> Clone for Client<C> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            config: self.config.clone(),
            interceptors: self.interceptors.clone(),
        }
    }
}

impl<C: Codec> std::fmt::Debug for Client<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .field("interceptors", &self.interceptors.len())
            .finish_non_exhaustive()
    }
}

impl<C: Codec + 'static> Client<C> {
    /// Create a new client with default configuration and no
    /// interceptors.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a new client builder.
    #[must_use]
    pub fn builder() -> ClientBuilder<C> {
        ClientBuilder::default()
    }

    /// Get the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Create the configuration for a single call.
    ///
    /// The returned config carries the client's default body encoding
    /// as its only request transform; interceptor-supplied transforms
    /// are prepended at [`execute`](Self::execute) time and therefore
    /// run first.
    #[must_use]
    pub fn call(&self, method: Method, url: Url) -> CallConfig<C>
    where
        C::Value: serde::Serialize,
    {
        CallConfig::new(method, url).with_request_transform(defaults::request_transform())
    }

    /// Send a GET request to the given URL.
    pub async fn get(&self, url: &str) -> Result<Response<Payload<C::Value>>>
    where
        C::Value: serde::Serialize,
    {
        let url = Url::parse(url)?;
        self.execute(self.call(Method::Get, url)).await
    }

    /// Send a POST request with the given body.
    pub async fn post(
        &self,
        url: &str,
        body: impl Into<Payload<C::Value>>,
    ) -> Result<Response<Payload<C::Value>>>
    where
        C::Value: serde::Serialize,
    {
        let url = Url::parse(url)?;
        self.execute(self.call(Method::Post, url).with_body(body))
            .await
    }

    /// Execute a configured call.
    ///
    /// Interceptors run first and may rewrite the whole config. The
    /// request chain then encodes the body; a chain error fails the
    /// call before anything goes on the wire. Response transforms run
    /// on the collected response body, with errors equally fatal.
    pub async fn execute(
        &self,
        mut config: CallConfig<C>,
    ) -> Result<Response<Payload<C::Value>>> {
        for interceptor in &self.interceptors {
            config = interceptor.intercept(config);
        }
        config.run_request_chain()?;

        let start = Instant::now();
        let response = self.exchange(&mut config).await?;
        debug!(
            method = %config.method(),
            url = %config.url(),
            status = response.status(),
            elapsed = ?start.elapsed(),
            "request complete"
        );

        config.run_response_chain(response)
    }

    async fn exchange(
        &self,
        config: &mut CallConfig<C>,
    ) -> Result<Response<Payload<C::Value>>> {
        let bytes = wire_body(config.take_body()).await?;

        let mut builder = http::Request::builder()
            .method(http::Method::from(config.method()))
            .uri(config.url().as_str());
        for (name, value) in config.headers() {
            builder = builder.header(name.as_str(), value.as_str());
        }
        let request = builder
            .body(Full::new(bytes))
            .map_err(|e| Error::invalid_request(e.to_string()))?;

        let response = tokio::time::timeout(self.config.timeout, self.inner.request(request))
            .await
            .map_err(|_| Error::Timeout)?
            .map_err(map_hyper_error)?;

        let status = response.status().as_u16();
        let headers = extract_headers(response.headers());
        let bytes = response
            .into_body()
            .collect()
            .await
            .map_err(|e| Error::connection(e.to_string()))?
            .to_bytes();

        Ok(Response::new(status, headers, received_body(bytes)))
    }
}

impl<C: Codec + 'static> Default for Client<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Buffer a request body for the wire.
///
/// Files are read here, streams are collected, and leftover URL-encoded
/// pairs or forms are serialized. A structured value reaching this
/// point means no transform in the chain encoded it, which is a
/// configuration error, not something to silently stringify.
async fn wire_body<V>(payload: Payload<V>) -> Result<Bytes> {
    match payload {
        Payload::Empty => Ok(Bytes::new()),
        Payload::Text(text) => Ok(Bytes::from(text)),
        Payload::Bytes(bytes) => Ok(bytes),
        Payload::File(path) => Ok(Bytes::from(tokio::fs::read(path).await?)),
        Payload::Stream(mut stream) => {
            let mut collected = Vec::new();
            while let Some(chunk) = stream.next().await {
                collected.extend_from_slice(&chunk?);
            }
            Ok(Bytes::from(collected))
        }
        Payload::UrlEncoded(pairs) => Ok(Bytes::from(serde_html_form::to_string(&pairs)?)),
        Payload::Form(form) => Ok(form.into_body().1),
        Payload::Structured(_) => Err(Error::invalid_request(
            "structured body was not encoded by any transform",
        )),
    }
}

/// Categorize a collected response body.
///
/// UTF-8 bodies arrive in the response chain as text so the codec
/// decoder can parse them; anything else stays raw bytes.
fn received_body<V>(bytes: Bytes) -> Payload<V> {
    if bytes.is_empty() {
        return Payload::Empty;
    }
    match std::str::from_utf8(&bytes) {
        Ok(text) => Payload::Text(text.to_owned()),
        Err(_) => Payload::Bytes(bytes),
    }
}

/// Extract response headers as a [`Headers`] map.
fn extract_headers(headers: &http::HeaderMap) -> Headers {
    headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.to_string(), v.to_string()))
        })
        .collect()
}

#[allow(clippy::needless_pass_by_value)]
fn map_hyper_error(err: hyper_util::client::legacy::Error) -> Error {
    Error::connection(err.to_string())
}

/// Builder for [`Client`].
pub struct ClientBuilder<C: Codec> {
    config: ClientConfigBuilder,
    interceptors: Vec<Arc<dyn Intercept<C>>>,
}

impl<C: Codec> Default for ClientBuilder<C> {
    fn default() -> Self {
        Self {
            config: ClientConfigBuilder::default(),
            interceptors: Vec::new(),
        }
    }
}

impl<C: Codec> std::fmt::Debug for ClientBuilder<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("config", &self.config)
            .field("interceptors", &self.interceptors.len())
            .finish()
    }
}

impl<C: Codec + 'static> ClientBuilder<C> {
    /// Set the request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.timeout(timeout);
        self
    }

    /// Set the connection timeout.
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.connect_timeout(timeout);
        self
    }

    /// Set the maximum idle connections per host.
    #[must_use]
    pub fn pool_idle_per_host(mut self, count: usize) -> Self {
        self.config = self.config.pool_idle_per_host(count);
        self
    }

    /// Set the idle connection timeout.
    #[must_use]
    pub fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.pool_idle_timeout(timeout);
        self
    }

    /// Register an interceptor, applied to every call in registration
    /// order.
    ///
    /// Registering the same codec interceptor twice prepends its
    /// transforms twice; the builder does not deduplicate.
    #[must_use]
    pub fn interceptor(mut self, interceptor: impl Intercept<C> + 'static) -> Self {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    /// Build the client.
    #[must_use]
    pub fn build(self) -> Client<C> {
        let config = self.config.build();

        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(config.connect_timeout));

        let inner = HyperClient::builder(TokioExecutor::new())
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_idle_per_host)
            .build(connector);

        Client {
            inner,
            config,
            interceptors: self.interceptors,
        }
    }
}
