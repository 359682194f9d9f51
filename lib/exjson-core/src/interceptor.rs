//! Interceptor registration for the codec transforms.

use std::sync::Arc;

use crate::codec::Codec;
use crate::config::CallConfig;
use crate::transform::{request_transform, response_transform};

/// A configuration-mutating step applied to each call before dispatch.
///
/// Implemented for any `Fn(CallConfig) -> CallConfig` closure, so hosts
/// can register ad-hoc interceptors alongside [`CodecInterceptor`].
pub trait Intercept<C: Codec>: Send + Sync {
    /// Rewrite the call configuration.
    fn intercept(&self, config: CallConfig<C>) -> CallConfig<C>;
}

impl<C: Codec, F> Intercept<C> for F
where
    F: Fn(CallConfig<C>) -> CallConfig<C> + Send + Sync,
{
    fn intercept(&self, config: CallConfig<C>) -> CallConfig<C> {
        self(config)
    }
}

/// The codec interceptor factory.
///
/// Applying it to a [`CallConfig`] stores the configured codec options
/// into the config's private channel slots (overwriting whatever was
/// there) and prepends the request encoder and response decoder to the
/// two transform chains, so both run before the host client's own
/// defaults.
///
/// Applying the same interceptor to a config twice prepends a second
/// copy of each step; callers own the registration lifecycle.
pub struct CodecInterceptor<C: Codec> {
    codec: Arc<C>,
    stringify_options: Option<C::StringifyOptions>,
    parse_options: Option<C::ParseOptions>,
}

impl<C: Codec + 'static> CodecInterceptor<C> {
    /// Create an interceptor for the given codec, with no options (the
    /// codec's defaults apply).
    pub fn new(codec: impl Into<Arc<C>>) -> Self {
        Self {
            codec: codec.into(),
            stringify_options: None,
            parse_options: None,
        }
    }

    /// Set the stringify options carried to every intercepted call.
    #[must_use]
    pub fn with_stringify_options(mut self, options: C::StringifyOptions) -> Self {
        self.stringify_options = Some(options);
        self
    }

    /// Set the parse options carried to every intercepted call.
    #[must_use]
    pub fn with_parse_options(mut self, options: C::ParseOptions) -> Self {
        self.parse_options = Some(options);
        self
    }

    /// Apply the interceptor to a call configuration.
    #[must_use]
    pub fn apply(&self, mut config: CallConfig<C>) -> CallConfig<C> {
        config.set_channel_options(self.stringify_options.clone(), self.parse_options.clone());
        config.prepend_request_transform(request_transform(Arc::clone(&self.codec)));
        config.prepend_response_transform(response_transform(Arc::clone(&self.codec)));
        config
    }

    /// Consume into a plain `Fn(CallConfig) -> CallConfig` closure.
    pub fn into_fn(self) -> impl Fn(CallConfig<C>) -> CallConfig<C> {
        move |config| self.apply(config)
    }
}

impl<C: Codec + 'static> Intercept<C> for CodecInterceptor<C> {
    fn intercept(&self, config: CallConfig<C>) -> CallConfig<C> {
        self.apply(config)
    }
}
