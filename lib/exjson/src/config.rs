//! Timeout and pool settings for the HTTP client.
//!
//! These are the knobs [`crate::ClientBuilder`] threads into the
//! hyper-util connector and pool: a whole-exchange deadline, a connect
//! deadline, and the idle-connection policy. Codec behavior is not
//! configured here; that travels on the per-call
//! [`exjson_core::CallConfig`].

use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_POOL_IDLE_PER_HOST: usize = 32;
const DEFAULT_POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

/// Settings shared by every call a client makes.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Deadline for one exchange, from sending the request to
    /// collecting the full response body.
    pub timeout: Duration,
    /// Deadline for establishing the TCP connection.
    pub connect_timeout: Duration,
    /// How many idle connections the pool keeps per host.
    pub pool_idle_per_host: usize,
    /// How long an idle connection stays pooled before it is dropped.
    pub pool_idle_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            pool_idle_per_host: DEFAULT_POOL_IDLE_PER_HOST,
            pool_idle_timeout: DEFAULT_POOL_IDLE_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Start a builder with every knob at its default.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }
}

/// Builder for [`ClientConfig`]; unset knobs keep their defaults.
#[derive(Debug, Clone, Default)]
pub struct ClientConfigBuilder {
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    pool_idle_per_host: Option<usize>,
    pool_idle_timeout: Option<Duration>,
}

impl ClientConfigBuilder {
    /// Deadline for one whole exchange.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Deadline for establishing the TCP connection.
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Idle connections kept per host.
    #[must_use]
    pub fn pool_idle_per_host(mut self, count: usize) -> Self {
        self.pool_idle_per_host = Some(count);
        self
    }

    /// How long idle connections stay pooled.
    #[must_use]
    pub fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = Some(timeout);
        self
    }

    /// Resolve the settings, filling unset knobs from the defaults.
    #[must_use]
    pub fn build(self) -> ClientConfig {
        let mut config = ClientConfig::default();
        if let Some(timeout) = self.timeout {
            config.timeout = timeout;
        }
        if let Some(connect_timeout) = self.connect_timeout {
            config.connect_timeout = connect_timeout;
        }
        if let Some(count) = self.pool_idle_per_host {
            config.pool_idle_per_host = count;
        }
        if let Some(pool_idle_timeout) = self.pool_idle_timeout {
            config.pool_idle_timeout = pool_idle_timeout;
        }
        config
    }
}
