//! Transport tuning: timeouts and connection pooling.

use std::time::Duration;

/// Default bound on one exchange, from dispatch to the last body byte.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default bound on the TCP (and TLS) handshake.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Knobs read once by [`crate::HttpTransportBuilder::build`].
///
/// A database server is usually one host reached over and over, so the pool keeps a
/// generous number of idle connections to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// When it elapses the call fails with [`crate::Error::Timeout`]; the exchange is dropped,
    /// not retried.
    pub timeout: Duration,
    /// When it elapses the call fails with [`crate::Error::Connection`].
    pub connect_timeout: Duration,
    /// Idle connections kept per host.
    pub pool_idle_per_host: usize,
    /// Idle connections older than this are closed.
    pub pool_idle_timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            pool_idle_per_host: 32,
            pool_idle_timeout: Duration::from_secs(90),
        }
    }
}

impl TransportConfig {
    /// Start from the defaults.
    #[must_use]
    pub fn builder() -> TransportConfigBuilder {
        TransportConfigBuilder::default()
    }
}

/// Edits a [`TransportConfig`] that starts out as [`TransportConfig::default`].
#[derive(Debug, Clone, Default)]
pub struct TransportConfigBuilder {
    config: TransportConfig,
}

impl TransportConfigBuilder {
    /// Bound on a whole exchange.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Bound on the handshake.
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Idle connections kept per host; zero disables pooling.
    #[must_use]
    pub const fn pool_idle_per_host(mut self, count: usize) -> Self {
        self.config.pool_idle_per_host = count;
        self
    }

    /// Lifetime of an idle connection.
    #[must_use]
    pub const fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.config.pool_idle_timeout = timeout;
        self
    }

    /// The edited configuration.
    #[must_use]
    pub fn build(self) -> TransportConfig {
        self.config
    }
}
