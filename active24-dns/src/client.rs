//! Active24 API client and its builder.

use std::sync::Arc;
use std::time::Duration;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::RequestExecutor;
use crate::logging::Diagnostics;
use crate::records::ServiceRecords;
use crate::transport::{ReqwestTransport, Transport};

/// Entry point to the Active24 REST API.
///
/// Holds the immutable configuration and the connection pool. Cloning is cheap
/// and every clone shares both, so one client can serve concurrent tasks.
#[derive(Clone)]
pub struct Client {
    executor: Arc<RequestExecutor>,
}

/// [`Client`] Builder
pub struct ClientBuilder {
    config: ClientConfig,
    transport: Option<Arc<dyn Transport>>,
    diagnostics: Diagnostics,
}

impl ClientBuilder {
    fn new(config: ClientConfig) -> Self {
        Self {
            config,
            transport: None,
            diagnostics: Diagnostics::global(),
        }
    }

    /// Builder seeded from the `ACTIVE24_*` environment variables.
    ///
    /// # Errors
    ///
    /// [`ApiError::Config`](crate::ApiError::Config) naming the missing or
    /// malformed variable.
    pub fn from_env() -> Result<Self> {
        ClientConfig::from_env().map(Self::new)
    }

    /// Override the API base URL (default `https://rest.active24.cz`).
    #[must_use]
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.set_endpoint(endpoint.into());
        self
    }

    /// Override the per-request timeout (default 10 s).
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.set_timeout(timeout);
        self
    }

    /// Maximum pages one listing call may fetch (default 100, at least 1).
    #[must_use]
    pub fn max_pages(mut self, max_pages: usize) -> Self {
        self.config.set_max_pages(max_pages);
        self
    }

    /// Use a custom transport instead of the built-in `reqwest` one.
    ///
    /// The configured timeout is then the transport's responsibility.
    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Send diagnostics to `diagnostics` instead of the global `log` logger.
    #[must_use]
    pub fn diagnostics(mut self, diagnostics: Diagnostics) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Validate the settings and create the client.
    ///
    /// # Errors
    ///
    /// [`ApiError::Config`](crate::ApiError::Config) when the endpoint is not an
    /// absolute `http`/`https` URL or the HTTP client cannot be initialised.
    pub fn build(self) -> Result<Client> {
        let config = self.config.validated()?;
        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(config.timeout())?),
        };
        Ok(Client {
            executor: Arc::new(RequestExecutor::new(
                Arc::new(config),
                transport,
                self.diagnostics,
            )),
        })
    }
}

impl Client {
    /// Client with default endpoint, timeout and page limit.
    ///
    /// # Errors
    ///
    /// See [`ClientBuilder::build`].
    pub fn new(auth_key: impl Into<String>, auth_secret: impl Into<String>) -> Result<Self> {
        Self::builder(auth_key, auth_secret).build()
    }

    /// Builder for a client with custom endpoint, timeout, page limit or transport.
    pub fn builder(auth_key: impl Into<String>, auth_secret: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(ClientConfig::new(auth_key, auth_secret))
    }

    /// Client configured from the `ACTIVE24_*` environment variables.
    ///
    /// # Errors
    ///
    /// See [`ClientBuilder::from_env`] and [`ClientBuilder::build`].
    pub fn from_env() -> Result<Self> {
        ClientBuilder::from_env()?.build()
    }

    /// Record operations for the service (domain) `service_id`.
    pub fn dns(&self, service_id: u64) -> ServiceRecords {
        ServiceRecords::new(Arc::clone(&self.executor), service_id)
    }

    /// The settings this client was built with.
    pub fn config(&self) -> &ClientConfig {
        self.executor.config()
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("config", self.executor.config())
            .field("diagnostics", self.executor.diagnostics())
            .finish_non_exhaustive()
    }
}

impl std::fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("config", &self.config)
            .field("custom_transport", &self.transport.is_some())
            .field("diagnostics", &self.diagnostics)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_ENDPOINT, DEFAULT_MAX_PAGES, DEFAULT_TIMEOUT};
    use crate::error::ApiError;

    #[test]
    fn new_uses_defaults() {
        let res = Client::new("key", "secret");
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(client) = res else {
            return;
        };
        assert_eq!(client.config().endpoint(), DEFAULT_ENDPOINT);
        assert_eq!(client.config().timeout(), DEFAULT_TIMEOUT);
        assert_eq!(client.config().max_pages(), DEFAULT_MAX_PAGES);
    }

    #[test]
    fn builder_overrides() {
        let res = Client::builder("key", "secret")
            .endpoint("http://127.0.0.1:8080/")
            .timeout(Duration::from_secs(3))
            .max_pages(7)
            .build();
        let Ok(client) = res else {
            return;
        };
        assert_eq!(client.config().endpoint(), "http://127.0.0.1:8080");
        assert_eq!(client.config().timeout(), Duration::from_secs(3));
        assert_eq!(client.config().max_pages(), 7);
    }

    #[test]
    fn build_rejects_bad_endpoint() {
        let res = Client::builder("key", "secret").endpoint("rest.active24.cz").build();
        assert!(
            matches!(&res, Err(ApiError::Config { key, .. }) if key == "endpoint"),
            "unexpected result: {res:?}"
        );
    }

    #[test]
    fn dns_scopes_service() {
        let Ok(client) = Client::new("key", "secret") else {
            return;
        };
        assert_eq!(client.dns(12345).service_id(), 12345);
    }

    #[test]
    fn debug_never_prints_secret() {
        let Ok(client) = Client::new("key", "very-secret") else {
            return;
        };
        assert!(!format!("{client:?}").contains("very-secret"));
        let builder = Client::builder("key", "very-secret");
        assert!(!format!("{builder:?}").contains("very-secret"));
    }
}
