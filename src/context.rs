/// Application context and dependency injection
use crate::{
    backend::{AuthBackend, YggdrasilClient},
    config::ProxyConfig,
    error::ProxyResult,
    identity::{LoginVerifier, OwnerResolver, OwnershipCache},
};
use std::sync::Arc;

/// Application context holding all shared services
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<ProxyConfig>,
    pub resolver: Arc<OwnerResolver>,
    pub verifier: Arc<LoginVerifier>,
}

impl AppContext {
    /// Create a new application context from configuration
    ///
    /// Builds the process-wide outbound HTTP client; it is released when the
    /// last clone of the context is dropped.
    pub fn new(config: ProxyConfig) -> ProxyResult<Self> {
        config.validate()?;

        let backend: Arc<dyn AuthBackend> = Arc::new(YggdrasilClient::new(&config)?);
        Ok(Self::with_backend(config, backend))
    }

    /// Create a context around an existing backend
    pub fn with_backend(config: ProxyConfig, backend: Arc<dyn AuthBackend>) -> Self {
        let cache = OwnershipCache::new(config.max_cache_age());
        let resolver = Arc::new(OwnerResolver::new(
            backend.clone(),
            cache,
            config.servers.clone(),
        ));
        let verifier = Arc::new(LoginVerifier::new(backend, resolver.clone()));

        Self {
            config: Arc::new(config),
            resolver,
            verifier,
        }
    }

    /// Number of configured servers across all tiers
    pub fn server_count(&self) -> usize {
        self.config.servers.iter().map(Vec::len).sum()
    }
}
