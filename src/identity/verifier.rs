/// Login Verifier - re-validates a session against the owning servers
use crate::{
    backend::{AuthBackend, LoginResult, SessionQuery},
    error::{ProxyError, ProxyResult},
    identity::OwnerResolver,
};
use futures::future::join_all;
use std::sync::Arc;
use tracing::info;

pub struct LoginVerifier {
    backend: Arc<dyn AuthBackend>,
    resolver: Arc<OwnerResolver>,
}

impl LoginVerifier {
    pub fn new(backend: Arc<dyn AuthBackend>, resolver: Arc<OwnerResolver>) -> Self {
        Self { backend, resolver }
    }

    /// Verify a pending login
    ///
    /// Every owner is asked concurrently; the first confirmation in owner
    /// order is returned. `Ok(None)` means nobody confirmed.
    pub async fn verify_login(&self, query: &SessionQuery) -> ProxyResult<Option<LoginResult>> {
        if query.username.is_empty() || query.server_id.is_empty() {
            return Err(ProxyError::InvalidRequest(
                "username and serverId are required".to_string(),
            ));
        }

        let owners = self.resolver.resolve_owners(&query.username).await;
        if owners.is_empty() {
            info!(player_name = %query.username, "no server owns player");
            return Ok(None);
        }

        let checks = owners
            .iter()
            .map(|server| self.backend.validate_session(query, server));

        Ok(join_all(checks).await.into_iter().flatten().next())
    }
}
