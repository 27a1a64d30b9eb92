/// Owner Resolver - tiered fan-out of identity lookups with caching
use crate::{
    backend::AuthBackend,
    config::ServerSpec,
    identity::OwnershipCache,
};
use chrono::{DateTime, Utc};
use futures::future::join_all;
use std::sync::Arc;
use tracing::debug;

/// Resolves which configured server(s) own a player name
pub struct OwnerResolver {
    backend: Arc<dyn AuthBackend>,
    cache: OwnershipCache,
    tiers: Vec<Vec<ServerSpec>>,
}

impl OwnerResolver {
    /// Create a new resolver over `tiers`, highest priority first
    pub fn new(backend: Arc<dyn AuthBackend>, cache: OwnershipCache, tiers: Vec<Vec<ServerSpec>>) -> Self {
        Self {
            backend,
            cache,
            tiers,
        }
    }

    /// Resolve the owners of `player_name`
    ///
    /// Resolution order:
    /// 1. Fresh cache entry (no network I/O)
    /// 2. Each tier in turn, all servers of a tier queried concurrently
    /// 3. The first tier with any hit wins; later tiers are not queried
    ///
    /// The outcome is cached even when it is empty.
    pub async fn resolve_owners(&self, player_name: &str) -> Vec<ServerSpec> {
        self.resolve_owners_at(player_name, Utc::now()).await
    }

    pub(crate) async fn resolve_owners_at(&self, player_name: &str, now: DateTime<Utc>) -> Vec<ServerSpec> {
        if let Some(owners) = self.cache.get_fresh(player_name, now).await {
            debug!(player_name, owners = owners.len(), "ownership cache hit");
            return owners;
        }

        let owners = self.fan_out(player_name).await;
        self.cache.store(player_name, owners.clone(), now).await;
        owners
    }

    async fn fan_out(&self, player_name: &str) -> Vec<ServerSpec> {
        for (tier_index, tier) in self.tiers.iter().enumerate() {
            let lookups = tier
                .iter()
                .map(|server| self.backend.lookup_identity(player_name, server));

            let owners: Vec<ServerSpec> = join_all(lookups)
                .await
                .into_iter()
                .flatten()
                .map(|found| {
                    debug!(player_name, uuid = %found.uuid, server_name = %found.server.name, "owner candidate");
                    found.server
                })
                .collect();

            if !owners.is_empty() {
                debug!(player_name, tier = tier_index, owners = owners.len(), "tier answered");
                return owners;
            }
        }

        Vec::new()
    }

    #[cfg(test)]
    pub fn cache(&self) -> &OwnershipCache {
        &self.cache
    }
}
