/// Ownership Cache - in-memory TTL map from player name to owning servers
use crate::{config::ServerSpec, identity::OwnershipEntry};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Ownership cache
///
/// Entries are never evicted, only overwritten once stale. Names are
/// case-sensitive. The lock is never held across network calls, so two
/// concurrent misses for the same name both fan out and the last write wins.
pub struct OwnershipCache {
    entries: RwLock<HashMap<String, OwnershipEntry>>,
    /// How long a resolution stays valid (default: 1 hour)
    max_age: Duration,
}

impl OwnershipCache {
    /// Create a new ownership cache
    pub fn new(max_age: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            max_age,
        }
    }

    /// Owners of `player_name` if resolved within the TTL as of `now`
    pub async fn get_fresh(&self, player_name: &str, now: DateTime<Utc>) -> Option<Vec<ServerSpec>> {
        let entries = self.entries.read().await;
        let entry = entries.get(player_name)?;

        if now - entry.fetched_at <= self.max_age {
            Some(entry.owners.clone())
        } else {
            None
        }
    }

    /// Record a resolution for `player_name`, replacing any previous one
    pub async fn store(&self, player_name: &str, owners: Vec<ServerSpec>, now: DateTime<Utc>) {
        self.entries.write().await.insert(
            player_name.to_string(),
            OwnershipEntry {
                fetched_at: now,
                owners,
            },
        );
    }

    /// Raw entry, fresh or not
    #[cfg(test)]
    pub async fn entry(&self, player_name: &str) -> Option<OwnershipEntry> {
        self.entries.read().await.get(player_name).cloned()
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

impl Default for OwnershipCache {
    fn default() -> Self {
        Self::new(Duration::hours(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_and_get_fresh() {
        let cache = OwnershipCache::new(Duration::seconds(60));
        let now = Utc::now();
        let owners = vec![ServerSpec::vendor("mojang")];

        assert!(cache.get_fresh("Alice", now).await.is_none());

        cache.store("Alice", owners.clone(), now).await;
        assert_eq!(cache.get_fresh("Alice", now).await, Some(owners.clone()));

        // Boundary is inclusive
        let at_limit = now + Duration::seconds(60);
        assert_eq!(cache.get_fresh("Alice", at_limit).await, Some(owners));

        let expired = now + Duration::seconds(61);
        assert!(cache.get_fresh("Alice", expired).await.is_none());
        assert!(cache.entry("Alice").await.is_some());
    }

    #[tokio::test]
    async fn test_names_are_case_sensitive() {
        let cache = OwnershipCache::default();
        let now = Utc::now();

        cache.store("Alice", vec![ServerSpec::vendor("mojang")], now).await;
        assert!(cache.get_fresh("alice", now).await.is_none());
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_empty_owners_are_cached() {
        let cache = OwnershipCache::default();
        let now = Utc::now();

        cache.store("Ghost", Vec::new(), now).await;
        assert_eq!(cache.get_fresh("Ghost", now).await, Some(Vec::new()));
    }

    #[tokio::test]
    async fn test_store_overwrites() {
        let cache = OwnershipCache::default();
        let now = Utc::now();

        cache.store("Bob", vec![ServerSpec::vendor("mojang")], now).await;
        let later = now + Duration::minutes(5);
        let mirror = vec![ServerSpec::mirror("mirror", "https://mirror.example")];
        cache.store("Bob", mirror.clone(), later).await;

        let entry = cache.entry("Bob").await.unwrap();
        assert_eq!(entry.owners, mirror);
        assert_eq!(entry.fetched_at, later);
        assert_eq!(cache.len().await, 1);
    }
}
