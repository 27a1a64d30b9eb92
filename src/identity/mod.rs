/// Player Ownership Resolution
///
/// Decides which configured server owns a player name, caches that
/// decision, and re-validates login sessions against the owners.

pub mod cache;
pub mod resolver;
pub mod verifier;

pub use cache::OwnershipCache;
pub use resolver::OwnerResolver;
pub use verifier::LoginVerifier;

use crate::config::ServerSpec;
use chrono::{DateTime, Utc};

/// Cached ownership decision for one player name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnershipEntry {
    pub fetched_at: DateTime<Utc>,
    /// Servers of the winning tier; empty when no server knows the name
    pub owners: Vec<ServerSpec>,
}
