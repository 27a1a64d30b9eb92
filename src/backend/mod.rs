/// Authentication backends
///
/// Outbound calls to the vendor session server and to third-party
/// Yggdrasil mirrors, normalized into one result shape.

pub mod client;

#[cfg(test)]
pub mod scripted;

pub use client::YggdrasilClient;

use crate::config::ServerSpec;
use async_trait::async_trait;
use serde::Serialize;

/// A player profile found on one server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityResult {
    pub uuid: String,
    pub server: ServerSpec,
}

/// Raw answer of a server that confirmed a session, forwarded verbatim
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginResult {
    pub body: Vec<u8>,
    pub status: u16,
    pub content_type: String,
    pub charset: Option<String>,
}

impl LoginResult {
    /// Value for the `Content-Type` header of the forwarded response
    pub fn content_type_header(&self) -> String {
        match &self.charset {
            Some(charset) => format!("{}; charset={}", self.content_type, charset),
            None => self.content_type.clone(),
        }
    }
}

/// Query parameters of a `hasJoined` check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionQuery {
    pub username: String,
    #[serde(rename = "serverId")]
    pub server_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
}

/// A source of identity and session answers
///
/// Implementations absorb every failure: a server that cannot be reached or
/// answers garbage is reported as `None`, the same as a negative answer.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// Look up `player_name` on `server`
    async fn lookup_identity(&self, player_name: &str, server: &ServerSpec)
        -> Option<IdentityResult>;

    /// Ask `server` whether the session in `query` is logged in
    async fn validate_session(&self, query: &SessionQuery, server: &ServerSpec)
        -> Option<LoginResult>;
}
