/// In-memory backend with canned answers, used by resolver and endpoint tests
use crate::{
    backend::{AuthBackend, IdentityResult, LoginResult, SessionQuery},
    config::ServerSpec,
};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

/// Which call reached which server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Lookup { server: String, player: String },
    Validate { server: String, player: String },
}

#[derive(Default)]
pub struct ScriptedBackend {
    /// (server name, player) pairs that have a profile
    profiles: HashSet<(String, String)>,
    /// (server name, player) -> session answer
    sessions: HashMap<(String, String), LoginResult>,
    /// server name -> artificial latency before answering
    delays: HashMap<String, Duration>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(mut self, server: &str, player: &str) -> Self {
        self.profiles.insert((server.to_string(), player.to_string()));
        self
    }

    pub fn with_session(mut self, server: &str, player: &str, body: &str) -> Self {
        self.sessions.insert(
            (server.to_string(), player.to_string()),
            LoginResult {
                body: body.as_bytes().to_vec(),
                status: 200,
                content_type: "application/json".to_string(),
                charset: Some("utf-8".to_string()),
            },
        );
        self
    }

    pub fn with_delay(mut self, server: &str, delay: Duration) -> Self {
        self.delays.insert(server.to_string(), delay);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn lookups(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Lookup { server, .. } => Some(server),
                Call::Validate { .. } => None,
            })
            .collect()
    }

    pub fn validations(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Validate { server, .. } => Some(server),
                Call::Lookup { .. } => None,
            })
            .collect()
    }
}

#[async_trait]
impl AuthBackend for ScriptedBackend {
    async fn lookup_identity(&self, player_name: &str, server: &ServerSpec) -> Option<IdentityResult> {
        self.calls.lock().unwrap().push(Call::Lookup {
            server: server.name.clone(),
            player: player_name.to_string(),
        });

        if let Some(delay) = self.delays.get(&server.name) {
            tokio::time::sleep(*delay).await;
        }

        // Servers named "down" behave like an unreachable backend
        if server.name.starts_with("down") {
            return None;
        }

        self.profiles
            .contains(&(server.name.clone(), player_name.to_string()))
            .then(|| IdentityResult {
                uuid: format!("{}-uuid", player_name),
                server: server.clone(),
            })
    }

    async fn validate_session(&self, query: &SessionQuery, server: &ServerSpec) -> Option<LoginResult> {
        self.calls.lock().unwrap().push(Call::Validate {
            server: server.name.clone(),
            player: query.username.clone(),
        });

        self.sessions
            .get(&(server.name.clone(), query.username.clone()))
            .cloned()
    }
}
