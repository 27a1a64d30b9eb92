/// Yggdrasil HTTP client - talks to the vendor and to mirrors
use crate::{
    backend::{AuthBackend, IdentityResult, LoginResult, SessionQuery},
    config::{ProxyConfig, ServerSpec},
    error::{ProxyError, ProxyResult},
};
use async_trait::async_trait;
use reqwest::{header, StatusCode};
use serde::Deserialize;
use tracing::{info, warn};

/// Profile as returned by both the vendor and mirror lookup endpoints
#[derive(Debug, Deserialize)]
struct Profile {
    id: String,
    name: String,
}

/// reqwest-backed backend shared by the whole process
#[derive(Clone)]
pub struct YggdrasilClient {
    http_client: reqwest::Client,
    vendor_api_url: String,
    vendor_session_url: String,
}

impl YggdrasilClient {
    /// Create a new client from configuration
    pub fn new(config: &ProxyConfig) -> ProxyResult<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(&config.useragent)
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| ProxyError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            vendor_api_url: config.vendor_api_url.trim_end_matches('/').to_string(),
            vendor_session_url: config.vendor_session_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the profile list for `player_name` from `server`
    ///
    /// Returns at most one profile. The vendor signals an unknown name with 204.
    async fn fetch_profiles(&self, player_name: &str, server: &ServerSpec) -> ProxyResult<Vec<Profile>> {
        let profiles = match server.mirror_base() {
            Some(base) => {
                let response = self
                    .http_client
                    .post(format!("{}/api/profiles/minecraft", base))
                    .header(header::CONTENT_TYPE, "application/json; charset=utf-8")
                    .body(serde_json::to_vec(&[player_name])?)
                    .send()
                    .await?;

                if !response.status().is_success() {
                    return Err(ProxyError::UnexpectedStatus(response.status()));
                }

                let body = response.bytes().await?;
                serde_json::from_slice::<Vec<Profile>>(&body)
                    .map_err(|e| ProxyError::MalformedProfile(e.to_string()))?
            }
            None => {
                let response = self
                    .http_client
                    .get(format!(
                        "{}/users/profiles/minecraft/{}",
                        self.vendor_api_url,
                        urlencoding::encode(player_name)
                    ))
                    .send()
                    .await?;

                if response.status() == StatusCode::NO_CONTENT {
                    return Ok(Vec::new());
                }
                if !response.status().is_success() {
                    return Err(ProxyError::UnexpectedStatus(response.status()));
                }

                let body = response.bytes().await?;
                let profile = serde_json::from_slice::<Profile>(&body)
                    .map_err(|e| ProxyError::MalformedProfile(e.to_string()))?;
                vec![profile]
            }
        };

        if profiles.len() > 1 {
            return Err(ProxyError::MalformedProfile(format!(
                "expected at most one profile, got {}",
                profiles.len()
            )));
        }

        Ok(profiles)
    }

    async fn try_lookup_identity(
        &self,
        player_name: &str,
        server: &ServerSpec,
    ) -> ProxyResult<Option<IdentityResult>> {
        let profile = self.fetch_profiles(player_name, server).await?.into_iter().next();

        match profile {
            Some(profile) => {
                info!(
                    player_name = %profile.name,
                    player_uuid = %profile.id,
                    server_name = %server.name,
                    "found player"
                );
                Ok(Some(IdentityResult {
                    uuid: profile.id,
                    server: server.clone(),
                }))
            }
            None => {
                info!(player_name, server_name = %server.name, "found no player");
                Ok(None)
            }
        }
    }

    fn session_endpoint(&self, server: &ServerSpec) -> String {
        match server.mirror_base() {
            Some(base) => format!("{}/sessionserver/session/minecraft/hasJoined", base),
            None => format!("{}/session/minecraft/hasJoined", self.vendor_session_url),
        }
    }

    async fn try_validate_session(
        &self,
        query: &SessionQuery,
        server: &ServerSpec,
    ) -> ProxyResult<Option<LoginResult>> {
        let response = self
            .http_client
            .get(self.session_endpoint(server))
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            info!(player_name = %query.username, server_name = %server.name, "player not logged in");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ProxyError::UnexpectedStatus(status));
        }

        let (content_type, charset) = split_content_type(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok()),
        );
        let body = response.bytes().await?;

        info!(player_name = %query.username, server_name = %server.name, "player logged in");

        Ok(Some(LoginResult {
            body: body.to_vec(),
            status: status.as_u16(),
            content_type,
            charset,
        }))
    }
}

#[async_trait]
impl AuthBackend for YggdrasilClient {
    async fn lookup_identity(&self, player_name: &str, server: &ServerSpec) -> Option<IdentityResult> {
        match self.try_lookup_identity(player_name, server).await {
            Ok(result) => result,
            Err(e) => {
                warn!(player_name, server_name = %server.name, error = %e, "error checking uuid");
                None
            }
        }
    }

    async fn validate_session(&self, query: &SessionQuery, server: &ServerSpec) -> Option<LoginResult> {
        match self.try_validate_session(query, server).await {
            Ok(result) => result,
            Err(e) => {
                warn!(
                    player_name = %query.username,
                    server_name = %server.name,
                    error = %e,
                    "error checking login"
                );
                None
            }
        }
    }
}

/// Split a `Content-Type` header into mime type and charset
fn split_content_type(value: Option<&str>) -> (String, Option<String>) {
    let Some(value) = value else {
        return ("application/octet-stream".to_string(), None);
    };

    let mut parts = value.split(';');
    let mime = parts.next().unwrap_or_default().trim().to_ascii_lowercase();
    let charset = parts.find_map(|param| {
        let (key, val) = param.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| val.trim().trim_matches('"').to_string())
    });

    let mime = if mime.is_empty() {
        "application/octet-stream".to_string()
    } else {
        mime
    };
    (mime, charset)
}
