/// Session server endpoint
/// Implements sessionserver hasJoined by proxying to the player's owning server
use crate::{
    backend::SessionQuery,
    context::AppContext,
    error::{ProxyError, ProxyResult},
};
use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
pub fn routes() -> Router<AppContext> {
    Router::new().route("/sessionserver/session/minecraft/hasJoined", get(has_joined))
}

/// Recognized query parameters; anything else is ignored
#[derive(Debug, Default)]
pub struct HasJoinedParams {
    pub username: Option<String>,
    pub server_id: Option<String>,
    pub ip: Option<String>,
}

impl HasJoinedParams {
    /// Collect parameters from raw pairs; a repeated key keeps its last value
    fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "username" => params.username = Some(value),
                "serverId" => params.server_id = Some(value),
                "ip" => params.ip = Some(value),
                _ => {}
            }
        }
        params
    }

    fn into_query(self) -> ProxyResult<SessionQuery> {
        match (self.username, self.server_id) {
            (Some(username), Some(server_id)) if !username.is_empty() && !server_id.is_empty() => {
                Ok(SessionQuery {
                    username,
                    server_id,
                    ip: self.ip,
                })
            }
            _ => Err(ProxyError::InvalidRequest(
                "username and serverId are required".to_string(),
            )),
        }
    }
}

/// GET /sessionserver/session/minecraft/hasJoined
///
/// Answers with the confirming server's response unchanged, or an empty 204
/// when nobody confirms (including malformed requests).
pub async fn has_joined(
    State(ctx): State<AppContext>,
    pairs: Option<Query<Vec<(String, String)>>>,
) -> ProxyResult<Response> {
    let pairs = pairs.map(|Query(pairs)| pairs).unwrap_or_default();
    let query = HasJoinedParams::from_pairs(pairs).into_query()?;

    match ctx.verifier.verify_login(&query).await? {
        Some(result) => {
            let content_type = result.content_type_header();
            Response::builder()
                .status(result.status)
                .header(header::CONTENT_TYPE, content_type)
                .body(Body::from(result.body))
                .map_err(|e| ProxyError::Internal(format!("Failed to build response: {}", e)))
        }
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}
