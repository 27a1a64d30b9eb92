/// Service descriptor endpoint
///
/// Yggdrasil clients fetch `/` to learn what they are talking to.
use crate::context::AppContext;
use axum::{
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};

/// Name reported as both server and implementation name
pub const IMPLEMENTATION_NAME: &str = "multi-authlib";

pub fn routes() -> Router<AppContext> {
    Router::new().route("/", get(service_descriptor))
}

/// GET /
pub async fn service_descriptor() -> Response {
    (
        [(header::CONTENT_TYPE, "application/json; charset=utf-8")],
        descriptor_body(IMPLEMENTATION_NAME),
    )
        .into_response()
}

/// Descriptor document, spaced the way existing clients expect it
fn descriptor_body(name: &str) -> String {
    let name = serde_json::Value::from(name);
    format!(
        r#"{{"meta": {{"serverName": {name}, "implementationName": {name}}}, "skinDomains": []}}"#
    )
}
