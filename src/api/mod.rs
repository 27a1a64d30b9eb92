/// API routes and handlers
pub mod meta;
pub mod session;

use crate::context::AppContext;
use axum::Router;

/// Build API routes
pub fn routes() -> Router<AppContext> {
    Router::new()
        .merge(meta::routes())
        .merge(session::routes())
}
