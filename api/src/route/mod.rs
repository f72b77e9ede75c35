pub mod admin;
pub mod auth;
pub mod health;
pub mod public;

use crate::session;
use axum::{middleware, Router};
use registry::AppRegistry;

/// Assembles the full application router. Every request passes through the
/// session-token middleware so handlers can rely on a token being present.
pub fn app(registry: AppRegistry) -> Router {
    Router::new()
        .merge(health::build_health_check_routers())
        .merge(public::build_public_routers())
        .merge(auth::build_auth_routers())
        .merge(admin::build_admin_routers())
        .layer(middleware::from_fn(session::attach_session_token))
        .with_state(registry)
}
