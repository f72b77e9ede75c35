use axum::{
    routing::{get, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::{
    auth::{logout, post_login},
    pages::login_page,
};

pub fn build_auth_routers() -> Router<AppRegistry> {
    let routers = Router::new()
        .route("/login", get(login_page))
        .route("/login", post(post_login))
        .route("/logout", get(logout));

    Router::new().nest("/user", routers)
}
