use axum::Router;

use crate::config::Config;

pub mod users;

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix will be added by the `create_router` helper.
///
/// Returns a stateless Router (all sub-routers have state already applied).
pub fn routes(config: &Config) -> Router {
    Router::new().nest("/users", users::router(config))
}
