use axum::Router;
use domain_users::{InMemoryUserRepository, UserService, handlers};

use crate::config::Config;

pub fn router(config: &Config) -> Router {
    let repository = InMemoryUserRepository::new();
    let service = UserService::new(repository, config.users);
    handlers::router(service)
}
