use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};
use domain_users::UsersConfig;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub users: UsersConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080
        let users = UsersConfig::from_env()?; // MIN_USER_AGE, default 18

        Ok(Self {
            app: app_info!(),
            server,
            users,
            environment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        temp_env::with_vars_unset(
            ["APP_ENV", "HOST", "PORT", "CORS_ALLOWED_ORIGIN", "MIN_USER_AGE"],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.app.name, "users_api");
                assert_eq!(config.server.address(), "0.0.0.0:8080");
                assert!(config.server.cors_origins.is_empty());
                assert_eq!(config.users.min_user_age, 18);
                assert!(config.environment.is_development());
            },
        );
    }

    #[test]
    fn test_overrides() {
        temp_env::with_vars(
            [
                ("APP_ENV", Some("production")),
                ("PORT", Some("9000")),
                ("MIN_USER_AGE", Some("21")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.server.port, 9000);
                assert_eq!(config.users.min_user_age, 21);
                assert!(config.environment.is_production());
            },
        );
    }

    #[test]
    fn test_invalid_min_user_age_fails() {
        temp_env::with_var("MIN_USER_AGE", Some("adult"), || {
            assert!(Config::from_env().is_err());
        });
    }
}
