use core_config::{ConfigError, FromEnv, env_parse_or};

/// Minimum age, in whole years, a new user must have reached
pub const DEFAULT_MIN_USER_AGE: u32 = 18;

/// Business-rule configuration for the users service
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UsersConfig {
    pub min_user_age: u32,
}

impl UsersConfig {
    pub fn new(min_user_age: u32) -> Self {
        Self { min_user_age }
    }
}

impl Default for UsersConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_USER_AGE)
    }
}

impl FromEnv for UsersConfig {
    /// Reads `MIN_USER_AGE`, defaulting to 18
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(env_parse_or("MIN_USER_AGE", DEFAULT_MIN_USER_AGE)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_user_age_defaults_to_18() {
        temp_env::with_var_unset("MIN_USER_AGE", || {
            assert_eq!(UsersConfig::from_env().unwrap().min_user_age, 18);
        });
    }

    #[test]
    fn test_min_user_age_from_env() {
        temp_env::with_var("MIN_USER_AGE", Some("21"), || {
            assert_eq!(UsersConfig::from_env().unwrap(), UsersConfig::new(21));
        });
    }

    #[test]
    fn test_min_user_age_rejects_garbage() {
        temp_env::with_var("MIN_USER_AGE", Some("adult"), || {
            let err = UsersConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("MIN_USER_AGE"));
        });
    }
}
