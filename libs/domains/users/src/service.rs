use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::config::UsersConfig;
use crate::error::{UserError, UserResult};
use crate::models::{User, UserPayload};
use crate::repository::UserRepository;

pub(crate) const INVALID_BIRTH_DATE: &str = "Invalid birth date";
pub(crate) const INVALID_DATE_RANGE: &str = "'from' date range must be before 'to'.";

fn utc_today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Service layer for User business logic
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
    config: UsersConfig,
    today: fn() -> NaiveDate,
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            config: self.config,
            today: self.today,
        }
    }
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R, config: UsersConfig) -> Self {
        Self::with_clock(repository, config, utc_today)
    }

    /// Same as [`UserService::new`] with a custom source for the current date
    pub fn with_clock(repository: R, config: UsersConfig, today: fn() -> NaiveDate) -> Self {
        Self {
            repository: Arc::new(repository),
            config,
            today,
        }
    }

    /// Create a new user once the minimum age is met
    #[instrument(skip(self, input))]
    pub async fn create_user(&self, input: UserPayload) -> UserResult<User> {
        let user = input.into_user(Uuid::nil())?;

        if !self.is_old_enough(user.birth_date) {
            tracing::info!(birth_date = %user.birth_date, "Rejected underage user");
            return Err(UserError::Validation(INVALID_BIRTH_DATE.to_string()));
        }

        self.repository.insert(user).await
    }

    /// Get a user by ID
    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn get_user(&self, id: Uuid) -> UserResult<User> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    /// Change first and last name, leaving every other field as stored
    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn rename_user(&self, id: Uuid, first_name: String, last_name: String) -> UserResult<()> {
        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))?;

        user.first_name = first_name;
        user.last_name = last_name;

        if !self.repository.update(user).await? {
            return Err(UserError::NotFound(id));
        }

        Ok(())
    }

    /// Overwrite every field of an existing user with `input`
    #[instrument(skip(self, input), fields(user_id = %id))]
    pub async fn replace_user(&self, id: Uuid, input: UserPayload) -> UserResult<User> {
        if !self.repository.exists_by_id(id).await? {
            return Err(UserError::NotFound(id));
        }

        let user = input.into_user(id)?;

        if !self.repository.update(user.clone()).await? {
            return Err(UserError::NotFound(id));
        }

        Ok(user)
    }

    /// Delete a user
    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn delete_user(&self, id: Uuid) -> UserResult<()> {
        if !self.repository.exists_by_id(id).await? {
            return Err(UserError::NotFound(id));
        }

        // a concurrent delete may win between the two calls
        if !self.repository.delete_by_id(id).await? {
            return Err(UserError::NotFound(id));
        }

        Ok(())
    }

    /// Users born within `[from, to]`
    #[instrument(skip(self))]
    pub async fn users_by_birth_date(&self, from: NaiveDate, to: NaiveDate) -> UserResult<Vec<User>> {
        if from > to {
            return Err(UserError::Validation(INVALID_DATE_RANGE.to_string()));
        }

        self.repository.scan_by_date_range(from, to).await
    }

    fn is_old_enough(&self, birth_date: NaiveDate) -> bool {
        // None means a birth date after today
        let age = (self.today)().years_since(birth_date).unwrap_or(0);
        age >= self.config.min_user_age
    }
}
