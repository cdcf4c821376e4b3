use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::UserResult;
use crate::models::User;

/// Repository trait for User persistence
///
/// Implementations keep the authoritative copy of every record and hand out
/// clones. They enforce no business rules.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Store a new user under a freshly generated ID, ignoring `user.id`
    async fn insert(&self, user: User) -> UserResult<User>;

    /// Get a user by ID
    async fn find_by_id(&self, id: Uuid) -> UserResult<Option<User>>;

    /// Check whether a user with this ID is stored
    async fn exists_by_id(&self, id: Uuid) -> UserResult<bool>;

    /// Remove a user; returns whether anything was removed
    async fn delete_by_id(&self, id: Uuid) -> UserResult<bool>;

    /// Replace the stored record with the same ID.
    ///
    /// Returns `false`, and stores nothing, when no record has that ID.
    async fn update(&self, user: User) -> UserResult<bool>;

    /// Users whose birth date lies in `[from, to]`, both ends inclusive
    async fn scan_by_date_range(&self, from: NaiveDate, to: NaiveDate) -> UserResult<Vec<User>>;

    /// Number of stored users
    async fn count(&self) -> UserResult<usize>;
}

/// In-memory implementation of UserRepository
///
/// Clones share the same underlying map.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, mut user: User) -> UserResult<User> {
        let mut users = self.users.write().await;

        user.id = Uuid::new_v4();
        users.insert(user.id, user.clone());

        tracing::info!(user_id = %user.id, "Created user");
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn exists_by_id(&self, id: Uuid) -> UserResult<bool> {
        let users = self.users.read().await;
        Ok(users.contains_key(&id))
    }

    async fn delete_by_id(&self, id: Uuid) -> UserResult<bool> {
        let mut users = self.users.write().await;

        if users.remove(&id).is_some() {
            tracing::info!(user_id = %id, "Deleted user");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn update(&self, user: User) -> UserResult<bool> {
        let mut users = self.users.write().await;

        match users.get_mut(&user.id) {
            Some(stored) => {
                tracing::info!(user_id = %user.id, "Updated user");
                *stored = user;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn scan_by_date_range(&self, from: NaiveDate, to: NaiveDate) -> UserResult<Vec<User>> {
        let users = self.users.read().await;

        let result = users
            .values()
            .filter(|u| u.birth_date >= from && u.birth_date <= to)
            .cloned()
            .collect();

        Ok(result)
    }

    async fn count(&self) -> UserResult<usize> {
        let users = self.users.read().await;
        Ok(users.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn user(first_name: &str, birth_date: NaiveDate) -> User {
        User {
            id: Uuid::nil(),
            first_name: first_name.to_string(),
            last_name: "Doe".to_string(),
            email: format!("{}.doe@example.com", first_name.to_lowercase()),
            birth_date,
            address: Some("123 Street".to_string()),
            phone_number: Some("1234567890".to_string()),
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_fresh_id() {
        let repo = InMemoryUserRepository::new();
        let preset = Uuid::new_v4();

        let saved = repo
            .insert(User {
                id: preset,
                ..user("John", date(1990, 1, 1))
            })
            .await
            .unwrap();

        assert_ne!(saved.id, preset);
        assert!(!saved.id.is_nil());
        assert_eq!(saved.first_name, "John");
        assert!(repo.exists_by_id(saved.id).await.unwrap());
        assert!(!repo.exists_by_id(preset).await.unwrap());
    }

    #[tokio::test]
    async fn test_insert_ids_are_unique() {
        let repo = InMemoryUserRepository::new();
        let mut ids = HashSet::new();

        for _ in 0..50 {
            let saved = repo.insert(user("John", date(1990, 1, 1))).await.unwrap();
            ids.insert(saved.id);
        }

        assert_eq!(ids.len(), 50);
        assert_eq!(repo.count().await.unwrap(), 50);
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let repo = InMemoryUserRepository::new();
        let saved = repo.insert(user("John", date(1990, 1, 1))).await.unwrap();

        let found = repo.find_by_id(saved.id).await.unwrap();
        assert_eq!(found, Some(saved));

        assert!(repo.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_returned_records_are_copies() {
        let repo = InMemoryUserRepository::new();
        let saved = repo.insert(user("John", date(1990, 1, 1))).await.unwrap();

        let mut copy = repo.find_by_id(saved.id).await.unwrap().unwrap();
        copy.first_name = "Mallory".to_string();

        let stored = repo.find_by_id(saved.id).await.unwrap().unwrap();
        assert_eq!(stored.first_name, "John");
    }

    #[tokio::test]
    async fn test_delete_by_id() {
        let repo = InMemoryUserRepository::new();
        let saved = repo.insert(user("John", date(1990, 1, 1))).await.unwrap();

        assert!(repo.delete_by_id(saved.id).await.unwrap());
        assert!(!repo.exists_by_id(saved.id).await.unwrap());
        assert!(!repo.delete_by_id(saved.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_replaces_only_target() {
        let repo = InMemoryUserRepository::new();
        let john = repo.insert(user("John", date(1990, 1, 1))).await.unwrap();
        let jane = repo.insert(user("Jane", date(1995, 1, 1))).await.unwrap();

        let replacement = User {
            id: john.id,
            email: "johnny@example.com".to_string(),
            address: None,
            ..user("Johnny", date(1991, 2, 3))
        };
        assert!(repo.update(replacement.clone()).await.unwrap());

        assert_eq!(repo.find_by_id(john.id).await.unwrap(), Some(replacement));
        assert_eq!(repo.find_by_id(jane.id).await.unwrap(), Some(jane));
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_update_unknown_id_stores_nothing() {
        let repo = InMemoryUserRepository::new();
        let ghost = User {
            id: Uuid::new_v4(),
            ..user("Ghost", date(1990, 1, 1))
        };

        assert!(!repo.update(ghost.clone()).await.unwrap());
        assert!(!repo.exists_by_id(ghost.id).await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_scan_by_date_range_matches_inclusive_bounds() {
        let repo = InMemoryUserRepository::new();
        repo.insert(user("John", date(1990, 1, 1))).await.unwrap();
        repo.insert(user("Jane", date(1995, 1, 1))).await.unwrap();

        let users = repo
            .scan_by_date_range(date(1989, 12, 31), date(1991, 1, 2))
            .await
            .unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].first_name, "John");

        let users = repo
            .scan_by_date_range(date(1990, 1, 1), date(1995, 1, 1))
            .await
            .unwrap();
        assert_eq!(users.len(), 2);
    }

    #[tokio::test]
    async fn test_scan_by_single_day() {
        let repo = InMemoryUserRepository::new();
        repo.insert(user("John", date(1990, 1, 1))).await.unwrap();
        repo.insert(user("Jake", date(1990, 1, 1))).await.unwrap();
        repo.insert(user("Jane", date(1990, 1, 2))).await.unwrap();

        let users = repo
            .scan_by_date_range(date(1990, 1, 1), date(1990, 1, 1))
            .await
            .unwrap();

        let mut names: Vec<_> = users.into_iter().map(|u| u.first_name).collect();
        names.sort();
        assert_eq!(names, vec!["Jake", "John"]);
    }

    #[tokio::test]
    async fn test_scan_without_matches_is_empty() {
        let repo = InMemoryUserRepository::new();
        repo.insert(user("John", date(1990, 1, 1))).await.unwrap();

        let users = repo
            .scan_by_date_range(date(1991, 1, 2), date(1992, 1, 1))
            .await
            .unwrap();
        assert!(users.is_empty());

        // inverted bounds are not the store's concern
        let users = repo
            .scan_by_date_range(date(2000, 1, 1), date(1980, 1, 1))
            .await
            .unwrap();
        assert!(users.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_inserts_and_scans_stay_consistent() {
        let repo = InMemoryUserRepository::new();

        let writers: Vec<_> = (0..8)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move {
                    for _ in 0..25 {
                        repo.insert(user("John", date(1990, 6, 15))).await.unwrap();
                    }
                })
            })
            .collect();

        let reader = {
            let repo = repo.clone();
            tokio::spawn(async move {
                for _ in 0..25 {
                    let users = repo
                        .scan_by_date_range(date(1990, 1, 1), date(1990, 12, 31))
                        .await
                        .unwrap();
                    assert!(users.iter().all(|u| u.first_name == "John"));
                    tokio::task::yield_now().await;
                }
            })
        };

        for writer in writers {
            writer.await.unwrap();
        }
        reader.await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 200);
    }
}
