use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::UserResult;
use crate::models::User;

/// Repository trait for User persistence
///
/// This trait defines the data access interface for user accounts.
/// Implementations can use different storage backends (MongoDB, in-memory).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user
    async fn create(&self, user: User) -> UserResult<User>;

    /// Get a user by ID
    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>>;

    /// Get a user by exact (case-sensitive) username
    async fn get_by_username(&self, username: &str) -> UserResult<Option<User>>;

    /// List all users
    async fn list(&self) -> UserResult<Vec<User>>;

    /// Replace an existing user record
    async fn update(&self, user: User) -> UserResult<User>;

    /// Delete a user by ID, returning whether a record was removed
    async fn delete(&self, id: Uuid) -> UserResult<bool>;
}

/// In-memory UserRepository backed by a HashMap, for tests and local runs
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> UserResult<User> {
        self.users.write().await.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn get_by_username(&self, username: &str) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn list(&self) -> UserResult<Vec<User>> {
        let users = self.users.read().await;
        let mut all: Vec<User> = users.values().cloned().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(all)
    }

    async fn update(&self, user: User) -> UserResult<User> {
        self.users.write().await.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> UserResult<bool> {
        Ok(self.users.write().await.remove(&id).is_some())
    }
}
