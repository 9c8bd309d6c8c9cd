//! User lookup behind the `GET /users/{user_id}` endpoint.

use std::collections::HashMap;
use std::sync::Arc;

use repo_core::ApplicationError;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Source of users. Errors are returned ready to be sent to the client.
pub trait UserRepository: Send + Sync {
    fn get_user(&self, id: i64) -> Result<User, ApplicationError>;
}

/// Read-only user store held in memory.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: HashMap<i64, User>,
}

impl InMemoryUserRepository {
    pub fn new(users: impl IntoIterator<Item = User>) -> Self {
        Self {
            users: users.into_iter().map(|u| (u.id, u)).collect(),
        }
    }

    /// Store holding the single demo user `123`.
    pub fn seeded() -> Self {
        Self::new([User {
            id: 123,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
        }])
    }
}

impl UserRepository for InMemoryUserRepository {
    fn get_user(&self, id: i64) -> Result<User, ApplicationError> {
        self.users
            .get(&id)
            .cloned()
            .ok_or_else(|| ApplicationError::not_found(format!("user {id} was not found")))
    }
}

#[derive(Clone)]
pub struct UsersService {
    repository: Arc<dyn UserRepository>,
}

impl UsersService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    #[instrument(skip(self))]
    pub fn get_user(&self, id: i64) -> Result<User, ApplicationError> {
        let user = self.repository.get_user(id)?;
        debug!(user_id = user.id, "user found");
        Ok(user)
    }
}
