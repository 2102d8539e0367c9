use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::repositories::UserRepository;
use crate::domain::user::{User, UserRecord};

/// In-memory implementation of UserRepository
///
/// Backs the test suite and local development without a database. Assigns
/// ids and timestamps the way the real store does, and rebuilds entities
/// through the validating constructor.
pub struct MemoryUserRepository {
    users: Mutex<Vec<User>>,
    next_id: AtomicI64,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for MemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, String> {
        let users = self
            .users
            .lock()
            .map_err(|_| "user store poisoned".to_string())?;

        Ok(users.iter().find(|u| u.username() == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, String> {
        let users = self
            .users
            .lock()
            .map_err(|_| "user store poisoned".to_string())?;

        Ok(users.iter().find(|u| u.email() == email).cloned())
    }

    async fn insert(&self, user: &User) -> Result<User, String> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();

        let stored = User::new(UserRecord {
            id: Some(id),
            username: user.username().to_string(),
            first_name: user.first_name().to_string(),
            last_name: user.last_name().to_string(),
            email: user.email().to_string(),
            password: user.password().to_string(),
            role: user.role().to_string(),
            created_at: Some(now),
            updated_at: Some(now),
        })
        .map_err(|e| format!("Invalid user: {}", e))?;

        let mut users = self
            .users
            .lock()
            .map_err(|_| "user store poisoned".to_string())?;
        users.push(stored.clone());

        Ok(stored)
    }

    async fn list_all(&self) -> Result<Vec<User>, String> {
        let users = self
            .users
            .lock()
            .map_err(|_| "user store poisoned".to_string())?;

        let mut all = users.clone();
        all.sort_by(|a, b| a.username().cmp(b.username()));

        Ok(all)
    }
}
