use async_trait::async_trait;

use crate::domain::user::User;

/// Repository port for the User aggregate
///
/// Lookups take already-normalized (trimmed, lowercased) values; the
/// authentication service normalizes before calling in. Implementations
/// surface storage failures as strings and never retry.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by normalized username
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, String>;

    /// Find a user by normalized email address
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, String>;

    /// Persist a new user, returning the stored entity with the id and
    /// timestamps assigned by the store
    async fn insert(&self, user: &User) -> Result<User, String>;

    /// Every stored user
    async fn list_all(&self) -> Result<Vec<User>, String>;
}
