use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::repositories::UserRepository;
use crate::domain::user::{User, UserRecord};

/// PostgreSQL implementation of UserRepository
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a new PostgresUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Raw `users` row
///
/// Rebuilt into a [`User`] through the validating constructor, so malformed
/// stored data surfaces as an error instead of a half-valid entity.
#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    first_name: String,
    last_name: String,
    email: String,
    password: String,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> Result<User, String> {
        User::new(UserRecord {
            id: Some(self.id),
            username: self.username,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            password: self.password,
            role: self.role,
            created_at: Some(self.created_at),
            updated_at: Some(self.updated_at),
        })
        .map_err(|e| format!("Invalid user from database: {}", e))
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, String> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, first_name, last_name, email, password, role,
                   created_at, updated_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| format!("Failed to find user by username: {}", e))?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, String> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, first_name, last_name, email, password, role,
                   created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| format!("Failed to find user by email: {}", e))?;

        row.map(UserRow::into_user).transpose()
    }

    async fn insert(&self, user: &User) -> Result<User, String> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (username, first_name, last_name, email, password, role)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, username, first_name, last_name, email, password, role,
                      created_at, updated_at
            "#,
        )
        .bind(user.username())
        .bind(user.first_name())
        .bind(user.last_name())
        .bind(user.email())
        .bind(user.password())
        .bind(user.role().as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| format!("Failed to create user: {}", e))?;

        row.into_user()
    }

    async fn list_all(&self) -> Result<Vec<User>, String> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, first_name, last_name, email, password, role,
                   created_at, updated_at
            FROM users
            ORDER BY username
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| format!("Failed to list users: {}", e))?;

        rows.into_iter().map(UserRow::into_user).collect()
    }
}
