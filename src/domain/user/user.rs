use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::value_objects::Role;
use crate::domain::errors::DomainValidationError;

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9](?:[._-]?[a-z0-9]){2,29}$").unwrap());
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").unwrap());
static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{L}][\p{L}\p{M} '\-]{0,99}$").unwrap());
static BCRYPT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\$2[aby]\$\d{2}\$[./A-Za-z0-9]{53}$").unwrap());

const USERNAME_MAX: usize = 30;
const EMAIL_MAX: usize = 254;
const NAME_MAX: usize = 100;

/// Raw field set a [`User`] is constructed from
///
/// This is the shape of a persisted credential row and of a registration
/// payload after password hashing. Nothing here is trusted: every
/// construction goes through the full validation pass.
#[derive(Debug, Clone)]
pub struct UserRecord {
    /// Assigned by the persistence layer; `None` until the row exists
    pub id: Option<i64>,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Bcrypt hash string; plaintext never reaches the entity
    pub password: String,
    pub role: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Externally-safe projection of a user; the password never appears here
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: Option<i64>,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// User aggregate root
///
/// A normalized, validated account record. Construction either yields a
/// fully valid entity or fails with a [`DomainValidationError`] listing
/// every violated rule, so callers see all problems at once.
///
/// # Invariants
/// - `username` and `email` are trimmed and lowercased, names are trimmed
/// - `password` is a bcrypt hash string, never plaintext
/// - `role` is a known [`Role`]
/// - `updated_at` never precedes `created_at`
/// - no setters: an update means constructing a new entity
#[derive(Debug, Clone)]
pub struct User {
    id: Option<i64>,
    username: String,
    first_name: String,
    last_name: String,
    email: String,
    password: String,
    role: Role,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

impl User {
    /// Validates and normalizes a raw record into a `User`
    ///
    /// Every rule is evaluated unconditionally; failures are collected into
    /// one [`DomainValidationError`] in field order instead of stopping at
    /// the first violation.
    pub fn new(record: UserRecord) -> Result<Self, DomainValidationError> {
        let issues = Self::validate(&record);

        if let Some(role) = Role::parse(&record.role) {
            if issues.is_empty() {
                return Ok(Self {
                    id: record.id,
                    username: record.username.trim().to_lowercase(),
                    first_name: record.first_name.trim().to_string(),
                    last_name: record.last_name.trim().to_string(),
                    email: record.email.trim().to_lowercase(),
                    password: record.password,
                    role,
                    created_at: record.created_at,
                    updated_at: record.updated_at,
                });
            }
        }

        Err(DomainValidationError::new(issues))
    }

    fn validate(record: &UserRecord) -> Vec<String> {
        let mut issues = Vec::new();

        let username = record.username.trim().to_lowercase();
        if username.is_empty() {
            issues.push("'username' is required".to_string());
        } else if username.chars().count() > USERNAME_MAX {
            issues.push(format!("'username' must be <= {} characters", USERNAME_MAX));
        } else if !USERNAME_RE.is_match(&username) {
            issues.push(
                "'username' must start with a letter/number, be 3-30 chars, \
                 and may contain single '.', '_' or '-' between alphanumerics"
                    .to_string(),
            );
        }

        let email = record.email.trim().to_lowercase();
        if email.is_empty() {
            issues.push("'email' is required".to_string());
        } else if email.chars().count() > EMAIL_MAX {
            issues.push(format!("'email' must be <= {} characters", EMAIL_MAX));
        } else if !EMAIL_RE.is_match(&email) {
            issues.push("'email' must be a valid email address".to_string());
        }

        let first_name = record.first_name.trim();
        if first_name.is_empty() {
            issues.push("'firstName' is required".to_string());
        } else if first_name.chars().count() > NAME_MAX {
            issues.push(format!("'firstName' must be <= {} characters", NAME_MAX));
        } else if !NAME_RE.is_match(first_name) {
            issues.push(
                "'firstName' must start with a letter and contain only letters, \
                 spaces, hyphens, or apostrophes"
                    .to_string(),
            );
        }

        let last_name = record.last_name.trim();
        if last_name.is_empty() {
            issues.push("'lastName' is required".to_string());
        } else if last_name.chars().count() > NAME_MAX {
            issues.push(format!("'lastName' must be <= {} characters", NAME_MAX));
        } else if !NAME_RE.is_match(last_name) {
            issues.push(
                "'lastName' must start with a letter and contain only letters, \
                 spaces, hyphens, or apostrophes"
                    .to_string(),
            );
        }

        if Role::parse(&record.role).is_none() {
            let roles: Vec<&str> = Role::ALL.iter().map(Role::as_str).collect();
            issues.push(format!("'role' must be one of: {}", roles.join(", ")));
        }

        if !BCRYPT_RE.is_match(&record.password) {
            issues.push("'password' must be a valid bcrypt hash at the model layer".to_string());
        }

        if let (Some(created_at), Some(updated_at)) = (record.created_at, record.updated_at) {
            if updated_at < created_at {
                issues.push(
                    "'updatedAt' must be greater than or equal to 'createdAt'".to_string(),
                );
            }
        }

        issues
    }

    // ===== Getters =====

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Stored bcrypt hash; only the authentication flow should look at this
    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// The one sanctioned serialization path; excludes the password
    pub fn to_dto(&self) -> UserDto {
        UserDto {
            id: self.id,
            username: self.username.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            role: self.role,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Identity is the (username, email, role) triple; id, names, password and
/// timestamps do not participate.
impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.username == other.username && self.email == other.email && self.role == other.role
    }
}
