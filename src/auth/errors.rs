use thiserror::Error;

use crate::domain::errors::DomainValidationError;

/// Errors raised by the authentication service
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown user or wrong password; the two causes are deliberately
    /// indistinguishable to the caller
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Username already in use")]
    UsernameTaken,

    #[error("Email already in use")]
    EmailTaken,

    #[error(transparent)]
    Validation(#[from] DomainValidationError),

    #[error("Password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Repository error: {0}")]
    Repository(String),
}

pub type AuthResult<T> = Result<T, AuthError>;
