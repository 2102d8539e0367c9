use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;
use crate::api::middleware::auth::JwtAuth;
use crate::api::AppState;
use crate::auth::service::{AuthenticationResponse, RegisterInput};
use crate::domain::user::{Role, UserDto};

/// Request body for user signup
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
}

/// Request body for login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response from successful login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    #[serde(flatten)]
    pub auth: AuthenticationResponse,
}

/// Wire-level checks applied before the service is invoked
///
/// These mirror what a schema validator would enforce at the edge; the
/// domain entity re-checks its own invariants afterwards.
fn credential_issues(username: &str, password: &str) -> Vec<String> {
    let mut issues = Vec::new();

    let username_len = username.trim().chars().count();
    if !(3..=50).contains(&username_len) {
        issues.push("username must be between 3 and 50 characters".to_string());
    }

    if password.chars().count() < 8 {
        issues.push("password must be at least 8 characters".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        issues.push("password must contain uppercase".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        issues.push("password must contain lowercase".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        issues.push("password must contain digit".to_string());
    }
    if !password.chars().any(|c| !c.is_ascii_alphanumeric()) {
        issues.push("password must contain special character".to_string());
    }

    issues
}

/// Create a new user account
///
/// POST /users/signup
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, Json<UserDto>), ApiError> {
    let issues = credential_issues(&req.username, &req.password);
    if !issues.is_empty() {
        return Err(ApiError::unprocessable_entity(issues.join(", ")));
    }

    let user = state
        .auth
        .register(RegisterInput {
            username: req.username,
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            password: req.password,
            role: req.role,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(user.to_dto())))
}

/// Authenticate and receive a JWT
///
/// POST /users/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let issues = credential_issues(&req.username, &req.password);
    if !issues.is_empty() {
        return Err(ApiError::unprocessable_entity(issues.join(", ")));
    }

    let auth = state.auth.authenticate(&req.username, &req.password).await?;

    Ok(Json(LoginResponse {
        message: "Authentication successful".to_string(),
        auth,
    }))
}

/// Get a list of all users (admin only)
///
/// GET /users
pub async fn list_users(
    auth: JwtAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<UserDto>>, ApiError> {
    auth.require_role(&[Role::Admin])?;

    let users = state.auth.list_users().await?;

    Ok(Json(users.iter().map(|u| u.to_dto()).collect()))
}

/// Health check endpoint
///
/// GET /health
pub async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strong_credentials_pass() {
        assert!(credential_issues("amar", "VeryS3cure1!").is_empty());
    }

    #[test]
    fn weak_password_reports_every_failed_rule() {
        let issues = credential_issues("amar", "short");

        assert_eq!(issues.len(), 4);
        assert!(issues[0].contains("at least 8 characters"));
        assert!(issues[1].contains("uppercase"));
        assert!(issues[2].contains("digit"));
        assert!(issues[3].contains("special character"));
    }

    #[test]
    fn short_username_rejected() {
        let issues = credential_issues("ab", "VeryS3cure1!");

        assert_eq!(issues.len(), 1);
        assert!(issues[0].contains("between 3 and 50 characters"));
    }
}
