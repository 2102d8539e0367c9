use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::api::errors::ApiError;
use crate::auth::jwt::{verify_token, Claims};
use crate::domain::user::Role;

/// JWT authentication extractor for protected routes
///
/// Usage:
/// ```rust,ignore
/// async fn protected_handler(
///     JwtAuth(claims): JwtAuth,
/// ) -> Result<String, ApiError> {
///     Ok(format!("Hello {}", claims.username))
/// }
/// ```
pub struct JwtAuth(pub Claims);

impl JwtAuth {
    /// Rejects with 403 unless the token's role is in the allow list
    pub fn require_role(&self, roles: &[Role]) -> Result<(), ApiError> {
        if roles.contains(&self.0.role) {
            Ok(())
        } else {
            Err(ApiError::forbidden("Forbidden"))
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for JwtAuth
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Extract the authorization header
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::unauthorized("Missing token"))?;

        // Extract bearer token
        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| {
                ApiError::unauthorized("Invalid authorization format. Use: Bearer <token>")
            })?;

        // Get JWT secret from environment
        let secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| "dev-secret-key".to_string());

        // Verify the token; the reason a token failed is never echoed back
        let claims = verify_token(token, &secret)
            .map_err(|_| ApiError::unauthorized("Invalid token"))?;

        Ok(JwtAuth(claims))
    }
}
