// JWT token creation and verification
// Tokens are bound to the service identity through issuer and audience

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::user::Role;

/// Issuer claim stamped into every token
pub const ISSUER: &str = "kozarusa";

/// Audience claim stamped into every token
pub const AUDIENCE: &str = "kozarusa.app";

/// Claims carried by a signed session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user's store-assigned id, as a string
    pub sub: String,
    pub username: String,
    pub role: Role,
    pub iss: String,
    pub aud: String,
    /// Expiry timestamp (seconds since epoch)
    pub exp: usize,
}

/// Creates a signed, time-limited token for a user
///
/// Signed with HS256; carries the user id as subject plus username and role
/// claims, and expires after `expires_hours`.
pub fn create_token(
    user_id: i64,
    username: &str,
    role: Role,
    secret: &str,
    expires_hours: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let expiry = Utc::now() + Duration::hours(expires_hours);
    let claims = Claims {
        sub: user_id.to_string(),
        username: username.to_string(),
        role,
        iss: ISSUER.to_string(),
        aud: AUDIENCE.to_string(),
        exp: expiry.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
}

/// Verifies signature, expiry, issuer and audience, returning the claims
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default();
    validation.set_issuer(&[ISSUER]);
    validation.set_audience(&[AUDIENCE]);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &validation,
    )
    .map(|data| data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "test-secret-key-for-unit-tests";

    #[test]
    fn create_and_verify_token() {
        let token = create_token(1, "amar", Role::User, TEST_SECRET, 1).expect("valid token");

        let claims = verify_token(&token, TEST_SECRET).expect("valid verification");
        assert_eq!(claims.sub, "1");
        assert_eq!(claims.username, "amar");
        assert_eq!(claims.role, Role::User);
        assert_eq!(claims.iss, ISSUER);
        assert_eq!(claims.aud, AUDIENCE);
    }

    #[test]
    fn wrong_secret_fails() {
        let token = create_token(1, "amar", Role::User, TEST_SECRET, 1).expect("valid token");

        assert!(verify_token(&token, "wrong-secret").is_err());
    }

    #[test]
    fn invalid_token_fails() {
        assert!(verify_token("invalid.token.string", TEST_SECRET).is_err());
    }

    #[test]
    fn wrong_audience_fails() {
        let claims = Claims {
            sub: "1".to_string(),
            username: "amar".to_string(),
            role: Role::User,
            iss: ISSUER.to_string(),
            aud: "someone-else.app".to_string(),
            exp: (Utc::now() + Duration::hours(1)).timestamp() as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(TEST_SECRET.as_ref()),
        )
        .unwrap();

        assert!(verify_token(&token, TEST_SECRET).is_err());
    }

    #[test]
    fn wrong_issuer_fails() {
        let claims = Claims {
            sub: "1".to_string(),
            username: "amar".to_string(),
            role: Role::User,
            iss: "someone-else".to_string(),
            aud: AUDIENCE.to_string(),
            exp: (Utc::now() + Duration::hours(1)).timestamp() as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(TEST_SECRET.as_ref()),
        )
        .unwrap();

        assert!(verify_token(&token, TEST_SECRET).is_err());
    }

    #[test]
    fn token_expiry_set() {
        let token = create_token(1, "amar", Role::User, TEST_SECRET, 8).expect("valid token");

        let claims = verify_token(&token, TEST_SECRET).expect("valid verification");
        let expiry_time = claims.exp as i64;
        let now = Utc::now().timestamp();
        let in_8_hours = (Utc::now() + Duration::hours(8)).timestamp();

        assert!(expiry_time > now);
        assert!(expiry_time <= in_8_hours + 10);
    }
}
