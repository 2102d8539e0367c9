use std::sync::Arc;

use serde::Serialize;

use crate::auth::errors::{AuthError, AuthResult};
use crate::auth::jwt::create_token;
use crate::auth::password::{hash_password, verify_password, DUMMY_HASH};
use crate::domain::repositories::UserRepository;
use crate::domain::user::{Role, User, UserRecord};

/// Payload returned on successful authentication
#[derive(Debug, Clone, Serialize)]
pub struct AuthenticationResponse {
    pub token: String,
    pub username: String,
    pub fullname: String,
    pub role: Role,
}

/// Registration input as supplied by the caller
///
/// `role` is accepted for wire compatibility but never honored: stored
/// accounts always start as [`Role::User`].
#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Plaintext; hashed before it reaches the entity
    pub password: String,
    pub role: String,
}

/// Authentication and account management over a [`UserRepository`]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    jwt_secret: String,
    jwt_expires_hours: i64,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        jwt_secret: impl Into<String>,
        jwt_expires_hours: i64,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            users,
            jwt_secret: jwt_secret.into(),
            jwt_expires_hours,
            bcrypt_cost,
        }
    }

    /// Authenticates a username/password pair and issues a signed token
    ///
    /// The bcrypt comparison runs even when no user matches, against
    /// [`DUMMY_HASH`], so an unknown username costs the same as a wrong
    /// password. Both cases fail with the same
    /// [`AuthError::InvalidCredentials`].
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> AuthResult<AuthenticationResponse> {
        let username = username.trim().to_lowercase();
        let user = self
            .users
            .find_by_username(&username)
            .await
            .map_err(AuthError::Repository)?;

        let stored_hash = user.as_ref().map(User::password).unwrap_or(DUMMY_HASH);
        let ok = verify_password(password, stored_hash)?;

        let user = match user {
            Some(user) if ok => user,
            _ => return Err(AuthError::InvalidCredentials),
        };

        let user_id = user
            .id()
            .ok_or_else(|| AuthError::Repository("stored user is missing an id".to_string()))?;
        let token = create_token(
            user_id,
            user.username(),
            user.role(),
            &self.jwt_secret,
            self.jwt_expires_hours,
        )?;

        Ok(AuthenticationResponse {
            token,
            username: user.username().to_string(),
            fullname: user.full_name(),
            role: user.role(),
        })
    }

    /// Registers a new account
    ///
    /// Duplicate checks by normalized username and email run concurrently
    /// and both complete before anything is written. The stored role is
    /// always [`Role::User`], whatever the caller supplied.
    pub async fn register(&self, input: RegisterInput) -> AuthResult<User> {
        let username = input.username.trim().to_lowercase();
        let email = input.email.trim().to_lowercase();

        let (by_username, by_email) = tokio::try_join!(
            self.users.find_by_username(&username),
            self.users.find_by_email(&email),
        )
        .map_err(AuthError::Repository)?;

        if by_username.is_some() {
            return Err(AuthError::UsernameTaken);
        }
        if by_email.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let hashed = hash_password(&input.password, self.bcrypt_cost)?;
        let user = User::new(UserRecord {
            id: None,
            username: input.username,
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            password: hashed,
            role: Role::User.to_string(),
            created_at: None,
            updated_at: None,
        })?;

        self.users.insert(&user).await.map_err(AuthError::Repository)
    }

    /// Every stored account, for the admin-only listing
    pub async fn list_users(&self) -> AuthResult<Vec<User>> {
        self.users.list_all().await.map_err(AuthError::Repository)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::verify_token;
    use crate::infrastructure::repositories::MemoryUserRepository;

    const TEST_SECRET: &str = "test-secret-key-for-unit-tests";
    const TEST_COST: u32 = 4;

    fn service() -> AuthService {
        AuthService::new(
            Arc::new(MemoryUserRepository::new()),
            TEST_SECRET,
            1,
            TEST_COST,
        )
    }

    fn amar_input() -> RegisterInput {
        RegisterInput {
            username: "amar".to_string(),
            first_name: "Amar".to_string(),
            last_name: "Mahmuljin".to_string(),
            email: "amar@example.com".to_string(),
            password: "VeryS3cure1!".to_string(),
            role: "admin".to_string(),
        }
    }

    #[tokio::test]
    async fn register_forces_default_role() {
        let service = service();

        let user = service.register(amar_input()).await.expect("registered");

        assert_eq!(user.role(), Role::User);
        assert!(user.id().is_some());
    }

    #[tokio::test]
    async fn register_rejects_duplicate_username() {
        let service = service();
        service.register(amar_input()).await.expect("registered");

        let mut input = amar_input();
        input.email = "other@example.com".to_string();
        let err = service.register(input).await.expect_err("duplicate");

        assert!(matches!(err, AuthError::UsernameTaken));
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email() {
        let service = service();
        service.register(amar_input()).await.expect("registered");

        let mut input = amar_input();
        input.username = "else".to_string();
        let err = service.register(input).await.expect_err("duplicate");

        assert!(matches!(err, AuthError::EmailTaken));
    }

    #[tokio::test]
    async fn register_surfaces_aggregated_validation_issues() {
        let service = service();

        let mut input = amar_input();
        input.username = ".amar".to_string();
        input.email = "not-an-email".to_string();
        let err = service.register(input).await.expect_err("invalid");

        match err {
            AuthError::Validation(e) => {
                assert_eq!(e.issues.len(), 2);
                assert!(e.issues[0].contains("'username' must start with a letter/number"));
                assert!(e.issues[1].contains("'email' must be a valid email address"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn authenticate_is_case_insensitive_and_returns_claims() {
        let service = service();
        let stored = service.register(amar_input()).await.expect("registered");

        let response = service
            .authenticate("  Amar ", "VeryS3cure1!")
            .await
            .expect("authenticated");

        assert_eq!(response.username, "amar");
        assert_eq!(response.fullname, "Amar Mahmuljin");
        assert_eq!(response.role, Role::User);

        let claims = verify_token(&response.token, TEST_SECRET).expect("valid token");
        assert_eq!(claims.sub, stored.id().unwrap().to_string());
        assert_eq!(claims.username, "amar");
        assert_eq!(claims.role, Role::User);
    }

    #[tokio::test]
    async fn authenticate_unknown_user_fails_generically() {
        let service = service();

        let err = service
            .authenticate("nobody", "VeryS3cure1!")
            .await
            .expect_err("unknown user");

        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn authenticate_wrong_password_fails_generically() {
        let service = service();
        service.register(amar_input()).await.expect("registered");

        let err = service
            .authenticate("amar", "WrongPassw0rd!")
            .await
            .expect_err("wrong password");

        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn list_users_returns_all() {
        let service = service();
        service.register(amar_input()).await.expect("registered");

        let mut input = amar_input();
        input.username = "else".to_string();
        input.email = "else@example.com".to_string();
        service.register(input).await.expect("registered");

        let users = service.list_users().await.expect("listed");
        assert_eq!(users.len(), 2);
    }
}
