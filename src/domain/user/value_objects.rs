use serde::{Deserialize, Serialize};

/// Access role attached to a user account
///
/// Serialized in lowercase on the wire and in token claims. New accounts
/// created through self-registration always start as [`Role::User`];
/// elevated roles are only ever assigned out of band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
    Guest,
}

impl Role {
    /// Every valid role, in the order used by validation messages
    pub const ALL: [Role; 3] = [Role::User, Role::Admin, Role::Guest];

    /// Parses the lowercase wire form
    ///
    /// Unknown values return `None`; the user validator turns that into an
    /// aggregated issue rather than a hard error here.
    pub fn parse(value: &str) -> Option<Role> {
        match value {
            "user" => Some(Role::User),
            "admin" => Some(Role::Admin),
            "guest" => Some(Role::Guest),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
            Role::Guest => "guest",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
