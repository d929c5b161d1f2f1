use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

/// Unknown roles are treated as regular users so that a misconfigured
/// record never gains elevated privileges
impl From<&str> for Role {
    fn from(role: &str) -> Self {
        match role {
            "admin" => Role::Admin,
            _ => Role::User,
        }
    }
}

/// A `User` of the platform as resolved by the upstream auth gateway.
///
/// Users are owned by the wider platform, this service only reads them
/// to authorize requests and to address notifications.
#[derive(Debug, Clone)]
pub struct User {
    pub id: ID,
    pub role: Role,
    pub email: String,
    pub username: String,
}

impl User {
    pub fn new(email: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: Default::default(),
            role: Role::User,
            email: email.into(),
            username: username.into(),
        }
    }

    pub fn new_admin(email: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            role: Role::Admin,
            ..Self::new(email, username)
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl Entity for User {
    fn id(&self) -> &ID {
        &self.id
    }
}
