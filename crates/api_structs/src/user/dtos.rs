use pulsebridge_domain::{Role, User, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserDTO {
    pub id: ID,
    pub role: Role,
    pub email: String,
    pub username: String,
}

impl UserDTO {
    pub fn new(user: User) -> Self {
        Self {
            id: user.id,
            role: user.role,
            email: user.email,
            username: user.username,
        }
    }
}
