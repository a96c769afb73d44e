use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// User roles
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    ToSchema,
    strum::Display,
    strum::EnumString,
)]
pub enum Role {
    #[default]
    Employee,
    Manager,
    Admin,
}

/// User entity as stored in MongoDB
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Unique identifier
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Unique username (case-sensitive as stored)
    pub username: String,
    /// Bcrypt password hash, never exposed through [`UserResponse`]
    pub password_hash: String,
    /// Assigned roles (non-empty)
    pub roles: Vec<Role>,
    /// Account active status
    pub active: bool,
}

impl User {
    /// Create a new user (password must already be hashed by the service layer)
    pub fn new(username: String, password_hash: String, roles: Vec<Role>) -> Self {
        Self {
            id: Uuid::now_v7(),
            username,
            password_hash,
            roles,
            active: true,
        }
    }
}

/// User response DTO (without the password hash)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub roles: Vec<Role>,
    pub active: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            roles: user.roles,
            active: user.active,
        }
    }
}

/// DTO for creating a new user
///
/// Every field is optional at the wire level; the service enforces presence
/// so that a missing field yields the documented validation message rather
/// than a deserialization error.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateUser {
    pub username: Option<String>,
    pub password: Option<String>,
    pub roles: Option<Vec<Role>>,
}

/// DTO for updating an existing user
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateUser {
    pub id: Option<Uuid>,
    pub username: Option<String>,
    pub roles: Option<Vec<Role>>,
    pub active: Option<bool>,
    /// If supplied and non-empty, the password hash is recomputed
    pub password: Option<String>,
}

/// DTO for deleting a user
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct DeleteUser {
    pub id: Option<Uuid>,
}

/// Success payload for create/update operations
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_defaults_to_active() {
        let user = User::new("hank".into(), "$2b$10$hash".into(), vec![Role::Employee]);
        assert!(user.active);
        assert_eq!(user.roles, vec![Role::Employee]);
    }

    #[test]
    fn response_omits_password_hash() {
        let user = User::new("hank".into(), "$2b$10$hash".into(), vec![Role::Manager]);
        let response = UserResponse::from(user);
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("password").is_none());
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["username"], "hank");
    }

    #[test]
    fn role_round_trips_through_serde() {
        let json = serde_json::to_string(&Role::Manager).unwrap();
        assert_eq!(json, "\"Manager\"");
        let role: Role = serde_json::from_str("\"Admin\"").unwrap();
        assert_eq!(role, Role::Admin);
    }

    #[test]
    fn unknown_role_is_rejected() {
        let result: Result<Role, _> = serde_json::from_str("\"Intern\"");
        assert!(result.is_err());
    }
}
