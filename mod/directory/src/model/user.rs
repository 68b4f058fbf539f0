use serde::{Deserialize, Serialize};

/// A user identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier, assigned by the database. Immutable.
    pub id: i64,

    /// Display name. Unique across all users, max 20 characters.
    pub username: String,

    /// Email address. Unique across all users, max 120 characters.
    pub email: String,
}

/// Input payload for creating or updating a user.
///
/// Both fields are required; they are Options so a missing field in the
/// request body is reported as a validation error instead of a
/// deserialization failure. Updates overwrite both fields unconditionally.
#[derive(Debug, Clone, Deserialize)]
pub struct UserInput {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}
