use serde::{Deserialize, Serialize};

/// A user's profile. At most one per user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Unique identifier, assigned by the database.
    pub id: i64,

    /// Free-form bio text, max 200 characters.
    pub bio: Option<String>,

    /// The owning user's id. Unique — enforces the one-to-one mapping.
    pub user_id: i64,
}

/// Input for creating a profile.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProfile {
    /// Required; an Option so a missing field yields a validation error.
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub bio: Option<String>,
}

/// Input for updating a profile. The bio is overwritten with the given
/// value; omitting it clears the bio.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProfile {
    #[serde(default)]
    pub bio: Option<String>,
}
