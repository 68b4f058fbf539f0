use userdir_sql::{Row, Value};

use crate::model::UserProfile;
use crate::service::{check_len, DirectoryError, DirectoryService, MAX_BIO_LEN};

impl DirectoryService {
    /// Get the profile owned by a user.
    ///
    /// A missing user and a missing profile are both 404s, but with
    /// distinct messages — clients rely on the profile message to tell
    /// "no such user" from "user exists, no profile yet".
    pub fn get_profile(&self, user_id: i64) -> Result<UserProfile, DirectoryError> {
        self.ensure_user_exists(user_id)?;

        let rows = self
            .sql
            .query(
                "SELECT id, bio, user_id FROM user_profiles WHERE user_id = ?1",
                &[Value::Integer(user_id)],
            )
            .map_err(|e| DirectoryError::Storage(e.to_string()))?;
        let row = rows
            .first()
            .ok_or_else(|| DirectoryError::NotFound(profile_not_found(user_id)))?;
        profile_from_row(row)
    }

    /// Create a profile for a user. Fails if the user already has one.
    ///
    /// The user-existence check comes first: a request naming a missing
    /// user is 404 regardless of what else is wrong with the payload.
    pub fn create_profile(
        &self,
        user_id: i64,
        bio: Option<String>,
    ) -> Result<UserProfile, DirectoryError> {
        self.ensure_user_exists(user_id)?;
        if let Some(ref bio) = bio {
            check_len("bio", bio, MAX_BIO_LEN)?;
        }

        let bio_value = match &bio {
            Some(b) => Value::Text(b.clone()),
            None => Value::Null,
        };

        let id = self
            .sql
            .insert(
                "INSERT INTO user_profiles (bio, user_id) VALUES (?1, ?2)",
                &[bio_value, Value::Integer(user_id)],
            )
            .map_err(|e| {
                if e.is_unique_violation() {
                    DirectoryError::AlreadyExists(format!(
                        "user {} already has a profile",
                        user_id
                    ))
                } else {
                    DirectoryError::Storage(e.to_string())
                }
            })?;

        Ok(UserProfile { id, bio, user_id })
    }

    /// Update a user's profile, overwriting the bio.
    pub fn update_profile(
        &self,
        user_id: i64,
        bio: Option<String>,
    ) -> Result<UserProfile, DirectoryError> {
        self.ensure_user_exists(user_id)?;
        if let Some(ref bio) = bio {
            check_len("bio", bio, MAX_BIO_LEN)?;
        }

        let bio_value = match &bio {
            Some(b) => Value::Text(b.clone()),
            None => Value::Null,
        };

        let affected = self
            .sql
            .exec(
                "UPDATE user_profiles SET bio = ?1 WHERE user_id = ?2",
                &[bio_value, Value::Integer(user_id)],
            )
            .map_err(|e| DirectoryError::Storage(e.to_string()))?;

        if affected == 0 {
            return Err(DirectoryError::NotFound(profile_not_found(user_id)));
        }

        self.get_profile(user_id)
    }

    /// Delete a user's profile. The user itself is untouched.
    pub fn delete_profile(&self, user_id: i64) -> Result<(), DirectoryError> {
        self.ensure_user_exists(user_id)?;

        let affected = self
            .sql
            .exec(
                "DELETE FROM user_profiles WHERE user_id = ?1",
                &[Value::Integer(user_id)],
            )
            .map_err(|e| DirectoryError::Storage(e.to_string()))?;

        if affected == 0 {
            return Err(DirectoryError::NotFound(profile_not_found(user_id)));
        }
        Ok(())
    }
}

fn profile_not_found(user_id: i64) -> String {
    format!("UserProfile not found for user {}", user_id)
}

fn profile_from_row(row: &Row) -> Result<UserProfile, DirectoryError> {
    Ok(UserProfile {
        id: row
            .get_i64("id")
            .ok_or_else(|| DirectoryError::Internal("missing id column".into()))?,
        bio: row.get_str("bio").map(|s| s.to_string()),
        user_id: row
            .get_i64("user_id")
            .ok_or_else(|| DirectoryError::Internal("missing user_id column".into()))?,
    })
}
