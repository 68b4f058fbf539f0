pub mod profile;
pub mod schema;
pub mod user;

use std::sync::Arc;

use thiserror::Error;

use userdir_sql::{SQLStore, Value};

/// Maximum username length in characters.
pub const MAX_USERNAME_LEN: usize = 20;
/// Maximum email length in characters.
pub const MAX_EMAIL_LEN: usize = 120;
/// Maximum bio length in characters.
pub const MAX_BIO_LEN: usize = 200;

/// Directory service error type.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    AlreadyExists(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Storage(String),

    #[error("{0}")]
    Internal(String),
}

impl From<DirectoryError> for userdir_core::ServiceError {
    fn from(e: DirectoryError) -> Self {
        match e {
            DirectoryError::NotFound(m) => userdir_core::ServiceError::NotFound(m),
            DirectoryError::Conflict(m) => userdir_core::ServiceError::Conflict(m),
            DirectoryError::AlreadyExists(m) => userdir_core::ServiceError::AlreadyExists(m),
            DirectoryError::Validation(m) => userdir_core::ServiceError::Validation(m),
            DirectoryError::Storage(m) => userdir_core::ServiceError::Storage(m),
            DirectoryError::Internal(m) => userdir_core::ServiceError::Internal(m),
        }
    }
}

/// The Directory service. Holds the storage backend.
pub struct DirectoryService {
    pub(crate) sql: Arc<dyn SQLStore>,
}

impl DirectoryService {
    /// Create a new DirectoryService, initializing the DB schema.
    pub fn new(sql: Arc<dyn SQLStore>) -> Result<Arc<Self>, DirectoryError> {
        schema::init_schema(sql.as_ref())?;
        Ok(Arc::new(Self { sql }))
    }

    /// Check that a user row exists.
    pub(crate) fn ensure_user_exists(&self, user_id: i64) -> Result<(), DirectoryError> {
        let rows = self
            .sql
            .query(
                "SELECT 1 AS present FROM users WHERE id = ?1",
                &[Value::Integer(user_id)],
            )
            .map_err(|e| DirectoryError::Storage(e.to_string()))?;
        if rows.is_empty() {
            return Err(DirectoryError::NotFound(format!("user {} not found", user_id)));
        }
        Ok(())
    }
}

/// Validate a required string field: present, non-empty, within length.
pub(crate) fn require_field(
    name: &str,
    value: Option<String>,
    max_len: usize,
) -> Result<String, DirectoryError> {
    let value = value
        .ok_or_else(|| DirectoryError::Validation(format!("{} is required", name)))?;
    if value.is_empty() {
        return Err(DirectoryError::Validation(format!("{} must not be empty", name)));
    }
    check_len(name, &value, max_len)?;
    Ok(value)
}

/// Validate an optional string field's length.
pub(crate) fn check_len(name: &str, value: &str, max_len: usize) -> Result<(), DirectoryError> {
    if value.chars().count() > max_len {
        return Err(DirectoryError::Validation(format!(
            "{} exceeds maximum length of {} characters",
            name, max_len
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_field_checks() {
        assert!(require_field("username", Some("alice".to_string()), 20).is_ok());
        assert!(matches!(
            require_field("username", None, 20),
            Err(DirectoryError::Validation(_))
        ));
        assert!(matches!(
            require_field("username", Some(String::new()), 20),
            Err(DirectoryError::Validation(_))
        ));
        assert!(matches!(
            require_field("username", Some("x".repeat(21)), 20),
            Err(DirectoryError::Validation(_))
        ));
    }

    #[test]
    fn check_len_counts_chars_not_bytes() {
        // 20 multibyte characters fit in a 20-char username.
        let name = "ü".repeat(20);
        assert!(check_len("username", &name, 20).is_ok());
        let long = "ü".repeat(21);
        assert!(check_len("username", &long, 20).is_err());
    }
}
