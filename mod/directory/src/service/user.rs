use userdir_sql::{Row, SQLError, Value};

use crate::model::{User, UserInput};
use crate::service::{
    require_field, DirectoryError, DirectoryService, MAX_EMAIL_LEN, MAX_USERNAME_LEN,
};

impl DirectoryService {
    /// Create a new user.
    pub fn create_user(&self, input: UserInput) -> Result<User, DirectoryError> {
        let username = require_field("username", input.username, MAX_USERNAME_LEN)?;
        let email = require_field("email", input.email, MAX_EMAIL_LEN)?;

        let id = self
            .sql
            .insert(
                "INSERT INTO users (username, email) VALUES (?1, ?2)",
                &[Value::Text(username.clone()), Value::Text(email.clone())],
            )
            .map_err(|e| user_write_error(e, &username, &email))?;

        Ok(User {
            id,
            username,
            email,
        })
    }

    /// Get a user by id.
    pub fn get_user(&self, id: i64) -> Result<User, DirectoryError> {
        let rows = self
            .sql
            .query(
                "SELECT id, username, email FROM users WHERE id = ?1",
                &[Value::Integer(id)],
            )
            .map_err(|e| DirectoryError::Storage(e.to_string()))?;
        let row = rows
            .first()
            .ok_or_else(|| DirectoryError::NotFound(format!("user {} not found", id)))?;
        user_from_row(row)
    }

    /// List all users in id order.
    pub fn list_users(&self) -> Result<Vec<User>, DirectoryError> {
        let rows = self
            .sql
            .query("SELECT id, username, email FROM users ORDER BY id", &[])
            .map_err(|e| DirectoryError::Storage(e.to_string()))?;
        rows.iter().map(user_from_row).collect()
    }

    /// Update a user, overwriting both fields unconditionally.
    pub fn update_user(&self, id: i64, input: UserInput) -> Result<User, DirectoryError> {
        let username = require_field("username", input.username, MAX_USERNAME_LEN)?;
        let email = require_field("email", input.email, MAX_EMAIL_LEN)?;

        let affected = self
            .sql
            .exec(
                "UPDATE users SET username = ?1, email = ?2 WHERE id = ?3",
                &[
                    Value::Text(username.clone()),
                    Value::Text(email.clone()),
                    Value::Integer(id),
                ],
            )
            .map_err(|e| user_write_error(e, &username, &email))?;

        if affected == 0 {
            return Err(DirectoryError::NotFound(format!("user {} not found", id)));
        }

        Ok(User {
            id,
            username,
            email,
        })
    }

    /// Delete a user by id. The user's profile, if any, goes with it —
    /// user_profiles.user_id is declared ON DELETE CASCADE, so both rows
    /// fall to this single statement.
    pub fn delete_user(&self, id: i64) -> Result<(), DirectoryError> {
        let affected = self
            .sql
            .exec("DELETE FROM users WHERE id = ?1", &[Value::Integer(id)])
            .map_err(|e| DirectoryError::Storage(e.to_string()))?;

        if affected == 0 {
            return Err(DirectoryError::NotFound(format!("user {} not found", id)));
        }
        Ok(())
    }
}

/// Map a user insert/update failure onto a typed error. SQLite names the
/// violated column ("UNIQUE constraint failed: users.username"), which
/// picks the message.
fn user_write_error(err: SQLError, username: &str, email: &str) -> DirectoryError {
    if err.is_unique_violation() {
        let msg = err.to_string();
        if msg.contains("users.username") {
            DirectoryError::Conflict(format!("username '{}' is already taken", username))
        } else if msg.contains("users.email") {
            DirectoryError::Conflict(format!("email '{}' is already in use", email))
        } else {
            DirectoryError::Conflict(msg)
        }
    } else {
        DirectoryError::Storage(err.to_string())
    }
}

fn user_from_row(row: &Row) -> Result<User, DirectoryError> {
    Ok(User {
        id: row
            .get_i64("id")
            .ok_or_else(|| DirectoryError::Internal("missing id column".into()))?,
        username: row
            .get_str("username")
            .ok_or_else(|| DirectoryError::Internal("missing username column".into()))?
            .to_string(),
        email: row
            .get_str("email")
            .ok_or_else(|| DirectoryError::Internal("missing email column".into()))?
            .to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use userdir_sql::sqlite::SqliteStore;

    fn test_service() -> Arc<DirectoryService> {
        let sql = Arc::new(SqliteStore::open_in_memory().unwrap());
        DirectoryService::new(sql).unwrap()
    }

    fn input(username: &str, email: &str) -> UserInput {
        UserInput {
            username: Some(username.to_string()),
            email: Some(email.to_string()),
        }
    }

    #[test]
    fn test_user_crud() {
        let svc = test_service();

        // Create
        let user = svc.create_user(input("alice", "alice@example.com")).unwrap();
        assert_eq!(user.id, 1);
        assert_eq!(user.username, "alice");

        // Get
        let fetched = svc.get_user(user.id).unwrap();
        assert_eq!(fetched.email, "alice@example.com");

        // Update overwrites both fields.
        let updated = svc
            .update_user(user.id, input("alice2", "alice2@example.com"))
            .unwrap();
        assert_eq!(updated.username, "alice2");
        let fetched = svc.get_user(user.id).unwrap();
        assert_eq!(fetched.username, "alice2");
        assert_eq!(fetched.email, "alice2@example.com");

        // List
        svc.create_user(input("bob", "bob@example.com")).unwrap();
        let users = svc.list_users().unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].username, "alice2");
        assert_eq!(users[1].username, "bob");

        // Delete
        svc.delete_user(user.id).unwrap();
        assert!(matches!(svc.get_user(user.id), Err(DirectoryError::NotFound(_))));
    }

    #[test]
    fn test_duplicate_username_rejected() {
        let svc = test_service();
        svc.create_user(input("alice", "alice@example.com")).unwrap();

        let err = svc
            .create_user(input("alice", "other@example.com"))
            .unwrap_err();
        assert!(matches!(err, DirectoryError::Conflict(_)));
        assert!(err.to_string().contains("username"));

        // Store unchanged.
        assert_eq!(svc.list_users().unwrap().len(), 1);
    }

    #[test]
    fn test_duplicate_email_rejected() {
        let svc = test_service();
        svc.create_user(input("alice", "alice@example.com")).unwrap();

        let err = svc
            .create_user(input("bob", "alice@example.com"))
            .unwrap_err();
        assert!(matches!(err, DirectoryError::Conflict(_)));
        assert!(err.to_string().contains("email"));
        assert_eq!(svc.list_users().unwrap().len(), 1);
    }

    #[test]
    fn test_missing_fields_rejected() {
        let svc = test_service();

        let err = svc
            .create_user(UserInput {
                username: None,
                email: Some("a@example.com".to_string()),
            })
            .unwrap_err();
        assert!(matches!(err, DirectoryError::Validation(_)));

        let err = svc
            .create_user(UserInput {
                username: Some("alice".to_string()),
                email: None,
            })
            .unwrap_err();
        assert!(matches!(err, DirectoryError::Validation(_)));

        assert!(svc.list_users().unwrap().is_empty());
    }

    #[test]
    fn test_length_limits() {
        let svc = test_service();

        let err = svc
            .create_user(input(&"x".repeat(21), "a@example.com"))
            .unwrap_err();
        assert!(matches!(err, DirectoryError::Validation(_)));

        let err = svc
            .create_user(input("alice", &format!("{}@x.com", "a".repeat(120))))
            .unwrap_err();
        assert!(matches!(err, DirectoryError::Validation(_)));
    }

    #[test]
    fn test_update_collision_rejected() {
        let svc = test_service();
        svc.create_user(input("alice", "alice@example.com")).unwrap();
        let bob = svc.create_user(input("bob", "bob@example.com")).unwrap();

        let err = svc
            .update_user(bob.id, input("alice", "bob@example.com"))
            .unwrap_err();
        assert!(matches!(err, DirectoryError::Conflict(_)));

        // Bob is untouched.
        assert_eq!(svc.get_user(bob.id).unwrap().username, "bob");
    }

    #[test]
    fn test_update_missing_user() {
        let svc = test_service();
        let err = svc
            .update_user(99, input("ghost", "ghost@example.com"))
            .unwrap_err();
        assert!(matches!(err, DirectoryError::NotFound(_)));
    }

    #[test]
    fn test_delete_twice() {
        let svc = test_service();
        let user = svc.create_user(input("alice", "alice@example.com")).unwrap();

        svc.delete_user(user.id).unwrap();
        let err = svc.delete_user(user.id).unwrap_err();
        assert!(matches!(err, DirectoryError::NotFound(_)));
    }

    #[test]
    fn test_ids_are_not_reused_after_delete() {
        let svc = test_service();
        let a = svc.create_user(input("alice", "alice@example.com")).unwrap();
        svc.delete_user(a.id).unwrap();

        let b = svc.create_user(input("bob", "bob@example.com")).unwrap();
        assert!(b.id > a.id);
    }
}
