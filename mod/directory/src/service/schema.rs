use userdir_sql::SQLStore;

use crate::service::DirectoryError;

/// Initialize the SQLite schema for the directory resources.
///
/// Uniqueness of username, email, and the profile's user_id is enforced
/// here by the storage layer; the service maps constraint failures onto
/// typed errors at write time.
pub fn init_schema(sql: &dyn SQLStore) -> Result<(), DirectoryError> {
    let statements = [
        // Users table: core identity.
        "CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            email TEXT NOT NULL UNIQUE
        )",
        // Profiles table: one-to-one onto users via the UNIQUE foreign key.
        // ON DELETE CASCADE makes a user delete remove its profile in the
        // same statement.
        "CREATE TABLE IF NOT EXISTS user_profiles (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            bio TEXT,
            user_id INTEGER NOT NULL UNIQUE,
            FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
        )",
    ];

    for stmt in &statements {
        sql.exec(stmt, &[])
            .map_err(|e| DirectoryError::Storage(e.to_string()))?;
    }

    Ok(())
}
