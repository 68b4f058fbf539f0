use thiserror::Error;

#[derive(Error, Debug)]
pub enum SQLError {
    #[error("query error: {0}")]
    Query(String),

    #[error("execution error: {0}")]
    Execution(String),

    #[error("connection error: {0}")]
    Connection(String),
}

impl SQLError {
    /// Whether this error was caused by a UNIQUE constraint failure.
    ///
    /// Callers use this to turn a duplicate-key insert into a typed
    /// conflict instead of a generic storage failure.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            SQLError::Execution(msg) => msg.contains("UNIQUE constraint failed"),
            _ => false,
        }
    }
}
