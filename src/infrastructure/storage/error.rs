//! Classification of driver errors into domain-relevant kinds

/// SQLSTATE reported by PostgreSQL for a unique constraint violation
pub const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageErrorKind {
    UniqueViolation,
    Other,
}

/// Classify a driver error by its structured SQLSTATE code.
///
/// Only database-reported errors carry a code; connection, pool and decode
/// failures are always `Other`.
pub fn classify(err: &sqlx::Error) -> StorageErrorKind {
    match err {
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) => {
            StorageErrorKind::UniqueViolation
        }
        _ => StorageErrorKind::Other,
    }
}
