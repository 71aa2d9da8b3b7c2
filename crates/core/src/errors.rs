use diesel::result::DatabaseErrorKind;
use diesel::result::Error as DieselError;
use thiserror::Error;

// Create a type alias for Result using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the notification engine
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Storage operation failed: {0}")]
    Store(#[from] StoreError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(#[from] diesel::result::ConnectionError),

    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(#[from] r2d2::Error),

    #[error("Database query failed: {0}")]
    QueryFailed(#[from] DieselError),

    #[error("Database migration failed: {0}")]
    MigrationFailed(String),
}

/// Failure reasons reported by the record stores.
///
/// Callers branch on these variants: `NotFound` drives create-on-read,
/// `PermissionDenied` drives the session refresh-and-retry path, and
/// `UniqueConflict` drives the update-then-insert fallback.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    #[error("table missing: {0}")]
    MissingTable(String),

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("unique constraint conflict: {0}")]
    UniqueConflict(String),

    #[error("storage failure: {0}")]
    Other(String),
}

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),
}

impl From<DieselError> for StoreError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => StoreError::NotFound,
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                StoreError::UniqueConflict(info.message().to_string())
            }
            DieselError::DatabaseError(DatabaseErrorKind::ReadOnlyTransaction, info) => {
                StoreError::PermissionDenied(info.message().to_string())
            }
            DieselError::DatabaseError(_, info) => {
                let message = info.message().to_string();
                if message.contains("no such table") {
                    StoreError::MissingTable(message)
                } else if message.contains("readonly") || message.contains("not authorized") {
                    StoreError::PermissionDenied(message)
                } else {
                    StoreError::Other(message)
                }
            }
            other => StoreError::Other(other.to_string()),
        }
    }
}

// Implement From for DieselError to Error directly
impl From<DieselError> for Error {
    fn from(err: DieselError) -> Self {
        Error::Database(DatabaseError::QueryFailed(err))
    }
}

impl From<r2d2::Error> for Error {
    fn from(err: r2d2::Error) -> Self {
        Error::Database(DatabaseError::PoolCreationFailed(err))
    }
}

impl From<r2d2::Error> for StoreError {
    fn from(err: r2d2::Error) -> Self {
        StoreError::Other(err.to_string())
    }
}
