use thiserror::Error;

pub type DbResult<T> = Result<T, DbError>;

/// Coarse classification callers use to decide how to report a [`DbError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Storage,
}

#[derive(Debug, Error)]
pub enum DbError {
    #[error("Invalid page number {0}: pages start at 1")]
    InvalidPage(i64),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("{entity} {id} has no created_at timestamp")]
    MissingTimestamp { entity: &'static str, id: i64 },

    #[error("Nice counter overflow on article {0}")]
    CounterOverflow(i64),

    #[error("Database lock poisoned")]
    LockPoisoned,

    #[error("Database error: {0}")]
    Storage(#[from] rusqlite::Error),
}

impl DbError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DbError::InvalidPage(_) => ErrorKind::Validation,
            DbError::NotFound { .. } => ErrorKind::NotFound,
            DbError::MissingTimestamp { .. }
            | DbError::CounterOverflow(_)
            | DbError::LockPoisoned
            | DbError::Storage(_) => ErrorKind::Storage,
        }
    }

    /// True when SQLite rejected a write because of a NOT NULL, CHECK or
    /// foreign key constraint.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            DbError::Storage(e)
                if e.sqlite_error_code() == Some(rusqlite::ErrorCode::ConstraintViolation)
        )
    }
}
