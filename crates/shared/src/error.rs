#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Membership lookup failed. Fatal to the operation that needed the scope.
    #[error("scope resolution failed")]
    Scope(#[source] sqlx::Error),

    /// Local pre-submission check failed. Never reaches the store.
    #[error("{0}")]
    Validation(String),

    /// Unique-index violation surfaced as a user-correctable message.
    #[error("{0}")]
    Conflict(String),

    /// A write failed for another reason. Message is user-facing.
    #[error("{0}")]
    Remote(String),

    /// Row missing or not visible to the caller.
    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error("password hash failure")]
    PasswordHash(#[from] argon2::password_hash::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// True for unique-index violations, the signal used to detect duplicate
/// pseudo and duplicate-membership races.
pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    match e {
        sqlx::Error::Database(db) => db.is_unique_violation(),
        _ => false,
    }
}

impl Error {
    pub fn is_unique_violation(&self) -> bool {
        match self {
            Error::Database(e) => is_unique_violation(e),
            _ => false,
        }
    }
}

#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::Error::Remote(format!($msg)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::Error::Remote(format!($fmt, $($arg)*)))
    };
}

#[macro_export]
macro_rules! invalid {
    ($msg:literal $(,)?) => {
        return Err($crate::Error::Validation(format!($msg)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::Error::Validation(format!($fmt, $($arg)*)))
    };
}

#[macro_export]
macro_rules! conflict {
    ($msg:literal $(,)?) => {
        return Err($crate::Error::Conflict(format!($msg)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::Error::Conflict(format!($fmt, $($arg)*)))
    };
}

#[macro_export]
macro_rules! not_found {
    ($msg:literal $(,)?) => {
        return Err($crate::Error::NotFound(format!($msg)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::Error::NotFound(format!($fmt, $($arg)*)))
    };
}
