// core/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

/// Every failure a store accessor or domain service can report.
///
/// Not-found lookups are `Ok(None)` at the accessor layer; `NotFound` is raised
/// only where an operation cannot proceed without the row (e.g. adding an
/// unknown product to a basket).
#[derive(Debug, Error)]
pub enum ShopError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("Constraint violated: {0}")]
    Conflict(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Not signed in: {0}")]
    Unauthenticated(String),

    #[error("Upstream service unavailable: {source}")]
    UpstreamUnavailable {
        #[source]
        source: AnyhowError,
    },

    #[error("Transient store failure: {source}")]
    Transient {
        #[source]
        source: sqlx::Error,
    },

    #[error("Preference store failure: {source}")]
    Preferences {
        #[source]
        source: std::io::Error,
    },

    #[error("Database error: {source}")]
    Database {
        #[source]
        source: sqlx::Error,
    },
}

impl ShopError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        ShopError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ShopError::Validation(message.into())
    }

    /// Only busy/locked/timeout failures are worth running again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ShopError::Transient { .. })
    }
}

// SQLite primary result codes that signal lock contention.
const SQLITE_BUSY: &str = "5";
const SQLITE_LOCKED: &str = "6";

enum DriverFailure {
    Constraint(String),
    Contention,
    Other,
}

fn classify(err: &sqlx::Error) -> DriverFailure {
    match err {
        sqlx::Error::Database(db_err) => {
            if db_err.is_unique_violation() || db_err.is_foreign_key_violation() || db_err.is_check_violation() {
                return DriverFailure::Constraint(db_err.message().to_string());
            }
            // Extended codes carry the primary code in the low byte.
            let primary = db_err
                .code()
                .and_then(|code| code.parse::<i64>().ok())
                .map(|code| (code & 0xff).to_string());
            match primary.as_deref() {
                Some(SQLITE_BUSY) | Some(SQLITE_LOCKED) => DriverFailure::Contention,
                _ => DriverFailure::Other,
            }
        }
        sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) => DriverFailure::Contention,
        _ => DriverFailure::Other,
    }
}

impl From<sqlx::Error> for ShopError {
    fn from(err: sqlx::Error) -> Self {
        match classify(&err) {
            DriverFailure::Constraint(message) => ShopError::Conflict(message),
            DriverFailure::Contention => ShopError::Transient { source: err },
            DriverFailure::Other => ShopError::Database { source: err },
        }
    }
}

impl From<AnyhowError> for ShopError {
    fn from(err: AnyhowError) -> Self {
        ShopError::UpstreamUnavailable { source: err }
    }
}

impl From<std::io::Error> for ShopError {
    fn from(err: std::io::Error) -> Self {
        ShopError::Preferences { source: err }
    }
}

pub type ShopResult<T, E = ShopError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_timeouts_are_retryable() {
        let err = ShopError::from(sqlx::Error::PoolTimedOut);
        assert!(err.is_retryable());
    }

    #[test]
    fn row_not_found_is_not_retryable() {
        let err = ShopError::from(sqlx::Error::RowNotFound);
        assert!(!err.is_retryable());
        assert!(matches!(err, ShopError::Database { .. }));
    }

    #[test]
    fn anyhow_maps_to_upstream() {
        let err = ShopError::from(anyhow::anyhow!("completion endpoint returned 503"));
        assert!(matches!(err, ShopError::UpstreamUnavailable { .. }));
        assert!(err.to_string().contains("503"));
    }
}
