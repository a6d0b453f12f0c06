//! Translation of driver errors into [`CoreError`].

use assetdeck_core::error::CoreError;

/// SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// SQLSTATE classes that describe a transient condition on the server side:
/// connection exceptions, insufficient resources, operator intervention
/// (e.g. admin shutdown) and transaction rollbacks (serialization, deadlock).
const TRANSIENT_CLASSES: &[&str] = &["08", "53", "57", "40"];

/// Map a `sqlx::Error` onto the domain taxonomy.
///
/// - Unique violations become [`CoreError::Conflict`].
/// - Pool, I/O, TLS and protocol failures, plus transient SQLSTATE classes,
///   become [`CoreError::StorageUnavailable`].
/// - Decode failures become [`CoreError::CorruptRow`].
/// - Everything else is [`CoreError::Internal`].
pub fn map_sqlx_error(err: sqlx::Error) -> CoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            let code = db_err.code().map(|c| c.into_owned()).unwrap_or_default();
            if code == UNIQUE_VIOLATION {
                let constraint = db_err.constraint().unwrap_or("unknown");
                return CoreError::Conflict(format!(
                    "Duplicate value violates unique constraint: {constraint}"
                ));
            }
            if TRANSIENT_CLASSES.iter().any(|class| code.starts_with(class)) {
                return CoreError::StorageUnavailable(db_err.to_string());
            }
            CoreError::Internal(db_err.to_string())
        }
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::Protocol(_) => CoreError::StorageUnavailable(err.to_string()),
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => CoreError::CorruptRow {
            id: "unknown".to_string(),
            reason: err.to_string(),
        },
        other => CoreError::Internal(other.to_string()),
    }
}
