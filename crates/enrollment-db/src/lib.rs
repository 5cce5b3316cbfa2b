//! # Enrollment DB
//!
//! PostgreSQL pool initialization, schema migrations, and the mapping from
//! driver errors to [`AppError`] kinds.
//!
//! Connections are checked out of the pool per statement and returned when
//! the statement's future completes or is dropped, so an early return from a
//! request handler never holds a connection.
//!
//! # Example
//!
//! ```ignore
//! use enrollment_db::{init_db_pool, run_migrations};
//!
//! let pool = init_db_pool().await;
//! run_migrations(&pool).await?;
//! ```

use enrollment_core::AppError;
use sqlx::postgres::PgPoolOptions;
use std::env;
use tracing::info;

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Initializes a PostgreSQL connection pool.
///
/// Reads `DATABASE_URL` and, optionally, `DATABASE_MAX_CONNECTIONS` (default 5).
///
/// # Panics
///
/// Panics if `DATABASE_URL` is not set or the connection fails.
pub async fn init_db_pool() -> PgPool {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(5);

    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(&database_url)
        .await
        .expect("Failed to connect to database")
}

/// Applies the embedded migrations under `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(AppError::database)?;

    info!("Database migrations applied");
    Ok(())
}

/// Maps a unique-constraint violation to `Conflict` with `message`; any other
/// driver error becomes a store error.
pub fn unique_violation_or_store(err: sqlx::Error, message: &str) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return AppError::conflict(anyhow::anyhow!("{}", message));
        }
    }
    AppError::database(anyhow::Error::from(err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use enrollment_core::ErrorKind;

    #[test]
    fn test_non_database_error_is_store() {
        let err = unique_violation_or_store(sqlx::Error::RowNotFound, "Email already exists");
        assert_eq!(err.kind, ErrorKind::Store);
    }

    #[test]
    fn test_pool_timeout_is_store() {
        let err = unique_violation_or_store(sqlx::Error::PoolTimedOut, "Username already exists");
        assert_eq!(err.kind, ErrorKind::Store);
    }
}
