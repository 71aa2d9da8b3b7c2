use std::sync::Arc;

use diesel::r2d2::ConnectionManager;
use diesel::sqlite::SqliteConnection;

use moneta_core::db::{self, DbPool};

/// Builds a migrated in-memory database. A single pooled connection keeps
/// the database alive for the lifetime of the pool.
pub fn setup_pool() -> Arc<DbPool> {
    let manager = ConnectionManager::<SqliteConnection>::new(":memory:");
    let pool = diesel::r2d2::Pool::builder()
        .max_size(1)
        .build(manager)
        .expect("Failed to create test database pool");

    db::run_migrations(&pool).expect("Failed to run migrations");

    Arc::new(pool)
}
