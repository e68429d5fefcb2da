//! Repository for the `counters` table (named id sequences).

use sqlx::PgPool;
use studyhub_core::types::DbId;

/// Provides the atomic find-and-increment used for public ids.
pub struct CounterRepo;

impl CounterRepo {
    /// Increment `name` and return the new value, creating the counter at 1
    /// on first use.
    ///
    /// The upsert is a single statement, so concurrent callers serialize on
    /// the row lock and never observe the same value.
    pub async fn next(pool: &PgPool, name: &str) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "INSERT INTO counters (name, seq) VALUES ($1, 1)
             ON CONFLICT (name) DO UPDATE SET seq = counters.seq + 1
             RETURNING seq",
        )
        .bind(name)
        .fetch_one(pool)
        .await
    }

    /// Last value handed out for `name`, or `None` if never used.
    pub async fn current(pool: &PgPool, name: &str) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>("SELECT seq FROM counters WHERE name = $1")
            .bind(name)
            .fetch_optional(pool)
            .await
    }
}
