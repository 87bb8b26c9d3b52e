//! Postgres-backed store adapter.

mod diagnostics;
mod orders;
mod products;
mod util;

pub use util::map_sqlx_error;

use std::sync::Arc;
use std::time::Duration;

use sqlx::{
    Postgres, Transaction,
    postgres::{PgPool, PgPoolOptions},
};
use tracing::warn;

const MAX_BACKOFF: Duration = Duration::from_secs(8);

#[derive(Clone)]
pub struct PostgresStore {
    pool: Arc<PgPool>,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn begin(&self) -> Result<Transaction<'_, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }

    pub async fn connect(url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
        PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
    }

    /// Establish the pool with a bounded retry budget and exponential
    /// backoff. Exhausting the budget is a fatal startup failure; there is
    /// no per-request reconnect.
    pub async fn connect_with_retry(
        url: &str,
        max_connections: u32,
        attempts: u32,
        base_delay: Duration,
    ) -> Result<PgPool, sqlx::Error> {
        let attempts = attempts.max(1);
        let mut attempt = 1u32;
        loop {
            match Self::connect(url, max_connections).await {
                Ok(pool) => return Ok(pool),
                Err(err) if attempt < attempts => {
                    let delay = backoff_delay(attempt, base_delay);
                    warn!(
                        target = "bottega::db",
                        error = %err,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        "database connection failed; retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
        sqlx::migrate!("./migrations")
            .run(pool)
            .await
            .map_err(Into::into)
    }
}

fn backoff_delay(attempt: u32, base: Duration) -> Duration {
    let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
    base.saturating_mul(factor).min(MAX_BACKOFF)
}
