use async_trait::async_trait;

use crate::application::repos::{DiagnosticRecord, DiagnosticsRepo, RepoError};

use super::PostgresStore;
use super::util::map_sqlx_error;

#[async_trait]
impl DiagnosticsRepo for PostgresStore {
    async fn health_check(&self) -> Result<DiagnosticRecord, RepoError> {
        let products_table = self.table_exists("public.products").await?;
        let orders_table = self.table_exists("public.orders").await?;

        let product_count = if products_table {
            Some(self.count_rows("products").await?)
        } else {
            None
        };
        let order_count = if orders_table {
            Some(self.count_rows("orders").await?)
        } else {
            None
        };

        let (writable, failure) = match self.write_probe().await {
            Ok(()) => (true, None),
            Err(err) => (false, Some(err.to_string())),
        };

        Ok(DiagnosticRecord {
            products_table,
            orders_table,
            product_count,
            order_count,
            writable,
            failure,
        })
    }
}

impl PostgresStore {
    async fn table_exists(&self, qualified: &str) -> Result<bool, RepoError> {
        sqlx::query_scalar::<_, bool>("SELECT to_regclass($1) IS NOT NULL")
            .bind(qualified)
            .fetch_one(self.pool())
            .await
            .map_err(map_sqlx_error)
    }

    async fn count_rows(&self, table: &str) -> Result<i64, RepoError> {
        // `table` is one of two literals supplied by health_check, never
        // caller input.
        let sql = format!("SELECT COUNT(*) FROM {table}");
        sqlx::query_scalar::<_, i64>(&sql)
            .fetch_one(self.pool())
            .await
            .map_err(map_sqlx_error)
    }

    /// Round-trip a write inside a transaction against a temp table that
    /// drops itself on commit.
    async fn write_probe(&self) -> Result<(), sqlx::Error> {
        let mut tx = self.begin().await?;
        sqlx::query("CREATE TEMPORARY TABLE bottega_write_probe (v integer) ON COMMIT DROP")
            .execute(&mut *tx)
            .await?;
        sqlx::query("INSERT INTO bottega_write_probe (v) VALUES (1)")
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }
}
