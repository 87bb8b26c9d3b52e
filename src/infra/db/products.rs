use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{Postgres, QueryBuilder};
use time::OffsetDateTime;

use crate::application::repos::{CatalogRepo, ProductDraft, ProductPatch, RepoError};
use crate::domain::catalog::ProductRecord;
use crate::domain::types::Unit;

use super::PostgresStore;
use super::util::map_sqlx_error;

const PRODUCT_COLUMNS: &str = "id, name, price, description, image, unit, stock_quantity, \
     active, sort_order, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    price: Decimal,
    description: String,
    image: Option<String>,
    unit: Unit,
    stock_quantity: i64,
    active: bool,
    sort_order: i32,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl From<ProductRow> for ProductRecord {
    fn from(row: ProductRow) -> Self {
        ProductRecord {
            id: row.id,
            name: row.name,
            price: row.price,
            description: row.description,
            image: row.image,
            unit: row.unit,
            stock_quantity: row.stock_quantity,
            active: row.active,
            sort_order: row.sort_order,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl CatalogRepo for PostgresStore {
    async fn list_products(
        &self,
        include_inactive: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ProductRecord>, RepoError> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE ($1 OR active) \
             ORDER BY sort_order ASC, id ASC LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(include_inactive)
            .bind(limit)
            .bind(offset)
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;
        Ok(rows.into_iter().map(ProductRecord::from).collect())
    }

    async fn count_products(&self, include_inactive: bool) -> Result<i64, RepoError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products WHERE ($1 OR active)")
            .bind(include_inactive)
            .fetch_one(self.pool())
            .await
            .map_err(map_sqlx_error)
    }

    async fn get_product(&self, id: i64) -> Result<Option<ProductRecord>, RepoError> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1 AND active");
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(map_sqlx_error)?;
        Ok(row.map(ProductRecord::from))
    }

    async fn create_product(&self, draft: ProductDraft) -> Result<ProductRecord, RepoError> {
        let sql = format!(
            "INSERT INTO products \
             (name, price, description, image, unit, stock_quantity, sort_order) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {PRODUCT_COLUMNS}"
        );
        let mut tx = self.begin().await.map_err(map_sqlx_error)?;
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(draft.name)
            .bind(draft.price)
            .bind(draft.description)
            .bind(draft.image)
            .bind(draft.unit)
            .bind(draft.stock_quantity)
            .bind(draft.sort_order)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;
        tx.commit().await.map_err(map_sqlx_error)?;
        Ok(ProductRecord::from(row))
    }

    async fn update_product(&self, id: i64, patch: ProductPatch) -> Result<bool, RepoError> {
        let mut qb = QueryBuilder::<Postgres>::new("UPDATE products SET updated_at = now()");
        if let Some(name) = patch.name {
            qb.push(", name = ");
            qb.push_bind(name);
        }
        if let Some(price) = patch.price {
            qb.push(", price = ");
            qb.push_bind(price);
        }
        if let Some(description) = patch.description {
            qb.push(", description = ");
            qb.push_bind(description);
        }
        if let Some(image) = patch.image {
            qb.push(", image = ");
            qb.push_bind(image);
        }
        if let Some(unit) = patch.unit {
            qb.push(", unit = ");
            qb.push_bind(unit);
        }
        if let Some(stock_quantity) = patch.stock_quantity {
            qb.push(", stock_quantity = ");
            qb.push_bind(stock_quantity);
        }
        if let Some(sort_order) = patch.sort_order {
            qb.push(", sort_order = ");
            qb.push_bind(sort_order);
        }
        qb.push(" WHERE id = ");
        qb.push_bind(id);
        qb.push(" AND active");

        let result = qb
            .build()
            .execute(self.pool())
            .await
            .map_err(map_sqlx_error)?;
        Ok(result.rows_affected() > 0)
    }

    async fn soft_delete_product(&self, id: i64) -> Result<bool, RepoError> {
        let result = sqlx::query(
            "UPDATE products SET active = FALSE, updated_at = now() \
             WHERE id = $1 AND active",
        )
        .bind(id)
        .execute(self.pool())
        .await
        .map_err(map_sqlx_error)?;
        Ok(result.rows_affected() > 0)
    }
}
