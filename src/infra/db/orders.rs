use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::types::Json;
use time::OffsetDateTime;

use crate::application::repos::{AggregateStats, DailyStat, NewOrder, OrdersRepo, RepoError};
use crate::domain::orders::{CartItem, OrderRecord};
use crate::domain::types::OrderStatus;

use super::PostgresStore;
use super::util::map_sqlx_error;

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: i64,
    cart: Json<Vec<CartItem>>,
    customer_phone: Option<String>,
    total: Decimal,
    status: OrderStatus,
    notes: Option<String>,
    created_at: OffsetDateTime,
}

impl From<OrderRow> for OrderRecord {
    fn from(row: OrderRow) -> Self {
        OrderRecord {
            id: row.id,
            cart: row.cart.0,
            customer_phone: row.customer_phone,
            total: row.total,
            status: row.status,
            notes: row.notes,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl OrdersRepo for PostgresStore {
    async fn create_order(&self, order: NewOrder) -> Result<i64, RepoError> {
        let mut tx = self.begin().await.map_err(map_sqlx_error)?;
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO orders (cart, customer_phone, total, status, notes) \
             VALUES ($1, $2, $3, $4, $5) RETURNING id",
        )
        .bind(Json(order.cart))
        .bind(order.customer_phone)
        .bind(order.total)
        .bind(OrderStatus::Pending)
        .bind(order.notes)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;
        tx.commit().await.map_err(map_sqlx_error)?;
        Ok(id)
    }

    async fn recent_orders(&self, limit: i64, offset: i64) -> Result<Vec<OrderRecord>, RepoError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            "SELECT id, cart, customer_phone, total, status, notes, created_at \
             FROM orders ORDER BY created_at DESC, id DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;
        Ok(rows.into_iter().map(OrderRecord::from).collect())
    }

    async fn analytics(&self, days: u32, detailed: bool) -> Result<AggregateStats, RepoError> {
        let days = i32::try_from(days)
            .map_err(|_| RepoError::InvalidInput {
                message: "analytics window out of range".to_string(),
            })?;

        let (order_count, revenue) = sqlx::query_as::<_, (i64, Decimal)>(
            "SELECT COUNT(*), COALESCE(SUM(total), 0) FROM orders \
             WHERE created_at >= now() - make_interval(days => $1)",
        )
        .bind(days)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        let average_order = if order_count > 0 {
            (revenue / Decimal::from(order_count)).round_dp(2)
        } else {
            Decimal::ZERO
        };

        let daily = if detailed {
            let rows = sqlx::query_as::<_, (String, i64, Decimal)>(
                "SELECT to_char(created_at::date, 'YYYY-MM-DD'), COUNT(*), \
                 COALESCE(SUM(total), 0) FROM orders \
                 WHERE created_at >= now() - make_interval(days => $1) \
                 GROUP BY created_at::date ORDER BY created_at::date DESC",
            )
            .bind(days)
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;
            Some(
                rows.into_iter()
                    .map(|(day, order_count, revenue)| DailyStat {
                        day,
                        order_count,
                        revenue,
                    })
                    .collect(),
            )
        } else {
            None
        };

        Ok(AggregateStats {
            window_days: days as u32,
            order_count,
            revenue,
            average_order,
            daily,
        })
    }
}
