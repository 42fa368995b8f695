//! PostgreSQL order repository implementation

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use orderdesk_types::{DateWindow, OrderCount, TextMatch};

use crate::error::DbResult;
use crate::models::OrderRow;
use crate::repo::OrderRepository;
use crate::sql::{push_order_count, push_text_match, push_window, ORDER_COLUMNS};

/// PostgreSQL order repository
#[derive(Clone)]
pub struct PgOrderRepository {
    pool: PgPool,
}

impl PgOrderRepository {
    /// Create a new order repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn select() -> QueryBuilder<'static, Postgres> {
        QueryBuilder::new(format!("SELECT {ORDER_COLUMNS} FROM orders WHERE TRUE"))
    }

    fn count() -> QueryBuilder<'static, Postgres> {
        QueryBuilder::new("SELECT COUNT(*) FROM orders WHERE TRUE")
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<OrderRow>> {
        let mut builder = Self::select();
        builder.push(" AND id = ").push_bind(id);

        let order = builder
            .build_query_as::<OrderRow>()
            .fetch_optional(&self.pool)
            .await?;

        Ok(order)
    }

    async fn count_all(&self) -> DbResult<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    async fn list_page(&self, offset: i64, limit: i64) -> DbResult<Vec<OrderRow>> {
        let mut builder = Self::select();
        builder
            .push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let orders = builder
            .build_query_as::<OrderRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(orders)
    }

    async fn count_matching(&self, text: &TextMatch) -> DbResult<i64> {
        let mut builder = Self::count();
        push_text_match(&mut builder, text);

        let count = builder
            .build_query_as::<(i64,)>()
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    async fn search(&self, text: &TextMatch, limit: i64) -> DbResult<Vec<OrderRow>> {
        let mut builder = Self::select();
        push_text_match(&mut builder, text);
        builder
            .push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(limit);

        let orders = builder
            .build_query_as::<OrderRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(orders)
    }

    async fn full_text_search(&self, query: &str, limit: i64) -> DbResult<Vec<OrderRow>> {
        let sql = format!(
            r#"
            SELECT {ORDER_COLUMNS}
            FROM orders
            WHERE to_tsvector('english', COALESCE(company_details, ''))
                  @@ plainto_tsquery('english', $1)
            ORDER BY ts_rank(
                         to_tsvector('english', COALESCE(company_details, '')),
                         plainto_tsquery('english', $1)
                     ) DESC,
                     created_at DESC
            LIMIT $2
            "#
        );

        let orders = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(query)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(orders)
    }

    async fn update_payment_status(&self, id: Uuid, status: &str) -> DbResult<Option<OrderRow>> {
        let sql = format!(
            r#"
            UPDATE orders
            SET payment_status = $2
            WHERE id = $1
            RETURNING {ORDER_COLUMNS}
            "#
        );

        let order = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(id)
            .bind(status)
            .fetch_optional(&self.pool)
            .await?;

        Ok(order)
    }

    async fn count_for_statistics(
        &self,
        which: OrderCount,
        window: &DateWindow,
    ) -> DbResult<i64> {
        let mut builder = Self::count();
        push_order_count(&mut builder, which);
        push_window(&mut builder, window);

        let count = builder
            .build_query_as::<(i64,)>()
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
