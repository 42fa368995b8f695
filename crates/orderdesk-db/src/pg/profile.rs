//! PostgreSQL profile repository implementation

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use orderdesk_types::DateWindow;

use crate::error::DbResult;
use crate::models::ProfileRow;
use crate::repo::ProfileRepository;
use crate::sql::{escape_like, push_window};

/// PostgreSQL profile repository
#[derive(Clone)]
pub struct PgProfileRepository {
    pool: PgPool,
}

impl PgProfileRepository {
    /// Create a new profile repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    async fn find_by_ids(&self, ids: &[Uuid]) -> DbResult<Vec<ProfileRow>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let profiles = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT id, email, first_name, last_name, created_at
            FROM profiles
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(profiles)
    }

    async fn search(&self, needle: &str) -> DbResult<Vec<ProfileRow>> {
        let pattern = format!("%{}%", escape_like(needle));

        let profiles = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT id, email, first_name, last_name, created_at
            FROM profiles
            WHERE first_name ILIKE $1 OR last_name ILIKE $1 OR email ILIKE $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(profiles)
    }

    async fn count_created(&self, window: &DateWindow) -> DbResult<i64> {
        let mut builder: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM profiles WHERE TRUE");
        push_window(&mut builder, window);

        let count = builder
            .build_query_as::<(i64,)>()
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
