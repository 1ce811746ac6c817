//! PostgreSQL 查询额度仓储实现

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use panel_errors::AppResult;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::{QueryTimer, map_sqlx_error};
use crate::domain::role::{
    NewQueryPermission, QueryPermissionRepository, RoleQueryPermission, UserQueryPermission,
};

pub struct PostgresQueryPermissionRepository {
    pool: PgPool,
}

impl PostgresQueryPermissionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QueryPermissionRepository for PostgresQueryPermissionRepository {
    async fn find_by_user(&self, user_id: i64) -> AppResult<Vec<UserQueryPermission>> {
        let timer = QueryTimer::new("role_query_permissions", "select_by_user");
        timer
            .finish(
                sqlx::query_as::<_, UserQueryPermission>(
                    r#"
                    SELECT u.id, u.role_id, rqp.query_count, rqp.county_code, rqp.industry_code
                    FROM users u
                    LEFT JOIN role_query_permissions rqp ON u.role_id = rqp.role_id
                    WHERE u.id = $1
                    ORDER BY rqp.id
                    "#,
                )
                .bind(user_id)
                .fetch_all(&self.pool)
                .await,
            )
            .map_err(map_sqlx_error)
    }

    async fn insert_many(
        &self,
        role_id: i64,
        entries: &[NewQueryPermission],
        now: DateTime<Utc>,
    ) -> AppResult<Vec<RoleQueryPermission>> {
        if entries.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder = QueryBuilder::<Postgres>::new(
            "INSERT INTO role_query_permissions (role_id, county_code, industry_code, query_count, created_date, update_time) ",
        );
        builder.push_values(entries, |mut row, entry| {
            row.push_bind(role_id)
                .push_bind(entry.county_code)
                .push_bind(entry.industry_code)
                .push_bind(entry.query_count)
                .push_bind(now)
                .push_bind(now);
        });
        builder.push(
            " RETURNING id, role_id, county_code, industry_code, query_count, created_date, update_time",
        );

        let timer = QueryTimer::new("role_query_permissions", "insert");
        timer
            .finish(
                builder
                    .build_query_as::<RoleQueryPermission>()
                    .fetch_all(&self.pool)
                    .await,
            )
            .map_err(map_sqlx_error)
    }

    async fn delete_by_ids(&self, ids: &[i64]) -> AppResult<u64> {
        let timer = QueryTimer::new("role_query_permissions", "delete");
        let result = timer
            .finish(
                sqlx::query("DELETE FROM role_query_permissions WHERE id = ANY($1)")
                    .bind(ids)
                    .execute(&self.pool)
                    .await,
            )
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }
}
