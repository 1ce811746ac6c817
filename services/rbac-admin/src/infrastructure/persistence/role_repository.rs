//! PostgreSQL 角色仓储实现

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use panel_common::Pagination;
use panel_errors::AppResult;
use sqlx::PgPool;

use super::{QueryTimer, map_sqlx_error};
use crate::domain::role::{NewRole, Role, RoleRepository};

const ROLE_COLUMNS: &str =
    "id, name, description, code, create_time, update_time, is_delete, delete_time";

pub struct PostgresRoleRepository {
    pool: PgPool,
}

impl PostgresRoleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, column: &'static str, value: &str) -> AppResult<Option<Role>> {
        let sql = format!(
            "SELECT {} FROM role WHERE {} = $1 ORDER BY id LIMIT 1",
            ROLE_COLUMNS, column
        );
        let timer = QueryTimer::new("role", "select");
        timer
            .finish(
                sqlx::query_as::<_, Role>(&sql)
                    .bind(value)
                    .fetch_optional(&self.pool)
                    .await,
            )
            .map_err(map_sqlx_error)
    }
}

#[async_trait]
impl RoleRepository for PostgresRoleRepository {
    async fn create(&self, role: &NewRole) -> AppResult<Role> {
        let sql = format!(
            r#"
            INSERT INTO role (name, description, code, create_time, update_time, is_delete)
            VALUES ($1, $2, $3, $4, $4, FALSE)
            RETURNING {}
            "#,
            ROLE_COLUMNS
        );
        let timer = QueryTimer::new("role", "insert");
        timer
            .finish(
                sqlx::query_as::<_, Role>(&sql)
                    .bind(&role.name)
                    .bind(&role.desc)
                    .bind(&role.code)
                    .bind(role.create_time)
                    .fetch_one(&self.pool)
                    .await,
            )
            .map_err(map_sqlx_error)
    }

    async fn update(&self, id: i64, name: &str, desc: &str, now: DateTime<Utc>) -> AppResult<u64> {
        let timer = QueryTimer::new("role", "update");
        let result = timer
            .finish(
                sqlx::query(
                    "UPDATE role SET name = $2, description = $3, update_time = $4 WHERE id = $1",
                )
                .bind(id)
                .bind(name)
                .bind(desc)
                .bind(now)
                .execute(&self.pool)
                .await,
            )
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }

    async fn soft_delete(&self, ids: &[i64], now: DateTime<Utc>) -> AppResult<u64> {
        let timer = QueryTimer::new("role", "soft_delete");
        let result = timer
            .finish(
                sqlx::query(
                    "UPDATE role SET is_delete = TRUE, delete_time = $2 WHERE id = ANY($1)",
                )
                .bind(ids)
                .bind(now)
                .execute(&self.pool)
                .await,
            )
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Role>> {
        let sql = format!("SELECT {} FROM role WHERE id = $1", ROLE_COLUMNS);
        let timer = QueryTimer::new("role", "select");
        timer
            .finish(
                sqlx::query_as::<_, Role>(&sql)
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await,
            )
            .map_err(map_sqlx_error)
    }

    async fn find_by_code(&self, code: &str) -> AppResult<Option<Role>> {
        self.find_one("code", code).await
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Role>> {
        self.find_one("name", name).await
    }

    async fn list(
        &self,
        name: Option<&str>,
        pagination: Pagination,
    ) -> AppResult<(Vec<Role>, i64)> {
        let pattern = name.map(|n| format!("%{}%", n));

        let sql = format!(
            r#"
            SELECT {} FROM role
            WHERE is_delete = FALSE AND ($1::TEXT IS NULL OR name LIKE $1)
            ORDER BY name ASC, code ASC
            LIMIT $2 OFFSET $3
            "#,
            ROLE_COLUMNS
        );
        let timer = QueryTimer::new("role", "list");
        let rows = timer
            .finish(
                sqlx::query_as::<_, Role>(&sql)
                    .bind(&pattern)
                    .bind(pagination.limit() as i64)
                    .bind(pagination.offset() as i64)
                    .fetch_all(&self.pool)
                    .await,
            )
            .map_err(map_sqlx_error)?;

        let timer = QueryTimer::new("role", "count");
        let count: (i64,) = timer
            .finish(
                sqlx::query_as(
                    "SELECT COUNT(*) FROM role WHERE is_delete = FALSE AND ($1::TEXT IS NULL OR name LIKE $1)",
                )
                .bind(&pattern)
                .fetch_one(&self.pool)
                .await,
            )
            .map_err(map_sqlx_error)?;

        Ok((rows, count.0))
    }

    async fn list_all(&self) -> AppResult<Vec<Role>> {
        let sql = format!(
            "SELECT {} FROM role WHERE is_delete = FALSE ORDER BY name ASC, code ASC",
            ROLE_COLUMNS
        );
        let timer = QueryTimer::new("role", "list");
        timer
            .finish(sqlx::query_as::<_, Role>(&sql).fetch_all(&self.pool).await)
            .map_err(map_sqlx_error)
    }
}
