//! PostgreSQL 角色菜单权限仓储实现

use async_trait::async_trait;
use panel_adapter_postgres::TransactionManager;
use panel_errors::{AppError, AppResult};
use sqlx::{Postgres, Transaction};
use tracing::debug;

use super::{QueryTimer, map_sqlx_error};
use crate::domain::role::{Authority, RoleAuthorityRepository, RoleWithAuthorities, diff_ids};

pub struct PostgresRoleAuthorityRepository {
    tx_manager: TransactionManager,
}

impl PostgresRoleAuthorityRepository {
    pub fn new(tx_manager: TransactionManager) -> Self {
        Self { tx_manager }
    }

    async fn apply_diff(
        tx: &mut Transaction<'static, Postgres>,
        role_id: i64,
        authority_ids: &[i64],
    ) -> AppResult<()> {
        // 行锁保证同一角色的并发替换串行执行
        let locked: Option<(i64,)> = sqlx::query_as("SELECT id FROM role WHERE id = $1 FOR UPDATE")
            .bind(role_id)
            .fetch_optional(&mut **tx)
            .await
            .map_err(map_sqlx_error)?;
        if locked.is_none() {
            return Err(AppError::not_found(format!("Role {} not found", role_id)));
        }

        let current: Vec<i64> =
            sqlx::query_scalar("SELECT authority_id FROM role_authority WHERE role_id = $1")
                .bind(role_id)
                .fetch_all(&mut **tx)
                .await
                .map_err(map_sqlx_error)?;

        let (to_add, to_remove) = diff_ids(&current, authority_ids);
        debug!(role_id, added = ?to_add, removed = ?to_remove, "Applying authority diff");

        if !to_remove.is_empty() {
            sqlx::query("DELETE FROM role_authority WHERE role_id = $1 AND authority_id = ANY($2)")
                .bind(role_id)
                .bind(&to_remove)
                .execute(&mut **tx)
                .await
                .map_err(map_sqlx_error)?;
        }

        if !to_add.is_empty() {
            sqlx::query(
                r#"
                INSERT INTO role_authority (role_id, authority_id)
                SELECT $1, UNNEST($2::BIGINT[])
                ON CONFLICT DO NOTHING
                "#,
            )
            .bind(role_id)
            .bind(&to_add)
            .execute(&mut **tx)
            .await
            .map_err(map_sqlx_error)?;
        }

        Ok(())
    }
}

#[async_trait]
impl RoleAuthorityRepository for PostgresRoleAuthorityRepository {
    async fn replace_authorities(&self, role_id: i64, authority_ids: &[i64]) -> AppResult<()> {
        let timer = QueryTimer::new("role_authority", "replace");
        let mut tx = self.tx_manager.begin().await?;

        match timer.finish(Self::apply_diff(&mut tx, role_id, authority_ids).await) {
            Ok(()) => TransactionManager::commit(tx).await,
            Err(e) => {
                TransactionManager::rollback(tx).await?;
                Err(e)
            }
        }
    }

    async fn find_role_with_authorities(
        &self,
        role_id: i64,
    ) -> AppResult<Option<RoleWithAuthorities>> {
        let pool = self.tx_manager.pool();

        let timer = QueryTimer::new("role", "select");
        let role: Option<(i64, String)> = timer
            .finish(
                sqlx::query_as("SELECT id, name FROM role WHERE id = $1")
                    .bind(role_id)
                    .fetch_optional(pool)
                    .await,
            )
            .map_err(map_sqlx_error)?;
        let Some((id, name)) = role else {
            return Ok(None);
        };

        let timer = QueryTimer::new("role_authority", "select");
        let authority = timer
            .finish(
                sqlx::query_as::<_, Authority>(
                    r#"
                    SELECT a.id, a.name, a.code, a.parent_id, a.path, a.sort, a.create_time
                    FROM authority a
                    INNER JOIN role_authority ra ON ra.authority_id = a.id
                    WHERE ra.role_id = $1
                    ORDER BY a.sort ASC, a.id ASC
                    "#,
                )
                .bind(role_id)
                .fetch_all(pool)
                .await,
            )
            .map_err(map_sqlx_error)?;

        Ok(Some(RoleWithAuthorities {
            id,
            name,
            authority,
        }))
    }
}
