//! PostgreSQL 角色接口资源仓储实现

use async_trait::async_trait;
use panel_adapter_postgres::TransactionManager;
use panel_errors::{AppError, AppResult};
use sqlx::{Postgres, QueryBuilder, Transaction};

use super::{QueryTimer, map_sqlx_error};
use crate::domain::role::{RoleApiResource, RoleApiResourceRepository};

pub struct PostgresRoleApiResourceRepository {
    tx_manager: TransactionManager,
}

impl PostgresRoleApiResourceRepository {
    pub fn new(tx_manager: TransactionManager) -> Self {
        Self { tx_manager }
    }

    async fn delete_then_insert(
        tx: &mut Transaction<'static, Postgres>,
        role_id: i64,
        api_resource_ids: &[i64],
    ) -> AppResult<Vec<RoleApiResource>> {
        let locked: Option<(i64,)> = sqlx::query_as("SELECT id FROM role WHERE id = $1 FOR UPDATE")
            .bind(role_id)
            .fetch_optional(&mut **tx)
            .await
            .map_err(map_sqlx_error)?;
        if locked.is_none() {
            return Err(AppError::not_found(format!("Role {} not found", role_id)));
        }

        sqlx::query("DELETE FROM role_api_resource WHERE role_id = $1")
            .bind(role_id)
            .execute(&mut **tx)
            .await
            .map_err(map_sqlx_error)?;

        if api_resource_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder =
            QueryBuilder::<Postgres>::new("INSERT INTO role_api_resource (role_id, api_resource_id) ");
        builder.push_values(api_resource_ids, |mut row, api_resource_id| {
            row.push_bind(role_id).push_bind(*api_resource_id);
        });
        builder.push(" RETURNING id, role_id, api_resource_id");

        builder
            .build_query_as::<RoleApiResource>()
            .fetch_all(&mut **tx)
            .await
            .map_err(map_sqlx_error)
    }
}

#[async_trait]
impl RoleApiResourceRepository for PostgresRoleApiResourceRepository {
    async fn replace_api_resources(
        &self,
        role_id: i64,
        api_resource_ids: &[i64],
    ) -> AppResult<Vec<RoleApiResource>> {
        let timer = QueryTimer::new("role_api_resource", "replace");
        let mut tx = self.tx_manager.begin().await?;

        match timer.finish(Self::delete_then_insert(&mut tx, role_id, api_resource_ids).await) {
            Ok(rows) => {
                TransactionManager::commit(tx).await?;
                Ok(rows)
            }
            Err(e) => {
                TransactionManager::rollback(tx).await?;
                Err(e)
            }
        }
    }

    async fn api_resource_ids(&self, role_id: i64) -> AppResult<Vec<i64>> {
        let timer = QueryTimer::new("role_api_resource", "select");
        timer
            .finish(
                sqlx::query_scalar(
                    "SELECT api_resource_id FROM role_api_resource WHERE role_id = $1 ORDER BY id",
                )
                .bind(role_id)
                .fetch_all(self.tx_manager.pool())
                .await,
            )
            .map_err(map_sqlx_error)
    }
}
