//! rbac-admin - 角色与权限管理服务
//!
//! 角色增删改查、菜单权限与接口资源授权、按角色的查询额度

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use panel_adapter_postgres::TransactionManager;
use sqlx::PgPool;

use application::role::RoleService;
use infrastructure::persistence::{
    PostgresQueryPermissionRepository, PostgresRoleApiResourceRepository,
    PostgresRoleAuthorityRepository, PostgresRoleRepository,
};

/// 基于连接池组装角色服务
pub fn role_service(pool: PgPool) -> RoleService {
    let tx_manager = TransactionManager::new(pool.clone());

    RoleService::new(
        Arc::new(PostgresRoleRepository::new(pool.clone())),
        Arc::new(PostgresRoleAuthorityRepository::new(tx_manager.clone())),
        Arc::new(PostgresRoleApiResourceRepository::new(tx_manager)),
        Arc::new(PostgresQueryPermissionRepository::new(pool)),
    )
}
