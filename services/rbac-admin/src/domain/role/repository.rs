//! 角色仓储接口

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use panel_common::Pagination;
use panel_errors::AppResult;

use super::authority::RoleWithAuthorities;
use super::query_permission::{NewQueryPermission, RoleQueryPermission, UserQueryPermission};
use super::role::{NewRole, Role, RoleApiResource};

/// 角色仓储接口
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// 创建角色
    async fn create(&self, role: &NewRole) -> AppResult<Role>;

    /// 更新名称和描述，返回受影响行数
    async fn update(&self, id: i64, name: &str, desc: &str, now: DateTime<Utc>) -> AppResult<u64>;

    /// 软删除，返回受影响行数
    async fn soft_delete(&self, ids: &[i64], now: DateTime<Utc>) -> AppResult<u64>;

    /// 根据 ID 查找角色，包含已删除的行
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Role>>;

    async fn find_by_code(&self, code: &str) -> AppResult<Option<Role>>;

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Role>>;

    /// 分页列出未删除的角色，按 `name, code` 升序，同时返回过滤后的总数
    async fn list(&self, name: Option<&str>, pagination: Pagination)
    -> AppResult<(Vec<Role>, i64)>;

    /// 列出全部未删除的角色
    async fn list_all(&self) -> AppResult<Vec<Role>>;
}

/// 角色菜单权限关联仓储接口
#[async_trait]
pub trait RoleAuthorityRepository: Send + Sync {
    /// 在同一事务内将角色的菜单权限替换为 `authority_ids`
    ///
    /// 角色不存在时返回 `AppError::NotFound`
    async fn replace_authorities(&self, role_id: i64, authority_ids: &[i64]) -> AppResult<()>;

    /// 查询角色及其菜单权限
    async fn find_role_with_authorities(&self, role_id: i64)
    -> AppResult<Option<RoleWithAuthorities>>;
}

/// 角色接口资源关联仓储接口
#[async_trait]
pub trait RoleApiResourceRepository: Send + Sync {
    /// 在同一事务内删除角色的全部关联并写入新关联，返回写入的行
    ///
    /// 角色不存在时返回 `AppError::NotFound`
    async fn replace_api_resources(
        &self,
        role_id: i64,
        api_resource_ids: &[i64],
    ) -> AppResult<Vec<RoleApiResource>>;

    /// 角色关联的接口资源 ID
    async fn api_resource_ids(&self, role_id: i64) -> AppResult<Vec<i64>>;
}

/// 查询额度仓储接口
#[async_trait]
pub trait QueryPermissionRepository: Send + Sync {
    /// 用户所属角色的额度
    async fn find_by_user(&self, user_id: i64) -> AppResult<Vec<UserQueryPermission>>;

    /// 批量写入，不做冲突处理
    async fn insert_many(
        &self,
        role_id: i64,
        entries: &[NewQueryPermission],
        now: DateTime<Utc>,
    ) -> AppResult<Vec<RoleQueryPermission>>;

    /// 按 ID 删除，返回删除行数
    async fn delete_by_ids(&self, ids: &[i64]) -> AppResult<u64>;
}
