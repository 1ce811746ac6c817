//! 角色应用服务
//!
//! 包装仓储调用，失败时记录原始错误并返回固定提示语

use std::sync::Arc;

use metrics::counter;
use panel_common::{PagedResult, utils::now};
use panel_errors::{AppError, AppResult};
use tracing::{debug, error, info};

use super::commands::*;
use super::queries::ListRolesQuery;
use crate::domain::role::{
    NewRole, QueryPermissionRepository, Role, RoleApiResourceRepository, RoleAuthorityRepository,
    RoleQueryPermission, RoleRepository, RoleWithAuthorities, UserQueryPermission,
};
use crate::error::{RoleError, RoleResult};

fn record_operation(operation: &'static str, success: bool) {
    counter!(
        "role_service_operations_total",
        "operation" => operation,
        "success" => success.to_string()
    )
    .increment(1);
}

/// 记录结果，失败时写日志并替换为固定错误
fn finish<T>(operation: &'static str, result: AppResult<T>, on_error: RoleError) -> RoleResult<T> {
    match result {
        Ok(value) => {
            record_operation(operation, true);
            Ok(value)
        }
        Err(e) => {
            record_operation(operation, false);
            error!(operation, error = %e, "Role operation failed");
            Err(on_error)
        }
    }
}

fn invalid(operation: &'static str, reason: String) -> RoleError {
    record_operation(operation, false);
    debug!(operation, %reason, "Rejected invalid payload");
    RoleError::InvalidPayload(reason)
}

/// 角色服务
#[derive(Clone)]
pub struct RoleService {
    roles: Arc<dyn RoleRepository>,
    authorities: Arc<dyn RoleAuthorityRepository>,
    api_resources: Arc<dyn RoleApiResourceRepository>,
    query_permissions: Arc<dyn QueryPermissionRepository>,
}

impl RoleService {
    pub fn new(
        roles: Arc<dyn RoleRepository>,
        authorities: Arc<dyn RoleAuthorityRepository>,
        api_resources: Arc<dyn RoleApiResourceRepository>,
        query_permissions: Arc<dyn QueryPermissionRepository>,
    ) -> Self {
        Self {
            roles,
            authorities,
            api_resources,
            query_permissions,
        }
    }

    /// 创建角色，`create_time` 与 `update_time` 取当前时间
    pub async fn create_role(&self, cmd: CreateRoleCommand) -> RoleResult<Role> {
        cmd.validate().map_err(|reason| invalid("create_role", reason))?;

        let new_role = NewRole::new(cmd.name, cmd.desc, cmd.code, now());
        let role = finish(
            "create_role",
            self.roles.create(&new_role).await,
            RoleError::CreateFailed,
        )?;

        info!(role_id = role.id, code = %role.code, "Role created");
        Ok(role)
    }

    /// 更新名称和描述，返回受影响行数
    pub async fn update_role(&self, cmd: UpdateRoleCommand) -> RoleResult<u64> {
        cmd.validate().map_err(|reason| invalid("update_role", reason))?;

        finish(
            "update_role",
            self.roles.update(cmd.id, &cmd.name, &cmd.desc, now()).await,
            RoleError::UpdateFailed,
        )
    }

    /// 软删除，返回受影响行数
    pub async fn delete_role(&self, ids: &[i64]) -> RoleResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        let affected = finish(
            "delete_role",
            self.roles.soft_delete(ids, now()).await,
            RoleError::DeleteFailed,
        )?;

        info!(?ids, affected, "Roles soft deleted");
        Ok(affected)
    }

    /// 按 ID 查询，包含已删除的角色
    pub async fn get_role_info(&self, id: i64) -> RoleResult<Option<Role>> {
        finish(
            "get_role_info",
            self.roles.find_by_id(id).await,
            RoleError::QueryFailed,
        )
    }

    pub async fn check_code(&self, code: &str) -> RoleResult<Option<Role>> {
        finish(
            "check_code",
            self.roles.find_by_code(code).await,
            RoleError::CheckFailed,
        )
    }

    pub async fn check_name(&self, name: &str) -> RoleResult<Option<Role>> {
        finish(
            "check_name",
            self.roles.find_by_name(name).await,
            RoleError::CheckFailed,
        )
    }

    /// 分页查询未删除的角色
    pub async fn get_list(&self, query: &ListRolesQuery) -> RoleResult<PagedResult<Role>> {
        let (data, count) = finish(
            "get_list",
            self.roles
                .list(query.name_filter(), query.pagination())
                .await,
            RoleError::QueryFailed,
        )?;
        Ok(PagedResult::new(data, count))
    }

    pub async fn get_all_list(&self) -> RoleResult<Vec<Role>> {
        finish(
            "get_all_list",
            self.roles.list_all().await,
            RoleError::QueryFailed,
        )
    }

    /// 将角色的菜单权限替换为请求中的集合，返回替换后的角色
    pub async fn add_auth_to_role(
        &self,
        cmd: AssignAuthoritiesCommand,
    ) -> RoleResult<RoleWithAuthorities> {
        const OP: &str = "add_auth_to_role";

        let existing = finish(
            OP,
            self.roles.find_by_id(cmd.role_id).await,
            RoleError::AuthorizationFailed,
        )?;
        if existing.is_none() {
            record_operation(OP, false);
            return Err(RoleError::RoleNotFound);
        }

        self.authorization_result(
            OP,
            self.authorities
                .replace_authorities(cmd.role_id, &cmd.authority_ids)
                .await,
        )?;

        let role = self.authorization_result(
            OP,
            self.authorities
                .find_role_with_authorities(cmd.role_id)
                .await,
        )?;

        info!(
            role_id = cmd.role_id,
            authority_count = role.as_ref().map_or(0, |r| r.authority.len()),
            "Role authorities replaced"
        );
        role.ok_or(RoleError::RoleNotFound)
    }

    /// 清空角色的接口资源后写入新集合，返回写入条数
    pub async fn add_api_resource_to_role(&self, cmd: AssignApiResourcesCommand) -> RoleResult<u64> {
        const OP: &str = "add_api_resource_to_role";

        let existing = finish(
            OP,
            self.roles.find_by_id(cmd.role_id).await,
            RoleError::AuthorizationFailed,
        )?;
        if existing.is_none() {
            record_operation(OP, false);
            return Err(RoleError::RoleNotFound);
        }

        let inserted = self.authorization_result(
            OP,
            self.api_resources
                .replace_api_resources(cmd.role_id, &cmd.api_resource_ids)
                .await,
        )?;

        info!(
            role_id = cmd.role_id,
            inserted = inserted.len(),
            "Role api resources replaced"
        );
        Ok(inserted.len() as u64)
    }

    /// 角色及其菜单权限，`{ data, count }` 形式
    pub async fn get_auth_by_role(
        &self,
        role_id: i64,
    ) -> RoleResult<PagedResult<RoleWithAuthorities>> {
        let role = finish(
            "get_auth_by_role",
            self.authorities.find_role_with_authorities(role_id).await,
            RoleError::QueryFailed,
        )?;

        let data: Vec<_> = role.into_iter().collect();
        let count = data.len() as i64;
        Ok(PagedResult::new(data, count))
    }

    pub async fn get_api_auth_by_role(&self, role_id: i64) -> RoleResult<Vec<i64>> {
        finish(
            "get_api_auth_by_role",
            self.api_resources.api_resource_ids(role_id).await,
            RoleError::QueryFailed,
        )
    }

    /// 用户所属角色的查询额度
    pub async fn get_query_permissions_role(
        &self,
        user_id: i64,
    ) -> RoleResult<Vec<UserQueryPermission>> {
        finish(
            "get_query_permissions_role",
            self.query_permissions.find_by_user(user_id).await,
            RoleError::QueryFailed,
        )
    }

    /// 批量写入查询额度，重复条目不会合并
    pub async fn add_query_permissions_role(
        &self,
        cmd: AddQueryPermissionsCommand,
    ) -> RoleResult<Vec<RoleQueryPermission>> {
        const OP: &str = "add_query_permissions_role";

        if let Err(reason) = cmd.validate() {
            record_operation(OP, false);
            debug!(operation = OP, %reason, "Rejected invalid payload");
            return Err(RoleError::InvalidQueryPermissions);
        }

        let rows = finish(
            OP,
            self.query_permissions
                .insert_many(cmd.role_id, &cmd.json, now())
                .await,
            RoleError::AddQueryPermissionsFailed,
        )?;

        info!(role_id = cmd.role_id, inserted = rows.len(), "Query permissions added");
        Ok(rows)
    }

    /// 按 ID 删除查询额度，空列表不访问数据库
    pub async fn remove_query_permissions_role(&self, ids: &[i64]) -> RoleResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        finish(
            "remove_query_permissions_role",
            self.query_permissions.delete_by_ids(ids).await,
            RoleError::RemoveQueryPermissionsFailed,
        )
    }

    /// 授权类操作: 角色不存在映射为 `RoleNotFound`，其余为 `AuthorizationFailed`
    fn authorization_result<T>(&self, operation: &'static str, result: AppResult<T>) -> RoleResult<T> {
        match result {
            Err(AppError::NotFound(msg)) => {
                record_operation(operation, false);
                debug!(operation, %msg, "Role disappeared during authorization");
                Err(RoleError::RoleNotFound)
            }
            other => finish(operation, other, RoleError::AuthorizationFailed),
        }
    }
}
