//! 角色路由
//!
//! 所有业务失败都以 HTTP 200 返回，错误信息在响应体的 `code` / `message` 中

use axum::{
    Router,
    extract::State,
    routing::{get, post},
};
use panel_common::PagedResult;
use panel_errors::{ApiError, ApiResponse};

use super::extract::{Params, PathId, Payload};
use crate::application::role::*;
use crate::domain::role::{Role, RoleQueryPermission, RoleWithAuthorities, UserQueryPermission};
use crate::error::RoleError;

type ApiResult<T> = Result<ApiResponse<T>, ApiError>;

/// 角色管理路由，挂载在 `/api/role`
pub fn role_routes(service: RoleService) -> Router {
    let routes = Router::new()
        .route("/", post(create_role).put(update_role).delete(delete_role))
        .route("/info/{id}", get(get_role_info))
        .route("/check-code", get(check_code))
        .route("/check-name", get(check_name))
        .route("/list", get(get_list))
        .route("/all", get(get_all_list))
        .route("/auth", post(add_auth_to_role))
        .route("/auth/{role_id}", get(get_auth_by_role))
        .route("/api-resource", post(add_api_resource_to_role))
        .route("/api-resource/{role_id}", get(get_api_auth_by_role))
        .route(
            "/query-permissions",
            post(add_query_permissions_role).delete(remove_query_permissions_role),
        )
        .route(
            "/query-permissions/{user_id}",
            get(get_query_permissions_role),
        )
        .with_state(service);

    Router::new().nest("/api/role", routes)
}

/// 创建前按 code、name 依次检查重复
async fn create_role(
    State(service): State<RoleService>,
    Payload(cmd): Payload<CreateRoleCommand>,
) -> ApiResult<Role> {
    cmd.validate().map_err(RoleError::InvalidPayload)?;

    if service.check_code(&cmd.code).await?.is_some()
        || service.check_name(&cmd.name).await?.is_some()
    {
        return Err(RoleError::RoleAlreadyExists.into());
    }

    Ok(ApiResponse::ok(service.create_role(cmd).await?))
}

async fn update_role(
    State(service): State<RoleService>,
    Payload(cmd): Payload<UpdateRoleCommand>,
) -> ApiResult<u64> {
    Ok(ApiResponse::ok(service.update_role(cmd).await?))
}

async fn delete_role(
    State(service): State<RoleService>,
    Payload(cmd): Payload<IdsCommand>,
) -> ApiResult<u64> {
    Ok(ApiResponse::ok(service.delete_role(&cmd.ids).await?))
}

async fn get_role_info(
    State(service): State<RoleService>,
    PathId(id): PathId,
) -> ApiResult<Option<Role>> {
    Ok(ApiResponse::ok(service.get_role_info(id).await?))
}

async fn check_code(
    State(service): State<RoleService>,
    Params(query): Params<CheckCodeQuery>,
) -> ApiResult<Option<Role>> {
    Ok(ApiResponse::ok(service.check_code(&query.code).await?))
}

async fn check_name(
    State(service): State<RoleService>,
    Params(query): Params<CheckNameQuery>,
) -> ApiResult<Option<Role>> {
    Ok(ApiResponse::ok(service.check_name(&query.name).await?))
}

async fn get_list(
    State(service): State<RoleService>,
    Params(query): Params<ListRolesQuery>,
) -> ApiResult<PagedResult<Role>> {
    Ok(ApiResponse::ok(service.get_list(&query).await?))
}

async fn get_all_list(State(service): State<RoleService>) -> ApiResult<Vec<Role>> {
    Ok(ApiResponse::ok(service.get_all_list().await?))
}

async fn add_auth_to_role(
    State(service): State<RoleService>,
    Payload(cmd): Payload<AssignAuthoritiesCommand>,
) -> ApiResult<RoleWithAuthorities> {
    Ok(ApiResponse::ok(service.add_auth_to_role(cmd).await?))
}

async fn get_auth_by_role(
    State(service): State<RoleService>,
    PathId(role_id): PathId,
) -> ApiResult<PagedResult<RoleWithAuthorities>> {
    Ok(ApiResponse::ok(service.get_auth_by_role(role_id).await?))
}

async fn add_api_resource_to_role(
    State(service): State<RoleService>,
    Payload(cmd): Payload<AssignApiResourcesCommand>,
) -> ApiResult<u64> {
    Ok(ApiResponse::ok(service.add_api_resource_to_role(cmd).await?))
}

async fn get_api_auth_by_role(
    State(service): State<RoleService>,
    PathId(role_id): PathId,
) -> ApiResult<Vec<i64>> {
    Ok(ApiResponse::ok(service.get_api_auth_by_role(role_id).await?))
}

async fn get_query_permissions_role(
    State(service): State<RoleService>,
    PathId(user_id): PathId,
) -> ApiResult<Vec<UserQueryPermission>> {
    Ok(ApiResponse::ok(
        service.get_query_permissions_role(user_id).await?,
    ))
}

async fn add_query_permissions_role(
    State(service): State<RoleService>,
    Payload(cmd): Payload<AddQueryPermissionsCommand>,
) -> ApiResult<Vec<RoleQueryPermission>> {
    Ok(ApiResponse::ok(service.add_query_permissions_role(cmd).await?))
}

async fn remove_query_permissions_role(
    State(service): State<RoleService>,
    Payload(cmd): Payload<IdsCommand>,
) -> ApiResult<u64> {
    Ok(ApiResponse::ok(
        service.remove_query_permissions_role(&cmd.ids).await?,
    ))
}
