//! 角色聚合
//!
//! 角色、菜单权限、接口资源和查询额度

mod authority;
mod query_permission;
mod repository;
#[allow(clippy::module_inception)]
mod role;

pub use authority::{Authority, RoleWithAuthorities, diff_ids};
pub use query_permission::{NewQueryPermission, RoleQueryPermission, UserQueryPermission};
pub use repository::{
    QueryPermissionRepository, RoleApiResourceRepository, RoleAuthorityRepository,
    RoleRepository,
};
pub use role::{NewRole, Role, RoleApiResource};
