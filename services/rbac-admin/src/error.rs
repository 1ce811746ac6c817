//! 角色服务错误
//!
//! 每个变体对应一条固定提示语和业务码，底层原因只写日志

use panel_errors::{ApiError, ErrorCode};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoleError {
    #[error("数据格式错误")]
    InvalidPayload(String),
    #[error("数据格式错误")]
    InvalidQueryPermissions,
    #[error("角色已经存在")]
    RoleAlreadyExists,
    #[error("角色已经存在")]
    CheckFailed,
    #[error("添加失败")]
    CreateFailed,
    #[error("更新失败")]
    UpdateFailed,
    #[error("删除失败")]
    DeleteFailed,
    #[error("查询失败")]
    QueryFailed,
    #[error("请先添加角色")]
    RoleNotFound,
    #[error("操作失败")]
    AuthorizationFailed,
    #[error("权限添加失败")]
    AddQueryPermissionsFailed,
    #[error("权限删除失败")]
    RemoveQueryPermissionsFailed,
}

impl RoleError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidPayload(_) => ErrorCode::ValidationFailed,
            Self::InvalidQueryPermissions => ErrorCode::QueryCountCreateFailed,
            Self::RoleAlreadyExists => ErrorCode::RoleAlreadyExists,
            Self::CreateFailed | Self::UpdateFailed | Self::DeleteFailed => {
                ErrorCode::RoleOperationFailed
            }
            Self::CheckFailed | Self::QueryFailed => ErrorCode::RoleQueryFailed,
            Self::RoleNotFound | Self::AuthorizationFailed => ErrorCode::AuthorizationFailed,
            Self::AddQueryPermissionsFailed => ErrorCode::AddQueryCountFailed,
            Self::RemoveQueryPermissionsFailed => ErrorCode::RemoveQueryCountFailed,
        }
    }
}

impl From<RoleError> for ApiError {
    fn from(error: RoleError) -> Self {
        ApiError::new(error.code(), error.to_string())
    }
}

pub type RoleResult<T> = Result<T, RoleError>;
