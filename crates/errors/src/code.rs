//! 业务错误码
//!
//! 按类别分段:
//! - 0xxx: 通用
//! - 2xxx: 角色与授权
//! - 9xxx: 系统

use serde::{Deserialize, Serialize};
use std::fmt;

/// 业务错误码，序列化为数字
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: 通用 ====================
    /// 成功
    Success = 0,
    /// 请求参数校验失败
    ValidationFailed = 2,

    // ==================== 2xxx: 角色 ====================
    /// 角色增删改失败
    RoleOperationFailed = 2001,
    /// 角色查询失败
    RoleQueryFailed = 2002,
    /// 角色授权失败 (菜单 / 接口资源)
    AuthorizationFailed = 2003,
    /// 查询权限数据格式错误
    QueryCountCreateFailed = 2004,
    /// 查询权限添加失败
    AddQueryCountFailed = 2005,
    /// 查询权限删除失败
    RemoveQueryCountFailed = 2006,
    /// 角色 code 或 name 已存在
    RoleAlreadyExists = 2007,

    // ==================== 9xxx: 系统 ====================
    InternalError = 9001,
}

impl ErrorCode {
    pub fn code(&self) -> u16 {
        *self as u16
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code as u16
    }
}

impl TryFrom<u16> for ErrorCode {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => Self::Success,
            2 => Self::ValidationFailed,
            2001 => Self::RoleOperationFailed,
            2002 => Self::RoleQueryFailed,
            2003 => Self::AuthorizationFailed,
            2004 => Self::QueryCountCreateFailed,
            2005 => Self::AddQueryCountFailed,
            2006 => Self::RemoveQueryCountFailed,
            2007 => Self::RoleAlreadyExists,
            9001 => Self::InternalError,
            other => return Err(format!("unknown error code: {other}")),
        };
        Ok(code)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_number() {
        let json = serde_json::to_string(&ErrorCode::RoleQueryFailed).unwrap();
        assert_eq!(json, "2002");
    }

    #[test]
    fn test_deserialize_rejects_unknown() {
        assert!(serde_json::from_str::<ErrorCode>("2003").is_ok());
        assert!(serde_json::from_str::<ErrorCode>("4242").is_err());
    }

    #[test]
    fn test_try_from_covers_all_variants() {
        for code in [
            ErrorCode::Success,
            ErrorCode::ValidationFailed,
            ErrorCode::RoleOperationFailed,
            ErrorCode::RoleQueryFailed,
            ErrorCode::AuthorizationFailed,
            ErrorCode::QueryCountCreateFailed,
            ErrorCode::AddQueryCountFailed,
            ErrorCode::RemoveQueryCountFailed,
            ErrorCode::RoleAlreadyExists,
            ErrorCode::InternalError,
        ] {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }
}
