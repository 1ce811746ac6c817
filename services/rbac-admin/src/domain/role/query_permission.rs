//! 查询额度

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 角色在某地区、某行业下的查询额度
///
/// `(role_id, county_code, industry_code)` 不唯一，重复写入会产生多行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct RoleQueryPermission {
    pub id: i64,
    pub role_id: i64,
    pub county_code: Option<i64>,
    pub industry_code: Option<i64>,
    pub query_count: Option<i32>,
    pub created_date: Option<DateTime<Utc>>,
    pub update_time: Option<DateTime<Utc>>,
}

/// 待写入的额度条目，`role_id` 由调用方统一填充
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NewQueryPermission {
    #[serde(default, alias = "countyCode")]
    pub county_code: Option<i64>,
    #[serde(default, alias = "IndustryCode")]
    pub industry_code: Option<i64>,
    #[serde(default, alias = "queryCount")]
    pub query_count: Option<i32>,
}

/// 用户维度的额度查询结果
///
/// 用户所属角色没有额度时，额度相关字段为空
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserQueryPermission {
    /// 用户 ID
    pub id: i64,
    pub role_id: Option<i64>,
    pub query_count: Option<i32>,
    pub county_code: Option<i64>,
    pub industry_code: Option<i64>,
}
