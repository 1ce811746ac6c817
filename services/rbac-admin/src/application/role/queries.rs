//! 角色相关查询定义

use panel_common::Pagination;
use serde::Deserialize;

/// 分页查询角色，`name` 为子串过滤
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListRolesQuery {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default, alias = "pageSize")]
    pub page_size: Option<u32>,
}

impl ListRolesQuery {
    /// 空字符串视为不过滤
    pub fn name_filter(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }

    pub fn pagination(&self) -> Pagination {
        let default = Pagination::default();
        Pagination::new(
            self.page.unwrap_or(default.page),
            self.page_size.unwrap_or(default.page_size),
        )
    }
}

/// 按 code 检查
#[derive(Debug, Clone, Deserialize)]
pub struct CheckCodeQuery {
    pub code: String,
}

/// 按 name 检查
#[derive(Debug, Clone, Deserialize)]
pub struct CheckNameQuery {
    pub name: String,
}
