//! 通用类型定义

use serde::{Deserialize, Serialize};

/// 单页最大条数
pub const MAX_PAGE_SIZE: u32 = 1000;

/// 分页参数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 20,
        }
    }
}

impl Pagination {
    /// 创建分页参数，页码最小为 1，每页条数限制在 `1..=MAX_PAGE_SIZE`
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn offset(&self) -> u32 {
        (self.page.saturating_sub(1)).saturating_mul(self.page_size)
    }

    pub fn limit(&self) -> u32 {
        self.page_size
    }
}

/// 分页结果 `{ data, count }`，`count` 为过滤后的总数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagedResult<T> {
    pub data: Vec<T>,
    pub count: i64,
}

impl<T> PagedResult<T> {
    pub fn new(data: Vec<T>, count: i64) -> Self {
        Self { data, count }
    }
}

impl<T> Default for PagedResult<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            count: 0,
        }
    }
}
