//! 菜单权限

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 菜单权限节点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Authority {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub parent_id: Option<i64>,
    pub path: Option<String>,
    pub sort: i32,
    pub create_time: DateTime<Utc>,
}

/// 角色及其菜单权限，只保留角色的 `id` 与 `name`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleWithAuthorities {
    pub id: i64,
    pub name: String,
    pub authority: Vec<Authority>,
}

/// 计算关联差异，返回 `(待新增, 待移除)`，结果去重并升序
pub fn diff_ids(current: &[i64], desired: &[i64]) -> (Vec<i64>, Vec<i64>) {
    let current: BTreeSet<i64> = current.iter().copied().collect();
    let desired: BTreeSet<i64> = desired.iter().copied().collect();

    let to_add = desired.difference(&current).copied().collect();
    let to_remove = current.difference(&desired).copied().collect();
    (to_add, to_remove)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diff_add_and_remove() {
        let (add, remove) = diff_ids(&[1, 2, 3], &[2, 3, 4]);
        assert_eq!(add, vec![4]);
        assert_eq!(remove, vec![1]);
    }

    #[test]
    fn test_diff_empty_desired_removes_all() {
        let (add, remove) = diff_ids(&[3, 1], &[]);
        assert!(add.is_empty());
        assert_eq!(remove, vec![1, 3]);
    }

    #[test]
    fn test_diff_dedupes_request() {
        let (add, remove) = diff_ids(&[], &[5, 5, 2]);
        assert_eq!(add, vec![2, 5]);
        assert!(remove.is_empty());
    }

    #[test]
    fn test_diff_unchanged() {
        let (add, remove) = diff_ids(&[1, 2], &[2, 1]);
        assert!(add.is_empty());
        assert!(remove.is_empty());
    }
}
