//! 角色实体

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 角色
///
/// 软删除: `is_delete = true` 的行不出现在列表查询中，但按 ID 仍可查到
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Role {
    pub id: i64,
    pub name: String,
    #[serde(rename = "desc")]
    #[sqlx(rename = "description")]
    pub desc: String,
    pub code: String,
    pub create_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
    pub is_delete: bool,
    pub delete_time: Option<DateTime<Utc>>,
}

/// 待创建的角色
#[derive(Debug, Clone, PartialEq)]
pub struct NewRole {
    pub name: String,
    pub desc: String,
    pub code: String,
    pub create_time: DateTime<Utc>,
}

impl NewRole {
    pub fn new(name: String, desc: String, code: String, now: DateTime<Utc>) -> Self {
        Self {
            name,
            desc,
            code,
            create_time: now,
        }
    }

    /// 生成持久化后的实体，`update_time` 与 `create_time` 相同
    pub fn into_role(self, id: i64) -> Role {
        Role {
            id,
            name: self.name,
            desc: self.desc,
            code: self.code,
            create_time: self.create_time,
            update_time: self.create_time,
            is_delete: false,
            delete_time: None,
        }
    }
}

impl Role {
    /// 标记为已删除
    pub fn mark_deleted(&mut self, now: DateTime<Utc>) {
        self.is_delete = true;
        self.delete_time = Some(now);
    }
}

/// 角色与接口资源的关联
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct RoleApiResource {
    pub id: i64,
    pub role_id: i64,
    pub api_resource_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_role_timestamps() {
        let now = panel_common::utils::now();
        let role = NewRole::new("管理员".into(), "".into(), "admin".into(), now).into_role(1);

        assert_eq!(role.create_time, role.update_time);
        assert!(!role.is_delete);
        assert!(role.delete_time.is_none());
    }

    #[test]
    fn test_mark_deleted() {
        let now = panel_common::utils::now();
        let mut role = NewRole::new("a".into(), "".into(), "a".into(), now).into_role(1);
        role.mark_deleted(now);

        assert!(role.is_delete);
        assert_eq!(role.delete_time, Some(now));
    }

    #[test]
    fn test_desc_serialized_as_desc() {
        let now = panel_common::utils::now();
        let role = NewRole::new("a".into(), "说明".into(), "a".into(), now).into_role(1);
        let json = serde_json::to_value(&role).unwrap();

        assert_eq!(json["desc"], "说明");
        assert!(json.get("description").is_none());
    }
}
