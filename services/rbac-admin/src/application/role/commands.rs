//! 角色相关命令定义

use serde::Deserialize;

use crate::domain::role::NewQueryPermission;

const MAX_CODE_CHARS: usize = 100;
const MAX_NAME_CHARS: usize = 200;
const MAX_DESC_CHARS: usize = 1000;

fn validate_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Role name cannot be empty".to_string());
    }
    if name.chars().count() > MAX_NAME_CHARS {
        return Err("Role name cannot exceed 200 characters".to_string());
    }
    Ok(())
}

fn validate_desc(desc: &str) -> Result<(), String> {
    if desc.chars().count() > MAX_DESC_CHARS {
        return Err("Role description cannot exceed 1000 characters".to_string());
    }
    Ok(())
}

/// 创建角色命令
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRoleCommand {
    pub name: String,
    #[serde(default)]
    pub desc: String,
    pub code: String,
}

impl CreateRoleCommand {
    /// 验证命令参数
    pub fn validate(&self) -> Result<(), String> {
        if self.code.is_empty() {
            return Err("Role code cannot be empty".to_string());
        }
        if !self
            .code
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        {
            return Err(
                "Role code can only contain alphanumeric, underscore, and hyphen".to_string(),
            );
        }
        if self.code.chars().count() > MAX_CODE_CHARS {
            return Err("Role code cannot exceed 100 characters".to_string());
        }
        validate_name(&self.name)?;
        validate_desc(&self.desc)
    }
}

/// 更新角色命令，只允许修改名称和描述
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRoleCommand {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub desc: String,
}

impl UpdateRoleCommand {
    pub fn validate(&self) -> Result<(), String> {
        validate_name(&self.name)?;
        validate_desc(&self.desc)
    }
}

/// 按 ID 批量操作 (删除角色 / 删除额度)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdsCommand {
    #[serde(default)]
    pub ids: Vec<i64>,
}

/// 为角色分配菜单权限，缺省视为清空
#[derive(Debug, Clone, Deserialize)]
pub struct AssignAuthoritiesCommand {
    #[serde(alias = "roleId")]
    pub role_id: i64,
    #[serde(default, alias = "authIds")]
    pub authority_ids: Vec<i64>,
}

/// 为角色分配接口资源
#[derive(Debug, Clone, Deserialize)]
pub struct AssignApiResourcesCommand {
    #[serde(alias = "roleId")]
    pub role_id: i64,
    #[serde(default, alias = "resourceIds")]
    pub api_resource_ids: Vec<i64>,
}

/// 为角色添加查询额度
#[derive(Debug, Clone, Deserialize)]
pub struct AddQueryPermissionsCommand {
    #[serde(alias = "roleId")]
    pub role_id: i64,
    #[serde(default)]
    pub json: Vec<NewQueryPermission>,
}

impl AddQueryPermissionsCommand {
    pub fn validate(&self) -> Result<(), String> {
        if self.json.is_empty() {
            return Err("Query permission list cannot be empty".to_string());
        }
        if self
            .json
            .iter()
            .any(|entry| entry.query_count.is_some_and(|count| count < 0))
        {
            return Err("Query count cannot be negative".to_string());
        }
        Ok(())
    }
}
