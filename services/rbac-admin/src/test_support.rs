//! 内存版仓储，供单元测试使用

use std::collections::BTreeSet;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use panel_common::Pagination;
use panel_errors::{AppError, AppResult};

use crate::domain::role::*;

#[derive(Default)]
struct State {
    next_id: i64,
    roles: Vec<Role>,
    authorities: Vec<Authority>,
    role_authority: BTreeSet<(i64, i64)>,
    role_api_resources: Vec<RoleApiResource>,
    query_permissions: Vec<RoleQueryPermission>,
    users: Vec<(i64, Option<i64>)>,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

pub struct InMemoryStore {
    state: Mutex<State>,
    fail: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::default()),
            fail: false,
        }
    }

    /// 所有调用都返回数据库错误
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub fn seed_authorities(&self, ids: &[i64]) {
        let mut state = self.state.lock().unwrap();
        for &id in ids {
            state.authorities.push(Authority {
                id,
                name: format!("menu-{id}"),
                code: format!("menu_{id}"),
                parent_id: None,
                path: Some(format!("/menu/{id}")),
                sort: 0,
                create_time: Utc::now(),
            });
        }
    }

    pub fn seed_user(&self, id: i64, role_id: Option<i64>) {
        self.state.lock().unwrap().users.push((id, role_id));
    }

    fn lock(&self) -> AppResult<std::sync::MutexGuard<'_, State>> {
        if self.fail {
            return Err(AppError::database("connection refused"));
        }
        Ok(self.state.lock().unwrap())
    }
}

fn sorted_active(roles: &[Role], name: Option<&str>) -> Vec<Role> {
    let mut rows: Vec<Role> = roles
        .iter()
        .filter(|r| !r.is_delete)
        .filter(|r| name.is_none_or(|n| r.name.contains(n)))
        .cloned()
        .collect();
    rows.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.code.cmp(&b.code)));
    rows
}

#[async_trait]
impl RoleRepository for InMemoryStore {
    async fn create(&self, role: &NewRole) -> AppResult<Role> {
        let mut state = self.lock()?;
        let id = state.next_id();
        let role = role.clone().into_role(id);
        state.roles.push(role.clone());
        Ok(role)
    }

    async fn update(&self, id: i64, name: &str, desc: &str, now: DateTime<Utc>) -> AppResult<u64> {
        let mut state = self.lock()?;
        let mut affected = 0;
        for role in state.roles.iter_mut().filter(|r| r.id == id) {
            role.name = name.to_string();
            role.desc = desc.to_string();
            role.update_time = now;
            affected += 1;
        }
        Ok(affected)
    }

    async fn soft_delete(&self, ids: &[i64], now: DateTime<Utc>) -> AppResult<u64> {
        let mut state = self.lock()?;
        let mut affected = 0;
        for role in state.roles.iter_mut().filter(|r| ids.contains(&r.id)) {
            role.mark_deleted(now);
            affected += 1;
        }
        Ok(affected)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Role>> {
        Ok(self.lock()?.roles.iter().find(|r| r.id == id).cloned())
    }

    async fn find_by_code(&self, code: &str) -> AppResult<Option<Role>> {
        Ok(self.lock()?.roles.iter().find(|r| r.code == code).cloned())
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Role>> {
        Ok(self.lock()?.roles.iter().find(|r| r.name == name).cloned())
    }

    async fn list(
        &self,
        name: Option<&str>,
        pagination: Pagination,
    ) -> AppResult<(Vec<Role>, i64)> {
        let rows = sorted_active(&self.lock()?.roles, name);
        let count = rows.len() as i64;
        let page = rows
            .into_iter()
            .skip(pagination.offset() as usize)
            .take(pagination.limit() as usize)
            .collect();
        Ok((page, count))
    }

    async fn list_all(&self) -> AppResult<Vec<Role>> {
        Ok(sorted_active(&self.lock()?.roles, None))
    }
}

#[async_trait]
impl RoleAuthorityRepository for InMemoryStore {
    async fn replace_authorities(&self, role_id: i64, authority_ids: &[i64]) -> AppResult<()> {
        let mut state = self.lock()?;
        if !state.roles.iter().any(|r| r.id == role_id) {
            return Err(AppError::not_found("Role not found"));
        }

        let current: Vec<i64> = state
            .role_authority
            .iter()
            .filter(|(r, _)| *r == role_id)
            .map(|(_, a)| *a)
            .collect();
        let (to_add, to_remove) = diff_ids(&current, authority_ids);
        for id in to_remove {
            state.role_authority.remove(&(role_id, id));
        }
        for id in to_add {
            state.role_authority.insert((role_id, id));
        }
        Ok(())
    }

    async fn find_role_with_authorities(
        &self,
        role_id: i64,
    ) -> AppResult<Option<RoleWithAuthorities>> {
        let state = self.lock()?;
        let Some(role) = state.roles.iter().find(|r| r.id == role_id) else {
            return Ok(None);
        };

        let authority = state
            .authorities
            .iter()
            .filter(|a| state.role_authority.contains(&(role_id, a.id)))
            .cloned()
            .collect();
        Ok(Some(RoleWithAuthorities {
            id: role.id,
            name: role.name.clone(),
            authority,
        }))
    }
}

#[async_trait]
impl RoleApiResourceRepository for InMemoryStore {
    async fn replace_api_resources(
        &self,
        role_id: i64,
        api_resource_ids: &[i64],
    ) -> AppResult<Vec<RoleApiResource>> {
        let mut state = self.lock()?;
        if !state.roles.iter().any(|r| r.id == role_id) {
            return Err(AppError::not_found("Role not found"));
        }

        state.role_api_resources.retain(|r| r.role_id != role_id);
        let mut inserted = Vec::with_capacity(api_resource_ids.len());
        for &api_resource_id in api_resource_ids {
            let row = RoleApiResource {
                id: state.next_id(),
                role_id,
                api_resource_id,
            };
            state.role_api_resources.push(row.clone());
            inserted.push(row);
        }
        Ok(inserted)
    }

    async fn api_resource_ids(&self, role_id: i64) -> AppResult<Vec<i64>> {
        Ok(self
            .lock()?
            .role_api_resources
            .iter()
            .filter(|r| r.role_id == role_id)
            .map(|r| r.api_resource_id)
            .collect())
    }
}

#[async_trait]
impl QueryPermissionRepository for InMemoryStore {
    async fn find_by_user(&self, user_id: i64) -> AppResult<Vec<UserQueryPermission>> {
        let state = self.lock()?;
        let mut rows = Vec::new();
        for &(id, role_id) in state.users.iter().filter(|(id, _)| *id == user_id) {
            let matches: Vec<_> = state
                .query_permissions
                .iter()
                .filter(|q| Some(q.role_id) == role_id)
                .collect();
            if matches.is_empty() {
                rows.push(UserQueryPermission {
                    id,
                    role_id,
                    query_count: None,
                    county_code: None,
                    industry_code: None,
                });
            }
            for q in matches {
                rows.push(UserQueryPermission {
                    id,
                    role_id,
                    query_count: q.query_count,
                    county_code: q.county_code,
                    industry_code: q.industry_code,
                });
            }
        }
        Ok(rows)
    }

    async fn insert_many(
        &self,
        role_id: i64,
        entries: &[NewQueryPermission],
        now: DateTime<Utc>,
    ) -> AppResult<Vec<RoleQueryPermission>> {
        let mut state = self.lock()?;
        let mut inserted = Vec::with_capacity(entries.len());
        for entry in entries {
            let row = RoleQueryPermission {
                id: state.next_id(),
                role_id,
                county_code: entry.county_code,
                industry_code: entry.industry_code,
                query_count: entry.query_count,
                created_date: Some(now),
                update_time: Some(now),
            };
            state.query_permissions.push(row.clone());
            inserted.push(row);
        }
        Ok(inserted)
    }

    async fn delete_by_ids(&self, ids: &[i64]) -> AppResult<u64> {
        let mut state = self.lock()?;
        let before = state.query_permissions.len();
        state.query_permissions.retain(|q| !ids.contains(&q.id));
        Ok((before - state.query_permissions.len()) as u64)
    }
}
