//! 角色应用服务

mod commands;
mod queries;
mod service;

pub use commands::*;
pub use queries::*;
pub use service::RoleService;
