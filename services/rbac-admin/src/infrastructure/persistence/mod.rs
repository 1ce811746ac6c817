//! PostgreSQL 持久化实现

mod db_metrics;
mod error_mapper;
mod migrations;
mod query_permission_repository;
mod role_api_resource_repository;
mod role_authority_repository;
mod role_repository;

pub use db_metrics::QueryTimer;
pub use error_mapper::map_sqlx_error;
pub use migrations::migrations;
pub use query_permission_repository::PostgresQueryPermissionRepository;
pub use role_api_resource_repository::PostgresRoleApiResourceRepository;
pub use role_authority_repository::PostgresRoleAuthorityRepository;
pub use role_repository::PostgresRoleRepository;
