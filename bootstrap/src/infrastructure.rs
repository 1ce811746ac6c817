//! 基础设施资源管理

use std::time::Duration;

use panel_adapter_postgres::{Migration, MigrationManager, PostgresConfig, create_pool};
use panel_config::AppConfig;
use panel_errors::AppResult;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use tracing::info;

use crate::retry::{RetryPolicy, with_retry};

/// PostgreSQL 连接池状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStatus {
    pub size: u32,
    pub idle: u32,
    pub active: u32,
}

/// 基础设施资源容器
///
/// 由 bootstrap 统一初始化，服务通过 `postgres_pool()` 获取连接池
#[derive(Clone)]
pub struct Infrastructure {
    config: AppConfig,
    postgres_pool: PgPool,
}

impl Infrastructure {
    /// 从配置创建基础设施资源（带重试），并按配置执行迁移
    pub async fn from_config(config: AppConfig, migrations: &[Migration]) -> AppResult<Self> {
        let retry_policy = RetryPolicy::attempts(config.database.connect_attempts);

        let pg_config = PostgresConfig::new(config.database.url.expose_secret())
            .with_max_connections(config.database.max_connections)
            .with_min_connections(config.database.min_connections)
            .with_connect_timeout(Duration::from_secs(config.database.connect_timeout_secs));
        let postgres_pool = with_retry(&retry_policy, "PostgreSQL connection", || {
            let cfg = pg_config.clone();
            async move { create_pool(&cfg).await }
        })
        .await?;
        info!(
            max_connections = config.database.max_connections,
            "PostgreSQL connection pool created"
        );

        if config.database.run_migrations && !migrations.is_empty() {
            let applied = MigrationManager::new(postgres_pool.clone())
                .migrate(migrations)
                .await?;
            info!(
                applied = ?applied,
                known = migrations.len(),
                "Migrations finished"
            );
        }

        Ok(Self::new(config, postgres_pool))
    }

    /// 使用已有连接池创建
    pub fn new(config: AppConfig, postgres_pool: PgPool) -> Self {
        Self {
            config,
            postgres_pool,
        }
    }

    /// 获取应用配置
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// 获取 PostgreSQL 连接池
    pub fn postgres_pool(&self) -> PgPool {
        self.postgres_pool.clone()
    }

    /// 获取 PostgreSQL 连接池状态
    pub fn postgres_pool_status(&self) -> PoolStatus {
        let size = self.postgres_pool.size();
        let idle = self.postgres_pool.num_idle() as u32;
        PoolStatus {
            size,
            idle,
            active: size.saturating_sub(idle),
        }
    }
}
