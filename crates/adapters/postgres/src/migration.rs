//! 内置 schema 迁移
//!
//! 版本记录在 `_migrations` 表中；已应用版本的脚本被修改时拒绝启动

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use panel_errors::{AppError, AppResult};
use sqlx::PgPool;
use tracing::{debug, info};

/// 多个实例同时启动时用于串行化迁移的 advisory lock
const MIGRATION_LOCK_KEY: i64 = 0x7261_6261_635f_6d67;

/// 一个版本化的 SQL 脚本
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migration {
    pub version: i64,
    pub name: &'static str,
    /// 可包含多条语句
    pub sql: &'static str,
}

impl Migration {
    pub const fn new(version: i64, name: &'static str, sql: &'static str) -> Self {
        Self { version, name, sql }
    }

    pub fn checksum(&self) -> String {
        let mut hasher = DefaultHasher::new();
        self.sql.hash(&mut hasher);
        format!("{:016x}", hasher.finish())
    }
}

pub struct MigrationManager {
    pool: PgPool,
}

impl MigrationManager {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 按版本升序应用未执行的迁移，返回本次应用的版本号
    ///
    /// 每个版本在独立事务中执行；任一版本失败即停止
    pub async fn migrate(&self, migrations: &[Migration]) -> AppResult<Vec<i64>> {
        sqlx::raw_sql(
            r#"
            CREATE TABLE IF NOT EXISTS _migrations (
                version BIGINT PRIMARY KEY,
                name VARCHAR(255) NOT NULL,
                checksum VARCHAR(64) NOT NULL,
                applied_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create migration table: {}", e)))?;

        let mut pending: Vec<&Migration> = migrations.iter().collect();
        pending.sort_by_key(|m| m.version);

        let mut applied = Vec::new();
        for migration in pending {
            if self.apply(migration).await? {
                applied.push(migration.version);
            }
        }
        Ok(applied)
    }

    /// 已应用且校验和一致时返回 `false`
    async fn apply(&self, migration: &Migration) -> AppResult<bool> {
        let failed = |stage: &str, e: sqlx::Error| {
            AppError::database(format!(
                "Migration {} ({}) {}: {}",
                migration.version, migration.name, stage, e
            ))
        };
        let checksum = migration.checksum();

        let mut tx = self.pool.begin().await.map_err(|e| failed("begin", e))?;
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(MIGRATION_LOCK_KEY)
            .execute(&mut *tx)
            .await
            .map_err(|e| failed("lock", e))?;

        let recorded: Option<String> =
            sqlx::query_scalar("SELECT checksum FROM _migrations WHERE version = $1")
                .bind(migration.version)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| failed("lookup", e))?;

        match recorded {
            Some(existing) if existing == checksum => {
                debug!(version = migration.version, "Migration already applied");
                return Ok(false);
            }
            Some(existing) => {
                return Err(AppError::database(format!(
                    "Migration {} ({}) was modified after being applied: recorded {}, found {}",
                    migration.version, migration.name, existing, checksum
                )));
            }
            None => {}
        }

        sqlx::raw_sql(migration.sql)
            .execute(&mut *tx)
            .await
            .map_err(|e| failed("script", e))?;
        sqlx::query("INSERT INTO _migrations (version, name, checksum) VALUES ($1, $2, $3)")
            .bind(migration.version)
            .bind(migration.name)
            .bind(&checksum)
            .execute(&mut *tx)
            .await
            .map_err(|e| failed("record", e))?;
        tx.commit().await.map_err(|e| failed("commit", e))?;

        info!(version = migration.version, name = migration.name, "Migration applied");
        Ok(true)
    }
}
