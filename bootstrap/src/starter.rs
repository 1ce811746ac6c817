//! 服务启动器
//!
//! 提供统一的 HTTP 服务启动模式

use std::future::Future;
use std::time::Duration;

use axum::Router;
use panel_adapter_postgres::Migration;
use panel_config::AppConfig;
use panel_errors::AppResult;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::health::{HealthChecker, health_routes};
use crate::infrastructure::Infrastructure;
use crate::metrics::{MetricsRecorder, PoolMetricsCollector};
use crate::runtime::{init_runtime, shutdown_signal};

/// 运行 HTTP 服务
///
/// 1. 加载配置
/// 2. 初始化日志
/// 3. 安装 Prometheus 记录器
/// 4. 创建数据库连接池并执行迁移
/// 5. 调用 `router_builder` 构建业务路由，合并健康检查路由
/// 6. 启动服务器并处理 graceful shutdown
///
/// ```ignore
/// panel_bootstrap::run_server("config", &migrations(), |infra| async move {
///     Ok(role_routes(rbac_admin::role_service(infra.postgres_pool())))
/// })
/// .await
/// ```
pub async fn run_server<F, Fut>(
    config_dir: &str,
    migrations: &[Migration],
    router_builder: F,
) -> Result<(), Box<dyn std::error::Error>>
where
    F: FnOnce(Infrastructure) -> Fut,
    Fut: Future<Output = AppResult<Router>>,
{
    let config = AppConfig::load(config_dir)?;
    init_runtime(&config);
    info!("Starting {} service", config.app_name);

    let metrics = MetricsRecorder::install()?;

    let infra = Infrastructure::from_config(config.clone(), migrations).await?;

    let pool_collector = PoolMetricsCollector::new(infra.clone(), Duration::from_secs(15));
    let collector_handle = pool_collector.start();

    let checker = HealthChecker::new().with_postgres(infra.postgres_pool());
    let app = router_builder(infra)
        .await?
        .merge(health_routes(checker, metrics))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(addr.as_str()).await?;
    info!(%addr, "HTTP server starting");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    collector_handle.abort();
    info!("Service stopped");

    Ok(())
}
