//! panel-bootstrap - 统一服务启动骨架
//!
//! 配置加载、日志初始化、数据库连接、健康检查与 graceful shutdown

mod health;
mod infrastructure;
mod metrics;
mod retry;
mod runtime;
mod starter;

pub use health::{ComponentHealth, HealthChecker, HealthStatus, health_routes};
pub use infrastructure::Infrastructure;
pub use metrics::{MetricsRecorder, PoolMetricsCollector, record_postgres_pool_metrics};
pub use retry::{RetryPolicy, with_retry};
pub use runtime::{init_runtime, shutdown_signal};
pub use starter::run_server;
