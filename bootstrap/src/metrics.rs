//! Metrics 模块
//!
//! 提供 Prometheus metrics 导出与连接池指标采集

use std::time::Duration;

use metrics::gauge;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use panel_errors::{AppError, AppResult};
use tracing::debug;

use crate::infrastructure::{Infrastructure, PoolStatus};

/// Metrics 记录器
#[derive(Clone)]
pub struct MetricsRecorder {
    handle: PrometheusHandle,
}

impl MetricsRecorder {
    /// 安装全局 Prometheus 记录器，进程内只能调用一次
    pub fn install() -> AppResult<Self> {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .map_err(|e| AppError::internal(format!("Failed to install Prometheus recorder: {}", e)))?;
        Ok(Self { handle })
    }

    /// 创建不注册为全局记录器的实例
    pub fn detached() -> Self {
        let recorder = PrometheusBuilder::new().build_recorder();
        Self {
            handle: recorder.handle(),
        }
    }

    /// 获取 Prometheus 格式的 metrics
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

/// 连接池 Metrics 采集器
pub struct PoolMetricsCollector {
    infra: Infrastructure,
    interval: Duration,
}

impl PoolMetricsCollector {
    pub fn new(infra: Infrastructure, interval: Duration) -> Self {
        Self { infra, interval }
    }

    /// 启动后台采集任务
    pub fn start(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            loop {
                ticker.tick().await;
                let status = self.infra.postgres_pool_status();
                record_postgres_pool_metrics(&status);
                debug!(
                    size = status.size,
                    idle = status.idle,
                    active = status.active,
                    "Pool metrics collected"
                );
            }
        })
    }
}

/// 记录 PostgreSQL 连接池指标
pub fn record_postgres_pool_metrics(status: &PoolStatus) {
    gauge!("postgres_pool_size").set(status.size as f64);
    gauge!("postgres_pool_idle").set(status.idle as f64);
    gauge!("postgres_pool_active").set(status.active as f64);

    let utilization = if status.size > 0 {
        (status.active as f64 / status.size as f64) * 100.0
    } else {
        0.0
    };
    gauge!("postgres_pool_utilization").set(utilization);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detached_recorder_renders() {
        let recorder = MetricsRecorder::detached();
        assert!(!recorder.render().contains("postgres_pool_size"));
    }
}
