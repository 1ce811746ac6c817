//! 查询计时

use std::time::Instant;

use metrics::{counter, histogram};

/// 慢查询阈值（毫秒）
const SLOW_QUERY_MS: u128 = 100;

/// 查询计时守卫，`finish` 时记录耗时和结果
pub struct QueryTimer {
    start: Instant,
    table: &'static str,
    operation: &'static str,
}

impl QueryTimer {
    pub fn new(table: &'static str, operation: &'static str) -> Self {
        Self {
            start: Instant::now(),
            table,
            operation,
        }
    }

    /// 记录结果并原样返回
    pub fn finish<T, E>(self, result: Result<T, E>) -> Result<T, E> {
        let duration_ms = self.start.elapsed().as_millis();

        histogram!(
            "db_query_duration_ms",
            "table" => self.table,
            "operation" => self.operation
        )
        .record(duration_ms as f64);
        counter!(
            "db_queries_total",
            "table" => self.table,
            "operation" => self.operation,
            "success" => result.is_ok().to_string()
        )
        .increment(1);

        if duration_ms > SLOW_QUERY_MS {
            tracing::warn!(
                table = self.table,
                operation = self.operation,
                duration_ms = duration_ms as u64,
                "Slow query detected"
            );
            counter!(
                "db_slow_queries_total",
                "table" => self.table,
                "operation" => self.operation
            )
            .increment(1);
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish_passes_result_through() {
        let ok: Result<i32, String> = QueryTimer::new("role", "select").finish(Ok(3));
        assert_eq!(ok, Ok(3));

        let err: Result<i32, String> =
            QueryTimer::new("role", "select").finish(Err("boom".to_string()));
        assert_eq!(err, Err("boom".to_string()));
    }
}
