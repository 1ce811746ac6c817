//! 启动期依赖的重试

use std::future::Future;
use std::time::Duration;

use tracing::{info, warn};

/// 指数退避策略，每次等待翻倍直到 `max_delay`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// 总尝试次数，0 按 1 处理
    pub attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::attempts(5)
    }
}

impl RetryPolicy {
    pub fn attempts(attempts: u32) -> Self {
        Self {
            attempts,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
        }
    }

    pub fn with_delays(mut self, initial: Duration, max: Duration) -> Self {
        self.initial_delay = initial;
        self.max_delay = max;
        self
    }

    /// 各次失败后的等待时长，长度为 `attempts - 1`
    pub fn backoff(&self) -> impl Iterator<Item = Duration> {
        let Self {
            initial_delay,
            max_delay,
            ..
        } = *self;
        (0..self.attempts.max(1) - 1)
            .map(move |n| initial_delay.saturating_mul(1u32 << n.min(16)).min(max_delay))
    }
}

/// 按策略重试 `operation`，退避用尽后返回最后一次错误
pub async fn with_retry<F, Fut, T, E>(
    policy: &RetryPolicy,
    dependency: &str,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut delays = policy.backoff();
    let mut attempt = 1u32;

    loop {
        let error = match operation().await {
            Ok(value) => {
                if attempt > 1 {
                    info!(dependency, attempt, "Connected after retry");
                }
                return Ok(value);
            }
            Err(e) => e,
        };

        let Some(delay) = delays.next() else {
            warn!(dependency, attempt, error = %error, "Giving up");
            return Err(error);
        };
        warn!(
            dependency,
            attempt,
            error = %error,
            delay_ms = delay.as_millis() as u64,
            "Unavailable, retrying"
        );
        tokio::time::sleep(delay).await;
        attempt += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast(attempts: u32) -> RetryPolicy {
        RetryPolicy::attempts(attempts)
            .with_delays(Duration::from_millis(1), Duration::from_millis(5))
    }

    #[test]
    fn test_backoff_doubles_until_capped() {
        let policy = RetryPolicy::attempts(6)
            .with_delays(Duration::from_millis(500), Duration::from_secs(3));
        let delays: Vec<u64> = policy.backoff().map(|d| d.as_millis() as u64).collect();
        assert_eq!(delays, vec![500, 1000, 2000, 3000, 3000]);
    }

    #[test]
    fn test_single_attempt_has_no_backoff() {
        assert_eq!(RetryPolicy::attempts(1).backoff().count(), 0);
        assert_eq!(RetryPolicy::attempts(0).backoff().count(), 0);
    }

    #[tokio::test]
    async fn test_recovers_after_transient_failures() {
        let calls = AtomicU32::new(0);

        let result: Result<&str, String> = with_retry(&fast(4), "postgres", || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Err(format!("refused #{n}"))
                } else {
                    Ok("pool")
                }
            }
        })
        .await;

        assert_eq!(result, Ok("pool"));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_returns_last_error_when_exhausted() {
        let calls = AtomicU32::new(0);

        let result: Result<(), String> = with_retry(&fast(3), "postgres", || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move { Err(format!("refused #{n}")) }
        })
        .await;

        assert_eq!(result, Err("refused #2".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_zero_attempts_still_runs_once() {
        let calls = AtomicU32::new(0);

        let result: Result<(), &str> = with_retry(&fast(0), "postgres", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err("boom") }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
