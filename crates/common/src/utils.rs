//! 通用工具函数

use chrono::{DateTime, SubsecRound, Utc};

/// 当前时间，截断到微秒（与 PostgreSQL TIMESTAMPTZ 精度一致）
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}
