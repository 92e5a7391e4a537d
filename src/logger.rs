//! 日志初始化
//!
//! 默认 info 级别，可通过 RUST_LOG 覆盖

use tracing_subscriber::{fmt, EnvFilter};

/// 初始化全局日志订阅器
///
/// 重复调用是安全的（测试里每个用例都会调用一次）
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}
