//! 日志初始化
//!
//! 日志写到 stderr，stdout 留给 get/list 的输出。
//! `RUST_LOG` 优先；否则 --verbose 为 debug，默认只输出 warn。

use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

fn default_directive(verbose: bool) -> &'static str {
    if verbose { "tunnelenv=debug" } else { "warn" }
}

/// 初始化全局 tracing 订阅者，重复调用无副作用
pub fn init_tracing(verbose: bool) {
    let filter = std::env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.is_empty())
        .map(|s| EnvFilter::builder().parse_lossy(s))
        .unwrap_or_else(|| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(filter)
        .try_init();
}
