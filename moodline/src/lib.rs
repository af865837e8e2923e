pub mod commands;
pub mod infrastructure;
pub mod modules;
pub mod shared;

use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// 优先读取 `RUST_LOG`，否则默认 info，`verbose` 时为 debug。
/// 日志写到 stderr，stdout 只留给统计输出。
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}
