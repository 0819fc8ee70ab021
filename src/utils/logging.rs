/// 日志工具模块
///
/// 提供日志初始化和阶段横幅输出的辅助函数
use crate::config::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化 tracing 日志
///
/// 优先使用 `RUST_LOG`，否则按 `verbose` 选择 debug / info。
/// 重复调用是安全的（测试中可能多次初始化）。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录阶段启动信息
pub fn log_stage_startup(stage: &str, config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 {} 启动", stage);
    info!("📂 原始目录: {}", config.raw_dir.display());
    info!("📂 处理目录: {}", config.processed_dir.display());
    info!("📂 状态目录: {}", config.status_dir.display());
    info!("📊 最大并发数: {}", config.max_concurrent_documents);
    match config.wait_timeout() {
        Some(timeout) => info!("⏱️ 等待上游超时: {:?}", timeout),
        None => info!("⏱️ 等待上游: 无超时"),
    }
    if config.strict_mode {
        info!("🔒 严格模式: 任一文档失败即终止");
    }
    info!("{}", "=".repeat(60));
}

/// 记录批次开始信息
///
/// # 参数
/// - `batch_num`: 批次编号
/// - `total_batches`: 批次总数
/// - `start`: 起始文档编号
/// - `end`: 结束文档编号
/// - `total`: 文档总数
pub fn log_batch_start(
    batch_num: usize,
    total_batches: usize,
    start: usize,
    end: usize,
    total: usize,
) {
    info!("{}", "─".repeat(60));
    info!("📦 开始处理第 {}/{} 批", batch_num, total_batches);
    info!("📄 本批文档: {}-{} / 共 {} 个", start, end, total);
}

/// 记录批次完成信息
pub fn log_batch_complete(batch_num: usize, success: usize, total: usize) {
    info!("✓ 第 {} 批完成: 成功 {}/{}", batch_num, success, total);
}

/// 打印阶段最终统计
pub fn log_stage_complete(stage: &str, success: usize, failed: usize) {
    info!("{}", "=".repeat(60));
    info!("📊 {} 完成", stage);
    info!(
        "完成时间: {}",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    );
    info!("✅ 成功: {}", success);
    info!("❌ 失败: {}", failed);
    info!("{}", "=".repeat(60));
}
