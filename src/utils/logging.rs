/// 日志工具模块
///
/// 提供日志初始化和格式化输出的辅助函数
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化 tracing 日志
///
/// 日志级别通过 `RUST_LOG` 环境变量控制，默认 info
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(max_batch_size: u32, max_retries: u32) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 出题流水线模式");
    info!("📊 单批上限: {} 道, 最大重试: {} 次", max_batch_size, max_retries);
    info!("{}", "=".repeat(60));
}

/// 打印最终统计信息
pub fn print_final_stats(delivered: usize, requested: u32, failed_batches: usize) {
    info!("\n{}", "=".repeat(60));
    info!("📊 出题完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 交付题目: {}/{}", delivered, requested);
    if failed_batches > 0 {
        info!("❌ 失败批次: {}", failed_batches);
    }
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
