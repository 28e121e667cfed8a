/// 日志工具模块
///
/// 提供日志初始化和格式化输出的辅助函数
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// 初始化全局日志
///
/// 优先使用 `RUST_LOG`，否则按 `verbose` 选择 `debug` 或 `info`。
/// 重复调用不会报错。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 双语知识问答");
    info!("📁 数据库: {}", config.database_path);
    match &config.corpus_dir {
        Some(dir) => info!("📚 题库目录: {}", dir),
        None => info!("📚 题库: 内置"),
    }
    info!("{}", "=".repeat(60));
}

/// 记录题库写入信息
pub fn log_corpus_loaded(total: usize, version: i64) {
    info!("✓ 题库已写入本地缓存: {} 道题 (版本 {})", total, version);
}

/// 记录会话结果
pub fn log_session_recorded(record_id: i64, score: u32, total: u32, percentage: u32) {
    info!("\n{}", "─".repeat(60));
    info!(
        "📊 会话记录 #{}: 得分 {}/{} ({}%)",
        record_id, score, total, percentage
    );
    info!("{}", "─".repeat(60));
}

/// 截断长文本用于日志显示
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_by_characters() {
        assert_eq!(truncate_text("ما هي عاصمة سوريا؟", 5), "ما هي...");
        assert_eq!(truncate_text("short", 10), "short");
    }
}
