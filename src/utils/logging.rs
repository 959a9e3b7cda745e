/// 日志工具模块
///
/// 提供日志格式化和输出的辅助函数
use std::time::Duration;

use tracing::info;

use crate::config::Config;
use crate::models::GenerationJob;

/// 记录程序启动信息
///
/// # 参数
/// - `config`: 应用配置（密钥不会输出）
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 文章批量生成模式");
    info!("🤖 模型: {}", config.llm_model_name);
    info!("🌐 接口: {}", config.llm_api_base_url);
    info!(
        "🔁 重试: 最多 {} 次，基础间隔 {} ms",
        config.max_retries, config.retry_base_delay_ms
    );
    info!("{}", "=".repeat(60));
}

/// 记录任务信息
///
/// # 参数
/// - `job`: 生成任务
pub fn log_job_loaded(job: &GenerationJob) {
    info!("✓ 共 {} 个主题", job.topics().len());
    info!(
        "📋 每篇 {} 章，每章约 {} 字符，语言: {}",
        job.chapters(),
        job.chars_per_chapter(),
        job.language()
    );
    info!("📄 预计每篇约 {:.1} 页", job.estimated_pages());
    info!("📁 输出目录: {}\n", job.output_dir().display());
}

/// 记录主题开始信息
///
/// # 参数
/// - `index`: 主题编号（从1开始）
/// - `total`: 主题总数
/// - `topic`: 主题
pub fn log_topic_start(index: usize, total: usize, topic: &str) {
    info!("\n{}", "─".repeat(60));
    info!("📝 开始第 {}/{} 个主题: {}", index, total, topic);
    info!("{}", "─".repeat(60));
}

/// 打印最终统计信息
///
/// # 参数
/// - `outcome`: 结束状态描述
/// - `saved`: 已保存的文章数
/// - `total`: 主题总数
/// - `elapsed`: 总耗时
pub fn print_final_stats(outcome: &str, saved: usize, total: usize, elapsed: Duration) {
    info!("\n{}", "=".repeat(60));
    info!("📊 生成结束统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("🏁 状态: {}", outcome);
    info!("✅ 已保存: {}/{}", saved, total);
    info!("⏱️ 耗时: {:.1} 秒", elapsed.as_secs_f64());
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
