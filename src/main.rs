use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use essay_generator::config::Config;
use essay_generator::logger;
use essay_generator::models::{load_job_from_toml, PipelineEvent};
use essay_generator::orchestrator::{EssayGenerator, RunOutcome};
use essay_generator::utils::logging::log_startup;
use tracing::{info, warn};

/// 未指定任务文件时使用的路径
const DEFAULT_JOB_FILE: &str = "job.toml";

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::from_env();

    // 初始化日志
    logger::init(config.verbose_logging);
    log_startup(&config);

    // 加载任务
    let job_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_JOB_FILE));
    let job = load_job_from_toml(&job_path)
        .await
        .with_context(|| format!("无法加载任务文件: {}", job_path.display()))?;

    // 启动后台生成
    let generator = EssayGenerator::new(&config)?;
    let mut handle = generator.start(job);

    // Ctrl-C → 取消（只处理第一次）
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut cancel_requested = false;

    loop {
        tokio::select! {
            event = handle.next_event() => match event {
                Some(event) => log_event(&event),
                None => break,
            },
            signal = &mut ctrl_c, if !cancel_requested => {
                cancel_requested = true;
                if signal.is_ok() {
                    warn!("⏹️ 收到 Ctrl-C，当前请求结束后停止");
                    handle.cancel();
                }
            }
        }
    }

    match handle.join().await {
        RunOutcome::Completed => Ok(()),
        RunOutcome::Cancelled => {
            warn!("生成已被取消");
            Ok(())
        }
        RunOutcome::Failed(e) => bail!("生成失败: {}", e),
    }
}

fn log_event(event: &PipelineEvent) {
    match event {
        PipelineEvent::Progress { percent } => info!("📈 进度: {}%", percent),
        PipelineEvent::Status { message } => info!("💬 {}", message),
        PipelineEvent::EssayCompleted { topic } => info!("✅ 已完成: {}", topic),
        PipelineEvent::Finished { success, message } => {
            if *success {
                info!("🎉 {}", message);
            } else {
                warn!("{}", message);
            }
        }
    }
}
