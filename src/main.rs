use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use text_pipeline::infrastructure::fs_store;
use text_pipeline::models::{utc_timestamp, FetchMarker};
use text_pipeline::utils::logging;
use text_pipeline::{Analyzer, Config, Processor};
use tokio::sync::watch;
use tracing::{info, warn};

/// 离线文本分析流水线
#[derive(Debug, Parser)]
#[command(name = "text_pipeline", version, about)]
struct Cli {
    /// TOML 配置文件
    #[arg(long, global = true, env = "PIPELINE_CONFIG")]
    config: Option<PathBuf>,

    /// 等待上游标记的超时时间（秒），不指定则无限等待
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// 严格模式：任一文档失败即终止
    #[arg(long, global = true)]
    strict: bool,

    /// 显示详细日志
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 处理阶段：HTML → 文档 JSON + 处理完成标记
    Process,
    /// 分析阶段：文档 JSON → 最终报告
    Analyze,
    /// 在同一进程中依次运行处理与分析阶段
    Run,
    /// 写入抓取完成标记（供本地手动运行时替代上游抓取程序）
    MarkFetched,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置，命令行参数优先
    let mut config = Config::load(cli.config.as_deref())?;
    if cli.timeout.is_some() {
        config.wait_timeout_secs = cli.timeout;
    }
    config.strict_mode |= cli.strict;
    config.verbose_logging |= cli.verbose;

    // 初始化日志
    logging::init(config.verbose_logging);

    // ctrl-c 触发关闭信号，正在等待标记的阶段会立即退出
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("收到 ctrl-c，正在关闭...");
            let _ = shutdown_tx.send(true);
        }
    });

    match cli.command {
        Command::Process => {
            Processor::new(config, shutdown_rx).run().await?;
        }
        Command::Analyze => {
            Analyzer::new(config, shutdown_rx).run().await?;
        }
        Command::Run => {
            Processor::new(config.clone(), shutdown_rx.clone()).run().await?;
            Analyzer::new(config, shutdown_rx).run().await?;
        }
        Command::MarkFetched => {
            let marker = config.fetch_marker_path();
            let content = FetchMarker {
                timestamp: utc_timestamp(),
                extra: Default::default(),
            };
            fs_store::write_json_pretty(&marker, &content).await?;
            info!("✓ 已写入抓取完成标记: {}", marker.display());
        }
    }

    Ok(())
}
