//! Stock updater CLI.

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use stock_core::logging::{init_logging, LogConfig};
use stock_updater::{config::parse_symbols, exit_status, modules, Result, UpdaterConfig};

#[derive(Parser)]
#[command(name = "stock-updater")]
#[command(about = "Alpha Vantage → Notion Stock Quote Updater", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 로그 레벨 (trace, debug, info, warn, error). RUST_LOG가 우선합니다.
    #[arg(long)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// 심볼별 시세를 Notion 데이터베이스에 upsert
    UpdateDatabase {
        /// 처리할 심볼 (쉼표로 구분, 예: "AAPL,MSFT")
        #[arg(long)]
        symbols: Option<String>,
    },

    /// 시세 요약으로 Notion 페이지 내용 교체
    UpdatePage {
        /// 처리할 심볼 (쉼표로 구분)
        #[arg(long)]
        symbols: Option<String>,
    },

    /// 설정 검증 (API 호출 없음)
    CheckConfig,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // 로깅 초기화
    let mut log_config = LogConfig::from_env();
    if let Some(level) = &cli.log_level {
        log_config.level = level.clone();
    }
    if let Err(e) = init_logging(log_config) {
        eprintln!("로깅 초기화 실패: {}", e);
    }

    let result = run(cli).await;
    if let Err(e) = &result {
        if e.is_config() {
            tracing::error!(error = %e, "설정 오류로 실행을 중단합니다");
        } else {
            tracing::error!(error = %e, "실행 실패");
        }
    }

    ExitCode::from(exit_status(&result))
}

async fn run(cli: Cli) -> Result<()> {
    tracing::info!("Stock Updater 시작");

    // 설정 로드 (자격증명 누락 시 API 호출 전에 중단)
    let config = UpdaterConfig::from_env()?;

    match cli.command {
        Commands::UpdateDatabase { symbols } => {
            let config = override_symbols(config, symbols)?;
            let stats = modules::update_database(&config).await?;
            stats.log_summary("데이터베이스 업데이트");
        }
        Commands::UpdatePage { symbols } => {
            let config = override_symbols(config, symbols)?;
            let stats = modules::update_page(&config).await?;
            stats.log_summary("페이지 업데이트");
        }
        Commands::CheckConfig => {
            config.log_effective();
            if config.notion_page_id.is_none() {
                tracing::warn!("NOTION_PAGE_ID 미설정: update-page를 사용할 수 없습니다");
            }
            tracing::info!("설정 검증 완료");
        }
    }

    tracing::info!("Stock Updater 종료");
    Ok(())
}

fn override_symbols(config: UpdaterConfig, symbols: Option<String>) -> Result<UpdaterConfig> {
    match symbols {
        Some(list) => {
            let symbols = parse_symbols(&list)?;
            tracing::info!(count = symbols.len(), "특정 심볼 처리");
            config.with_symbols(symbols)
        }
        None => Ok(config),
    }
}
