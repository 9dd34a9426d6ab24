//! 데이터베이스 업데이트 사이클.
//!
//! 심볼마다 시세 조회 → 기존 레코드 조회 → 생성 또는 갱신을 순차 실행합니다.
//! 심볼 하나의 실패는 기록만 하고 다음 심볼로 넘어갑니다.

use std::time::Instant;
use stock_core::{symbol_span, StockError, StockRecord, StockResult, Symbol, UpsertOutcome};
use stock_data::{AlphaVantageClient, NotionClient, QuoteProvider, RecordStore};
use tracing::Instrument;

use super::report::log_quote;
use crate::{CycleStats, FixedIntervalThrottle, Result, Throttle, UpdaterConfig};

/// 설정으로 클라이언트를 생성하고 데이터베이스 사이클을 실행합니다.
pub async fn update_database(config: &UpdaterConfig) -> Result<CycleStats> {
    let provider = AlphaVantageClient::with_options(
        &config.credentials.alpha_vantage_api_key,
        config.alpha_vantage_base_url.as_str(),
        config.http_timeout,
    )?;
    let store = NotionClient::with_options(
        &config.credentials.notion_token,
        config.notion_base_url.as_str(),
        config.http_timeout,
    )?
    .into_database(&config.credentials.notion_database_id);
    let throttle = FixedIntervalThrottle::new(config.request_delay);

    Ok(sync_database(&provider, &store, &throttle, &config.symbols).await)
}

/// 심볼 목록을 순서대로 처리합니다.
///
/// 마지막 심볼을 제외한 모든 심볼 뒤에 스로틀 대기를 둡니다.
pub async fn sync_database(
    provider: &dyn QuoteProvider,
    store: &dyn RecordStore,
    throttle: &dyn Throttle,
    symbols: &[Symbol],
) -> CycleStats {
    let start = Instant::now();
    let mut stats = CycleStats::new();

    tracing::info!(
        provider = provider.name(),
        symbols = symbols.len(),
        "데이터베이스 업데이트 시작"
    );

    for (idx, symbol) in symbols.iter().enumerate() {
        stats.total += 1;

        let progress = format!("{}/{}", idx + 1, symbols.len());
        let span = symbol_span!("symbol", symbol, progress);

        match process_symbol(provider, store, symbol).instrument(span).await {
            Ok(outcome) if outcome.is_created() => {
                stats.created += 1;
                tracing::info!(symbol = %symbol, "레코드 생성 완료");
            }
            Ok(_) => {
                stats.updated += 1;
                tracing::info!(symbol = %symbol, "레코드 갱신 완료");
            }
            Err(e) => record_failure(&mut stats, symbol, &e),
        }

        if idx + 1 < symbols.len() {
            throttle.wait().await;
        }
    }

    stats.elapsed = start.elapsed();
    stats
}

async fn process_symbol(
    provider: &dyn QuoteProvider,
    store: &dyn RecordStore,
    symbol: &Symbol,
) -> StockResult<UpsertOutcome> {
    let quote = provider.fetch_quote(symbol).await?;
    log_quote(&quote);

    let record = StockRecord::new(quote);
    let existing = store.find_existing_record(symbol).await?;
    store.upsert_record(existing, &record).await
}

/// 심볼 실패를 통계에 반영하고 로그를 남깁니다.
pub(crate) fn record_failure(stats: &mut CycleStats, symbol: &Symbol, err: &StockError) {
    stats.failed += 1;

    if err.is_rate_limited() {
        stats.rate_limited += 1;
        tracing::warn!(symbol = %symbol, error = %err, "요청 한도 초과, 다음 심볼로 진행");
    } else {
        tracing::error!(symbol = %symbol, error = %err, "심볼 처리 실패");
    }
}
