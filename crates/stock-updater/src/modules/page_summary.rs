//! 페이지 요약 사이클.
//!
//! 모든 심볼의 시세를 모은 뒤 단일 Notion 페이지의 내용을 교체합니다.

use chrono::Utc;
use std::time::Instant;
use stock_core::{symbol_span, Quote, Symbol};
use stock_data::{AlphaVantageClient, NotionClient, PageWriter, QuoteProvider};
use tracing::Instrument;

use super::database_sync::record_failure;
use super::report::{log_quote, summary_blocks};
use crate::{CycleStats, FixedIntervalThrottle, Result, Throttle, UpdaterConfig};

/// 설정으로 클라이언트를 생성하고 페이지 요약 사이클을 실행합니다.
pub async fn update_page(config: &UpdaterConfig) -> Result<CycleStats> {
    let page_id = config.require_page_id()?;

    let provider = AlphaVantageClient::with_options(
        &config.credentials.alpha_vantage_api_key,
        config.alpha_vantage_base_url.as_str(),
        config.http_timeout,
    )?;
    let page = NotionClient::with_options(
        &config.credentials.notion_token,
        config.notion_base_url.as_str(),
        config.http_timeout,
    )?
    .into_page(page_id);
    let throttle = FixedIntervalThrottle::new(config.request_delay);

    let (quotes, stats) = collect_quotes(&provider, &throttle, &config.symbols).await;

    // 페이지 쓰기 실패도 심볼 실패처럼 기록만 하고 통계는 반환
    if let Err(e) = write_summary(&page, &quotes).await {
        tracing::error!(error = %e, "페이지 갱신 실패");
    }

    Ok(stats)
}

/// 심볼 시세를 순서대로 수집합니다. 실패한 심볼은 건너뜁니다.
pub async fn collect_quotes(
    provider: &dyn QuoteProvider,
    throttle: &dyn Throttle,
    symbols: &[Symbol],
) -> (Vec<Quote>, CycleStats) {
    let start = Instant::now();
    let mut stats = CycleStats::new();
    let mut quotes = Vec::with_capacity(symbols.len());

    tracing::info!(
        provider = provider.name(),
        symbols = symbols.len(),
        "시세 수집 시작"
    );

    for (idx, symbol) in symbols.iter().enumerate() {
        stats.total += 1;

        let progress = format!("{}/{}", idx + 1, symbols.len());
        let span = symbol_span!("symbol", symbol, progress);

        match provider.fetch_quote(symbol).instrument(span).await {
            Ok(quote) => {
                log_quote(&quote);
                stats.updated += 1;
                quotes.push(quote);
            }
            Err(e) => record_failure(&mut stats, symbol, &e),
        }

        if idx + 1 < symbols.len() {
            throttle.wait().await;
        }
    }

    stats.elapsed = start.elapsed();
    (quotes, stats)
}

/// 페이지 내용을 시세 요약으로 교체합니다.
///
/// 시세가 하나도 없으면 페이지를 건드리지 않습니다. 기존 블록 삭제 실패는
/// 경고만 남기고 추가를 계속합니다.
pub async fn write_summary(page: &dyn PageWriter, quotes: &[Quote]) -> Result<()> {
    if quotes.is_empty() {
        tracing::warn!("조회된 시세가 없어 페이지를 갱신하지 않습니다");
        return Ok(());
    }

    match page.clear_page().await {
        Ok(deleted) => tracing::info!(deleted, "기존 페이지 내용 삭제"),
        Err(e) => tracing::warn!(error = %e, "기존 페이지 내용을 삭제하지 못했습니다"),
    }

    page.append_blocks(&summary_blocks(quotes, Utc::now())).await?;
    tracing::info!(quotes = quotes.len(), "페이지 갱신 완료");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::sync::Mutex;
    use stock_core::{QuoteInput, StockError, StockResult};
    use stock_data::Block;

    #[derive(Default)]
    struct RecordingPage {
        fail_clear: bool,
        fail_append: bool,
        cleared: Mutex<usize>,
        appended: Mutex<Vec<Block>>,
    }

    #[async_trait]
    impl PageWriter for RecordingPage {
        async fn clear_page(&self) -> StockResult<usize> {
            if self.fail_clear {
                return Err(StockError::api("notion", "HTTP 500"));
            }
            *self.cleared.lock().unwrap() += 1;
            Ok(3)
        }

        async fn append_blocks(&self, blocks: &[Block]) -> StockResult<()> {
            if self.fail_append {
                return Err(StockError::api("notion", "HTTP 500"));
            }
            self.appended.lock().unwrap().extend_from_slice(blocks);
            Ok(())
        }
    }

    fn quote() -> Quote {
        Quote::new(QuoteInput {
            symbol: Symbol::new("AAPL").unwrap(),
            current_price: dec!(173.50),
            previous_close: dec!(171.35),
            change_amount: None,
            change_percent: None,
            volume: 54_091_700,
            open: dec!(172.00),
            high: dec!(174.30),
            low: dec!(171.77),
            trading_day: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        })
    }

    #[tokio::test]
    async fn test_empty_quotes_leave_page_untouched() {
        let page = RecordingPage::default();

        write_summary(&page, &[]).await.unwrap();

        assert_eq!(*page.cleared.lock().unwrap(), 0);
        assert!(page.appended.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clear_failure_still_appends() {
        let page = RecordingPage {
            fail_clear: true,
            ..Default::default()
        };

        write_summary(&page, &[quote()]).await.unwrap();

        let appended = page.appended.lock().unwrap();
        assert_eq!(appended.len(), 5);
        assert_eq!(appended[1], Block::Heading2("📈 AAPL - $173.50".to_string()));
    }

    #[tokio::test]
    async fn test_append_failure_is_reported() {
        let page = RecordingPage {
            fail_append: true,
            ..Default::default()
        };

        let err = write_summary(&page, &[quote()]).await.unwrap_err();

        assert!(!err.is_config());
        assert_eq!(*page.cleared.lock().unwrap(), 1);
    }
}
