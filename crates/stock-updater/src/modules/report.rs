//! 시세 진행 로그와 페이지 요약 블록 생성.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use stock_core::{format_thousands, Quote};
use stock_data::Block;

/// 부호를 붙인 소수점 2자리 문자열 (예: "+2.15", "-0.40").
fn signed(value: Decimal) -> String {
    if value.is_sign_positive() && !value.is_zero() {
        format!("+{:.2}", value)
    } else {
        format!("{:.2}", value)
    }
}

/// 시세 상세 줄 목록.
pub fn detail_lines(quote: &Quote) -> Vec<String> {
    vec![
        format!("💰 Current Price: ${:.2}", quote.current_price),
        format!(
            "📊 Change: ${} ({}%)",
            signed(quote.change_amount),
            signed(quote.change_percent)
        ),
        format!("📈 High: ${:.2} | 📉 Low: ${:.2}", quote.high, quote.low),
        format!(
            "🏁 Open: ${:.2} | 🔒 Previous Close: ${:.2}",
            quote.open, quote.previous_close
        ),
        format!("📦 Volume: {}", format_thousands(quote.volume)),
        format!("📅 Trading Day: {}", quote.trading_day.format("%Y-%m-%d")),
    ]
}

/// 조회한 시세를 진행 로그로 출력합니다.
pub fn log_quote(quote: &Quote) {
    tracing::info!(
        symbol = %quote.symbol,
        price = %format!("{:.2}", quote.current_price),
        change = %signed(quote.change_amount),
        change_percent = %format!("{}%", signed(quote.change_percent)),
        high = %format!("{:.2}", quote.high),
        low = %format!("{:.2}", quote.low),
        volume = %format_thousands(quote.volume),
        trading_day = %quote.trading_day,
        "{} 시세 조회",
        quote.direction().emoji()
    );
}

/// 요약 페이지 블록을 생성합니다.
///
/// 제목, 종목별 (제목, 상세, 구분선), 하단 안내 순서입니다.
pub fn summary_blocks(quotes: &[Quote], generated_at: DateTime<Utc>) -> Vec<Block> {
    let mut blocks = Vec::with_capacity(quotes.len() * 3 + 2);

    blocks.push(Block::Heading1(format!(
        "📈 Stock Portfolio Update - {}",
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    )));

    for quote in quotes {
        blocks.push(Block::Heading2(format!(
            "{} {} - ${:.2}",
            quote.direction().emoji(),
            quote.symbol,
            quote.current_price
        )));
        blocks.push(Block::Paragraph(detail_lines(quote).join("\n")));
        blocks.push(Block::Divider);
    }

    blocks.push(Block::Paragraph(
        "🤖 Updated automatically by stock-updater | ⚡ Powered by Alpha Vantage API".to_string(),
    ));

    blocks
}
