//! Alpha Vantage 시세 클라이언트.
//!
//! `GLOBAL_QUOTE` 함수로 종목의 최신 시세를 조회합니다.
//! 무료 요금제는 분당 5회로 제한되므로 호출 간격은 호출하는 쪽에서 조절합니다.
//!
//! ## 응답 예시
//! ```json
//! {
//!     "Global Quote": {
//!         "01. symbol": "AAPL",
//!         "02. open": "172.0000",
//!         "03. high": "174.3000",
//!         "04. low": "171.7700",
//!         "05. price": "173.5000",
//!         "06. volume": "54091700",
//!         "07. latest trading day": "2024-01-15",
//!         "08. previous close": "171.3500",
//!         "09. change": "2.1500",
//!         "10. change percent": "1.2547%"
//!     }
//! }
//! ```
//!
//! 요청 한도를 넘으면 HTTP 200과 함께 `Note` 또는 `Information` 키만 담긴
//! 본문이 오고, 잘못된 심볼이면 `Error Message` 키가 옵니다.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use rust_decimal::Decimal;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;
use stock_core::{
    parse_decimal_text, parse_volume_text, Quote, QuoteInput, StockError, StockResult, Symbol,
};

use super::http::{build_client, normalize_base_url, read_json};
use super::QuoteProvider;
use crate::error::{ProviderError, ProviderResult};

/// Alpha Vantage API 기본 URL.
pub const ALPHA_VANTAGE_BASE_URL: &str = "https://www.alphavantage.co";

const SERVICE: &str = "alpha_vantage";

/// `GLOBAL_QUOTE` 응답 본문.
#[derive(Debug, Default, Deserialize)]
pub struct GlobalQuoteResponse {
    #[serde(rename = "Global Quote")]
    pub global_quote: Option<GlobalQuote>,
    #[serde(rename = "Error Message")]
    pub error_message: Option<String>,
    #[serde(rename = "Note")]
    pub note: Option<String>,
    #[serde(rename = "Information")]
    pub information: Option<String>,
}

/// `Global Quote` 객체. 모든 값은 문자열로 옵니다.
#[derive(Debug, Default, Deserialize)]
pub struct GlobalQuote {
    #[serde(rename = "01. symbol")]
    pub symbol: Option<String>,
    #[serde(rename = "02. open")]
    pub open: Option<String>,
    #[serde(rename = "03. high")]
    pub high: Option<String>,
    #[serde(rename = "04. low")]
    pub low: Option<String>,
    #[serde(rename = "05. price")]
    pub price: Option<String>,
    #[serde(rename = "06. volume")]
    pub volume: Option<String>,
    #[serde(rename = "07. latest trading day")]
    pub latest_trading_day: Option<String>,
    #[serde(rename = "08. previous close")]
    pub previous_close: Option<String>,
    #[serde(rename = "09. change")]
    pub change: Option<String>,
    #[serde(rename = "10. change percent")]
    pub change_percent: Option<String>,
}

impl GlobalQuote {
    /// 빈 객체(`{}`)인지 확인합니다. 알 수 없는 심볼이면 빈 객체가 옵니다.
    fn is_empty(&self) -> bool {
        self.symbol.is_none() && self.price.is_none() && self.latest_trading_day.is_none()
    }
}

/// Alpha Vantage 클라이언트.
pub struct AlphaVantageClient {
    client: Client,
    api_key: SecretString,
    base_url: String,
}

impl AlphaVantageClient {
    /// 사용자 지정 URL과 타임아웃으로 클라이언트를 생성합니다.
    pub fn with_options(
        api_key: &SecretString,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> ProviderResult<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            api_key: SecretString::new(api_key.expose_secret().into()),
            base_url: normalize_base_url(base_url),
        })
    }

    /// 심볼의 `GLOBAL_QUOTE`를 조회합니다.
    pub async fn fetch_global_quote(&self, symbol: &Symbol) -> StockResult<Quote> {
        let url = format!("{}/query", self.base_url);

        tracing::debug!(symbol = %symbol, "Alpha Vantage GLOBAL_QUOTE 요청");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("function", "GLOBAL_QUOTE"),
                ("symbol", symbol.as_str()),
                ("apikey", self.api_key.expose_secret()),
            ])
            .send()
            .await
            // URL에 API 키가 포함되므로 에러 메시지에서 제거
            .map_err(|e| ProviderError::Http(e.without_url()))?;

        let payload: GlobalQuoteResponse = read_json(SERVICE, response)
            .await
            .map_err(|e| match e {
                ProviderError::Http(e) => ProviderError::Http(e.without_url()),
                other => other,
            })?;

        parse_global_quote(symbol, payload)
    }
}

#[async_trait]
impl QuoteProvider for AlphaVantageClient {
    async fn fetch_quote(&self, symbol: &Symbol) -> StockResult<Quote> {
        self.fetch_global_quote(symbol).await
    }

    fn name(&self) -> &str {
        SERVICE
    }
}

/// `GLOBAL_QUOTE` 응답을 시세로 변환합니다.
///
/// 레코드 키는 응답의 `01. symbol`이 아니라 요청한 심볼을 사용합니다.
/// 현재가, 전일 종가, 거래량, 거래일은 필수이며 시가/고가/저가가 없으면 0으로
/// 채웁니다. 변동액과 변동률이 없으면 현재가와 전일 종가로 계산합니다.
pub fn parse_global_quote(symbol: &Symbol, payload: GlobalQuoteResponse) -> StockResult<Quote> {
    if let Some(message) = payload.error_message {
        return Err(StockError::api(SERVICE, message));
    }

    if let Some(message) = payload.note.or(payload.information) {
        return Err(StockError::rate_limited(SERVICE, message));
    }

    let quote = match payload.global_quote {
        Some(quote) if !quote.is_empty() => quote,
        _ => return Err(StockError::NoData(symbol.to_string())),
    };

    let current_price = required_decimal(&quote.price, "05. price")?;
    let previous_close = required_decimal(&quote.previous_close, "08. previous close")?;
    let volume = quote
        .volume
        .as_deref()
        .and_then(parse_volume_text)
        .ok_or_else(|| field_error("06. volume"))?;
    let trading_day = quote
        .latest_trading_day
        .as_deref()
        .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok())
        .ok_or_else(|| field_error("07. latest trading day"))?;

    Ok(Quote::new(QuoteInput {
        symbol: symbol.clone(),
        current_price,
        previous_close,
        change_amount: optional_decimal(&quote.change),
        change_percent: optional_decimal(&quote.change_percent),
        volume,
        open: optional_decimal(&quote.open).unwrap_or_default(),
        high: optional_decimal(&quote.high).unwrap_or_default(),
        low: optional_decimal(&quote.low).unwrap_or_default(),
        trading_day,
    }))
}

fn optional_decimal(value: &Option<String>) -> Option<Decimal> {
    value.as_deref().and_then(parse_decimal_text)
}

fn required_decimal(value: &Option<String>, field: &str) -> StockResult<Decimal> {
    optional_decimal(value).ok_or_else(|| field_error(field))
}

fn field_error(field: &str) -> StockError {
    StockError::Parse(format!("`{}` 필드가 없거나 숫자가 아닙니다", field))
}
