//! 시세 레코드와 Notion 페이지 속성 간 변환.

use serde_json::{json, Map, Value};
use stock_core::{DecimalExt, StockRecord};

pub(crate) const PROP_NAME: &str = "Name";
pub(crate) const PROP_SYMBOL: &str = "Symbol";
pub(crate) const PROP_CURRENT_PRICE: &str = "Current Price";
pub(crate) const PROP_PREVIOUS_CLOSE: &str = "Previous Close";
pub(crate) const PROP_PRICE_CHANGE: &str = "Price Change";
pub(crate) const PROP_PERCENT_CHANGE: &str = "Percent Change";
pub(crate) const PROP_VOLUME: &str = "Volume";
pub(crate) const PROP_OPEN_PRICE: &str = "Open Price";
pub(crate) const PROP_HIGH_PRICE: &str = "High Price";
pub(crate) const PROP_LOW_PRICE: &str = "Low Price";
pub(crate) const PROP_TRADING_DAY: &str = "Trading Day";
pub(crate) const PROP_LAST_UPDATED: &str = "Last Updated";

/// rich_text 배열 값.
pub(crate) fn rich_text(content: &str) -> Value {
    json!([{ "type": "text", "text": { "content": content } }])
}

/// 갱신 시 덮어쓰는 시세 속성.
pub(crate) fn quote_properties(record: &StockRecord) -> Map<String, Value> {
    let quote = &record.quote;
    let mut props = Map::new();

    let numbers = [
        (PROP_CURRENT_PRICE, quote.current_price.to_json_number()),
        (PROP_PREVIOUS_CLOSE, quote.previous_close.to_json_number()),
        (PROP_PRICE_CHANGE, quote.change_amount.to_json_number()),
        (PROP_PERCENT_CHANGE, quote.change_percent.to_json_number()),
        (PROP_OPEN_PRICE, quote.open.to_json_number()),
        (PROP_HIGH_PRICE, quote.high.to_json_number()),
        (PROP_LOW_PRICE, quote.low.to_json_number()),
    ];
    for (name, value) in numbers {
        props.insert(name.to_string(), json!({ "number": value }));
    }

    props.insert(PROP_VOLUME.to_string(), json!({ "number": quote.volume }));
    props.insert(
        PROP_TRADING_DAY.to_string(),
        json!({ "rich_text": rich_text(&quote.trading_day.format("%Y-%m-%d").to_string()) }),
    );
    props.insert(
        PROP_LAST_UPDATED.to_string(),
        json!({ "date": { "start": record.last_updated.to_rfc3339() } }),
    );

    props
}

/// 생성 시 사용하는 전체 속성 (제목과 심볼 키 포함).
pub(crate) fn create_properties(record: &StockRecord) -> Map<String, Value> {
    let mut props = quote_properties(record);
    props.insert(
        PROP_NAME.to_string(),
        json!({ "title": rich_text(&record.title()) }),
    );
    props.insert(
        PROP_SYMBOL.to_string(),
        json!({ "rich_text": rich_text(record.symbol().as_str()) }),
    );
    props
}

/// 페이지 속성에서 `Symbol` rich_text 값을 읽습니다.
///
/// 조각이 여러 개면 이어 붙이며, `plain_text`가 없으면 `text.content`를 사용합니다.
pub(crate) fn page_symbol(properties: &Map<String, Value>) -> Option<String> {
    let fragments = properties.get(PROP_SYMBOL)?.get("rich_text")?.as_array()?;

    let text: String = fragments
        .iter()
        .filter_map(|f| {
            f.get("plain_text")
                .or_else(|| f.pointer("/text/content"))
                .and_then(Value::as_str)
        })
        .collect();

    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use rust_decimal_macros::dec;
    use stock_core::{Quote, QuoteInput, Symbol};

    fn record() -> StockRecord {
        let quote = Quote::new(QuoteInput {
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
        });
        StockRecord::with_timestamp(quote, Utc.with_ymd_and_hms(2024, 1, 15, 21, 0, 0).unwrap())
    }

    #[test]
    fn test_quote_properties() {
        let props = quote_properties(&record());

        assert_eq!(props[PROP_CURRENT_PRICE]["number"], json!(173.5));
        assert_eq!(props[PROP_PRICE_CHANGE]["number"], json!(2.15));
        assert_eq!(props[PROP_PERCENT_CHANGE]["number"], json!(1.25));
        assert_eq!(props[PROP_VOLUME]["number"], json!(54_091_700));
        assert_eq!(
            props[PROP_TRADING_DAY]["rich_text"][0]["text"]["content"],
            json!("2024-01-15")
        );
        assert_eq!(
            props[PROP_LAST_UPDATED]["date"]["start"],
            json!("2024-01-15T21:00:00+00:00")
        );
        assert!(!props.contains_key(PROP_NAME));
        assert!(!props.contains_key(PROP_SYMBOL));
    }

    #[test]
    fn test_create_properties() {
        let props = create_properties(&record());

        assert_eq!(
            props[PROP_NAME]["title"][0]["text"]["content"],
            json!("AAPL Stock Quote")
        );
        assert_eq!(
            props[PROP_SYMBOL]["rich_text"][0]["text"]["content"],
            json!("AAPL")
        );
        assert_eq!(props.len(), 12);
    }

    #[test]
    fn test_page_symbol() {
        let props: Map<String, Value> = serde_json::from_value(json!({
            "Symbol": { "rich_text": [
                { "plain_text": "BRK", "text": { "content": "BRK" } },
                { "text": { "content": ".B" } }
            ]}
        }))
        .unwrap();
        assert_eq!(page_symbol(&props).as_deref(), Some("BRK.B"));

        let empty: Map<String, Value> =
            serde_json::from_value(json!({ "Symbol": { "rich_text": [] } })).unwrap();
        assert_eq!(page_symbol(&empty), None);
        assert_eq!(page_symbol(&Map::new()), None);
    }
}
