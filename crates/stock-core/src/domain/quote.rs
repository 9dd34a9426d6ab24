//! 시세 스냅샷.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::calculations::{percent_change, price_change};
use crate::types::{DecimalExt, Percentage, Price, Symbol, PRICE_DP};

/// 전일 대비 가격 방향.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceDirection {
    Up,
    Down,
    Flat,
}

impl PriceDirection {
    /// 콘솔/페이지 표시용 이모지.
    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Up => "📈",
            Self::Down => "📉",
            Self::Flat => "➡️",
        }
    }
}

impl fmt::Display for PriceDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.emoji())
    }
}

/// 한 종목의 현재 및 전일 거래 데이터 스냅샷.
///
/// 외부 시세 API에서 조회한 뒤에는 변경하지 않습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// 티커 심볼
    pub symbol: Symbol,
    /// 현재가
    pub current_price: Price,
    /// 전일 종가
    pub previous_close: Price,
    /// 전일 대비 변동액
    pub change_amount: Price,
    /// 전일 대비 변동률 (%)
    pub change_percent: Percentage,
    /// 거래량
    pub volume: i64,
    /// 시가
    pub open: Price,
    /// 고가
    pub high: Price,
    /// 저가
    pub low: Price,
    /// 최근 거래일
    pub trading_day: NaiveDate,
}

/// 시세 생성 입력값.
///
/// 변동액과 변동률이 없으면 현재가와 전일 종가로 계산합니다.
#[derive(Debug, Clone)]
pub struct QuoteInput {
    pub symbol: Symbol,
    pub current_price: Price,
    pub previous_close: Price,
    pub change_amount: Option<Price>,
    pub change_percent: Option<Percentage>,
    pub volume: i64,
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub trading_day: NaiveDate,
}

impl Quote {
    /// 입력값으로 시세를 생성합니다.
    ///
    /// 현재가, 전일 종가, 변동액, 변동률은 소수점 2자리로 반올림합니다.
    pub fn new(input: QuoteInput) -> Self {
        let current_price = input.current_price.round_half_up(PRICE_DP);
        let previous_close = input.previous_close.round_half_up(PRICE_DP);
        let change_amount = input
            .change_amount
            .map(|c| c.round_half_up(PRICE_DP))
            .unwrap_or_else(|| price_change(current_price, previous_close));
        let change_percent = input
            .change_percent
            .map(|p| p.round_half_up(PRICE_DP))
            .unwrap_or_else(|| percent_change(change_amount, previous_close));

        Self {
            symbol: input.symbol,
            current_price,
            previous_close,
            change_amount,
            change_percent,
            volume: input.volume,
            open: input.open,
            high: input.high,
            low: input.low,
            trading_day: input.trading_day,
        }
    }

    /// 전일 대비 가격 방향.
    pub fn direction(&self) -> PriceDirection {
        // -0.00도 보합으로 취급
        if self.change_amount > Decimal::ZERO {
            PriceDirection::Up
        } else if self.change_amount < Decimal::ZERO {
            PriceDirection::Down
        } else {
            PriceDirection::Flat
        }
    }
}
