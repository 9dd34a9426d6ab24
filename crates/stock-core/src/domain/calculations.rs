//! 가격 변동 계산 공통 로직.

use rust_decimal::Decimal;

use crate::types::{DecimalExt, Percentage, Price, PRICE_DP};

/// 전일 종가 대비 변동액 (현재가 - 전일 종가), 소수점 2자리.
pub fn price_change(current_price: Price, previous_close: Price) -> Price {
    (current_price - previous_close).round_half_up(PRICE_DP)
}

/// 전일 종가 대비 변동률 (%), 소수점 2자리.
///
/// 전일 종가가 0이면 0을 반환합니다.
pub fn percent_change(change: Price, previous_close: Price) -> Percentage {
    if previous_close.is_zero() {
        return Decimal::ZERO;
    }
    (change / previous_close * Decimal::ONE_HUNDRED).round_half_up(PRICE_DP)
}
