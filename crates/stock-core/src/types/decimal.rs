//! 가격 텍스트 파싱과 표시를 위한 Decimal 유틸리티.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// 금융 정밀도를 위한 가격 타입.
pub type Price = Decimal;

/// 퍼센트 타입 (1.25 = 1.25%).
pub type Percentage = Decimal;

/// 가격 표시 소수점 자릿수.
pub const PRICE_DP: u32 = 2;

/// Decimal 연산을 위한 확장 트레이트.
pub trait DecimalExt {
    /// 지정된 소수점 자릿수로 반올림합니다 (0.5는 0에서 먼 쪽으로).
    fn round_half_up(&self, dp: u32) -> Decimal;

    /// JSON number로 보내기 위한 f64 변환.
    fn to_json_number(&self) -> f64;
}

impl DecimalExt for Decimal {
    fn round_half_up(&self, dp: u32) -> Decimal {
        self.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
    }

    fn to_json_number(&self) -> f64 {
        self.to_f64().unwrap_or_default()
    }
}

/// 숫자 텍스트를 Decimal로 파싱합니다.
///
/// 앞뒤 공백, 천 단위 쉼표, 끝의 `%` 기호를 허용합니다.
///
/// "1,234.56" -> 1234.56
/// "1.2547%" -> 1.2547
pub fn parse_decimal_text(text: &str) -> Option<Decimal> {
    let cleaned: String = text
        .trim()
        .trim_end_matches('%')
        .chars()
        .filter(|c| *c != ',')
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    cleaned.parse().ok()
}

/// 거래량 텍스트를 정수로 파싱합니다 ("54091700.0" -> 54091700).
pub fn parse_volume_text(text: &str) -> Option<i64> {
    parse_decimal_text(text).and_then(|v| v.trunc().to_i64())
}

/// 정수를 천 단위 쉼표로 포맷합니다 (54091700 -> "54,091,700").
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_decimal_text() {
        assert_eq!(parse_decimal_text("173.5000"), Some(dec!(173.5)));
        assert_eq!(parse_decimal_text(" 1,234.56 "), Some(dec!(1234.56)));
        assert_eq!(parse_decimal_text("1.2547%"), Some(dec!(1.2547)));
        assert_eq!(parse_decimal_text("-0.8800"), Some(dec!(-0.88)));
        assert_eq!(parse_decimal_text(""), None);
        assert_eq!(parse_decimal_text("N/A"), None);
    }

    #[test]
    fn test_parse_volume_text() {
        assert_eq!(parse_volume_text("54091700"), Some(54_091_700));
        assert_eq!(parse_volume_text("54091700.0"), Some(54_091_700));
        assert_eq!(parse_volume_text("abc"), None);
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(dec!(1.255).round_half_up(2), dec!(1.26));
        assert_eq!(dec!(-1.255).round_half_up(2), dec!(-1.26));
        assert_eq!(dec!(2.15).round_half_up(2), dec!(2.15));
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(54_091_700), "54,091,700");
        assert_eq!(format_thousands(-1_234_567), "-1,234,567");
    }
}
