//! 티커 심볼 정의.

use crate::error::StockError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 대문자로 정규화된 티커 심볼 (예: AAPL, GOOGL).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// 새 심볼을 생성합니다.
    ///
    /// 앞뒤 공백을 제거하고 대문자로 변환합니다. 빈 문자열이나
    /// 내부 공백이 있는 문자열은 거부합니다.
    pub fn new(ticker: impl AsRef<str>) -> Result<Self, StockError> {
        let trimmed = ticker.as_ref().trim();
        if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
            return Err(StockError::InvalidSymbol(ticker.as_ref().to_string()));
        }
        Ok(Self(trimmed.to_uppercase()))
    }

    /// 티커 문자열을 반환합니다.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 쉼표로 구분된 심볼 목록을 파싱합니다 (예: "aapl, msft").
    ///
    /// 빈 항목은 무시하며, 중복된 심볼은 처음 등장한 순서만 유지합니다.
    pub fn parse_list(list: &str) -> Result<Vec<Self>, StockError> {
        let mut symbols: Vec<Self> = Vec::new();
        for part in list.split(',').filter(|s| !s.trim().is_empty()) {
            let symbol = Self::new(part)?;
            if !symbols.contains(&symbol) {
                symbols.push(symbol);
            }
        }
        Ok(symbols)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Symbol {
    type Err = StockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Symbol {
    type Error = StockError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.0
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
