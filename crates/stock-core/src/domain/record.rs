//! 저장소에 기록되는 시세 레코드.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::quote::Quote;
use crate::types::Symbol;

/// 시세와 마지막 갱신 시각. 심볼당 하나만 존재합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRecord {
    pub quote: Quote,
    pub last_updated: DateTime<Utc>,
}

impl StockRecord {
    /// 현재 시각으로 레코드를 생성합니다.
    pub fn new(quote: Quote) -> Self {
        Self::with_timestamp(quote, Utc::now())
    }

    pub fn with_timestamp(quote: Quote, last_updated: DateTime<Utc>) -> Self {
        Self {
            quote,
            last_updated,
        }
    }

    pub fn symbol(&self) -> &Symbol {
        &self.quote.symbol
    }

    /// 레코드 제목 (예: "AAPL Stock Quote").
    pub fn title(&self) -> String {
        format!("{} Stock Quote", self.quote.symbol)
    }
}

/// 저장소에 이미 존재하는 레코드의 식별자 (Notion page id).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordHandle(String);

impl RecordHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// upsert 결과.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// 새 레코드 생성
    Created(RecordHandle),
    /// 기존 레코드 갱신
    Updated(RecordHandle),
}

impl UpsertOutcome {
    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}
