//! # Stock Data
//!
//! 시세 업데이터의 외부 API 연동.
//!
//! - **Alpha Vantage**: `GLOBAL_QUOTE` 시세 조회
//! - **Notion**: 데이터베이스 레코드 조회/생성/갱신, 페이지 블록 교체
//!
//! 업데이트 사이클은 구체 타입이 아닌 [`QuoteProvider`], [`RecordStore`],
//! [`PageWriter`] trait에 의존하므로 테스트에서 가짜 구현으로 대체할 수 있습니다.

pub mod error;
pub mod provider;

pub use error::{ProviderError, ProviderResult};
pub use provider::*;
