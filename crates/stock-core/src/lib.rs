//! # Stock Core
//!
//! 시세 업데이터의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 워크스페이스 전반에서 사용되는 기본 타입을 제공합니다:
//! - 티커 심볼
//! - 시세(Quote) 및 저장 레코드
//! - 가격 변동 계산
//! - 에러 분류
//! - 로깅 인프라

pub mod domain;
pub mod error;
pub mod logging;
pub mod types;

pub use domain::*;
pub use error::*;
pub use logging::*;
pub use types::*;
