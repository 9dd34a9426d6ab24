//! Alpha Vantage → Notion 시세 업데이터.
//!
//! 이 crate는 설정된 심볼의 시세를 순차적으로 조회하여 Notion에 기록하는
//! 바이너리를 제공합니다:
//! - 데이터베이스 모드: 심볼별 레코드 upsert
//! - 페이지 모드: 단일 페이지에 시세 요약 작성
//! - 요청 간 고정 간격 스로틀 (Alpha Vantage 분당 5회 제한)

pub mod config;
pub mod error;
pub mod modules;
pub mod stats;
pub mod throttle;

pub use self::config::{Credentials, UpdaterConfig, UpdaterSettings};
pub use error::{exit_status, Result, UpdaterError};
pub use stats::CycleStats;
pub use throttle::{FixedIntervalThrottle, NoopThrottle, Throttle};
