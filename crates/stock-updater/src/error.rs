//! 에러 타입 정의.

use stock_core::StockError;
use stock_data::ProviderError;
use thiserror::Error;

/// Updater 에러 타입
#[derive(Debug, Error)]
pub enum UpdaterError {
    /// 설정 에러
    #[error("Configuration error: {0}")]
    Config(String),

    /// 시세 조회 또는 기록 에러
    #[error(transparent)]
    Stock(#[from] StockError),
}

impl UpdaterError {
    /// 실행 전 검증 단계에서 발생한 설정 에러인지 확인합니다.
    pub fn is_config(&self) -> bool {
        match self {
            Self::Config(_) => true,
            Self::Stock(e) => e.is_fatal(),
        }
    }
}

impl From<ProviderError> for UpdaterError {
    fn from(err: ProviderError) -> Self {
        Self::Stock(err.into())
    }
}

impl From<config::ConfigError> for UpdaterError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result 타입 별칭
pub type Result<T> = std::result::Result<T, UpdaterError>;

/// 실행 결과를 프로세스 종료 코드로 변환합니다.
///
/// 심볼 단위 실패는 사이클 안에서 흡수되므로 `Err`까지 올라오는 것은
/// 실행 자체를 막는 에러뿐입니다.
pub fn exit_status<T>(result: &Result<T>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(_) => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_config() {
        assert!(UpdaterError::Config("missing".into()).is_config());
        assert!(UpdaterError::from(StockError::Config("missing".into())).is_config());
        assert!(!UpdaterError::from(StockError::NoData("AAPL".into())).is_config());
    }

    #[test]
    fn test_exit_status() {
        assert_eq!(exit_status(&Ok(())), 0);
        assert_eq!(exit_status::<()>(&Err(UpdaterError::Config("missing".into()))), 1);
        assert_eq!(exit_status::<()>(&Err(StockError::api("notion", "HTTP 500").into())), 1);
    }
}
