//! 시세 업데이터의 에러 타입.
//!
//! 설정 에러만 치명적이며, 나머지는 해당 심볼만 건너뛰고 사이클을 계속합니다.

use thiserror::Error;

/// 핵심 에러.
#[derive(Debug, Error)]
pub enum StockError {
    /// 설정 에러 (자격증명 누락 등)
    #[error("설정 에러: {0}")]
    Config(String),

    /// 잘못된 티커 심볼
    #[error("잘못된 심볼: {0:?}")]
    InvalidSymbol(String),

    /// 외부 API가 실패 응답을 반환
    #[error("{service} API 에러: {message}")]
    Api { service: String, message: String },

    /// 외부 API 요청 한도 초과
    #[error("{service} 요청 한도 초과: {message}")]
    RateLimited { service: String, message: String },

    /// 시세 데이터 없음
    #[error("시세 데이터 없음: {0}")]
    NoData(String),

    /// 응답 파싱 실패
    #[error("파싱 에러: {0}")]
    Parse(String),

    /// 네트워크 에러
    #[error("네트워크 에러: {0}")]
    Network(String),
}

/// 핵심 작업을 위한 Result 타입.
pub type StockResult<T> = Result<T, StockError>;

impl StockError {
    /// API 에러를 생성합니다.
    pub fn api(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Api {
            service: service.into(),
            message: message.into(),
        }
    }

    /// 요청 한도 초과 에러를 생성합니다.
    pub fn rate_limited(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RateLimited {
            service: service.into(),
            message: message.into(),
        }
    }

    /// 실행 전체를 중단해야 하는 에러인지 확인합니다.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// 외부 API 호출 실패로 분류되는 에러인지 확인합니다.
    ///
    /// 파싱 실패와 데이터 없음도 API 에러로 취급합니다.
    pub fn is_api_error(&self) -> bool {
        !matches!(self, Self::Config(_) | Self::InvalidSymbol(_))
    }

    /// 요청 한도 초과 에러인지 확인합니다.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        assert!(StockError::Config("missing".into()).is_fatal());
        assert!(!StockError::Config("missing".into()).is_api_error());
        assert!(!StockError::InvalidSymbol(String::new()).is_api_error());

        let parse = StockError::Parse("05. price".into());
        assert!(parse.is_api_error());
        assert!(!parse.is_fatal());

        let limited = StockError::rate_limited("alpha_vantage", "5 calls per minute");
        assert!(limited.is_rate_limited());
        assert!(limited.is_api_error());
    }

    #[test]
    fn test_error_display() {
        let err = StockError::api("notion", "HTTP 400: validation_error");
        assert_eq!(err.to_string(), "notion API 에러: HTTP 400: validation_error");
    }
}
