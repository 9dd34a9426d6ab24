//! HTTP 연동 에러 타입.

use stock_core::StockError;
use thiserror::Error;

/// 외부 API 호출 중 발생하는 에러.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP 요청 실패: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status {
        service: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("요청 한도 초과: {message}")]
    RateLimited {
        service: &'static str,
        message: String,
    },

    #[error("JSON 파싱 실패: {0}")]
    Json(#[from] serde_json::Error),
}

/// 연동 작업을 위한 Result 타입.
pub type ProviderResult<T> = Result<T, ProviderError>;

impl From<ProviderError> for StockError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Http(e) if e.is_decode() => StockError::Parse(e.to_string()),
            ProviderError::Http(e) => StockError::Network(e.to_string()),
            ProviderError::Status {
                service,
                status,
                body,
            } => StockError::api(service, format!("HTTP {}: {}", status, body)),
            ProviderError::RateLimited { service, message } => {
                StockError::rate_limited(service, message)
            }
            ProviderError::Json(e) => StockError::Parse(e.to_string()),
        }
    }
}
