//! 공급자 공통 HTTP 유틸리티.

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::error::{ProviderError, ProviderResult};

/// 타임아웃이 설정된 HTTP 클라이언트를 생성합니다.
pub(crate) fn build_client(timeout: Duration) -> ProviderResult<Client> {
    Ok(Client::builder()
        .timeout(timeout)
        .user_agent(concat!("stock-updater/", env!("CARGO_PKG_VERSION")))
        .build()?)
}

/// 응답 상태를 확인하고 본문을 JSON으로 역직렬화합니다.
///
/// 429는 요청 한도 초과, 그 외 2xx가 아닌 상태는 상태 에러로 반환합니다.
pub(crate) async fn read_json<T: DeserializeOwned>(
    service: &'static str,
    response: Response,
) -> ProviderResult<T> {
    let status = response.status();

    if status == StatusCode::TOO_MANY_REQUESTS {
        let body = response.text().await.unwrap_or_default();
        return Err(ProviderError::RateLimited {
            service,
            message: format!("HTTP {}: {}", status, body),
        });
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ProviderError::Status {
            service,
            status,
            body,
        });
    }

    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

/// base URL 끝의 `/`를 제거합니다.
pub(crate) fn normalize_base_url(base_url: impl Into<String>) -> String {
    base_url.into().trim_end_matches('/').to_string()
}
