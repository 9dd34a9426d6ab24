//! Notion REST API 클라이언트.
//!
//! 모든 요청은 `Authorization: Bearer {token}`과 `Notion-Version` 헤더를
//! 포함합니다. 데이터베이스 id와 페이지 id도 비밀값으로 취급하므로
//! 로그에는 요청 경로 대신 작업 이름만 남깁니다.

mod blocks;
mod database;
mod properties;

pub use blocks::{Block, NotionPage};
pub use database::NotionDatabase;

use reqwest::{Client, Method, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};

use super::http::{build_client, normalize_base_url, read_json};
use crate::error::ProviderResult;

/// Notion API 기본 URL.
pub const NOTION_BASE_URL: &str = "https://api.notion.com/v1";

/// 사용하는 Notion API 버전.
pub const NOTION_VERSION: &str = "2022-06-28";

const SERVICE: &str = "notion";

/// Notion API 클라이언트.
pub struct NotionClient {
    client: Client,
    token: SecretString,
    base_url: String,
}

impl NotionClient {
    /// 사용자 지정 URL과 타임아웃으로 클라이언트를 생성합니다.
    pub fn with_options(
        token: &SecretString,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> ProviderResult<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            token: SecretString::new(token.expose_secret().into()),
            base_url: normalize_base_url(base_url),
        })
    }

    /// 데이터베이스 레코드 저장소로 변환합니다.
    pub fn into_database(self, database_id: &SecretString) -> NotionDatabase {
        NotionDatabase::new(self, database_id)
    }

    /// 페이지 작성기로 변환합니다.
    pub fn into_page(self, page_id: &SecretString) -> NotionPage {
        NotionPage::new(self, page_id)
    }

    /// 인증 헤더가 설정된 요청을 만듭니다.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url, path))
            .bearer_auth(self.token.expose_secret())
            .header("Notion-Version", NOTION_VERSION)
    }

    /// 요청을 보내고 응답 JSON을 역직렬화합니다.
    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
        operation: &'static str,
    ) -> ProviderResult<T> {
        let mut request = self.request(method, path);
        if let Some(body) = body {
            request = request.json(body);
        }

        self.execute(request, operation).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        operation: &'static str,
    ) -> ProviderResult<T> {
        let start = Instant::now();
        let response = request.send().await?;

        tracing::debug!(
            operation,
            status = response.status().as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Notion API 응답"
        );

        read_json(SERVICE, response).await
    }
}
