//! Notion 데이터베이스 기반 레코드 저장소.

use async_trait::async_trait;
use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use stock_core::{RecordHandle, StockRecord, StockResult, Symbol};

use super::properties::{create_properties, page_symbol, quote_properties, PROP_SYMBOL};
use super::NotionClient;
use crate::provider::RecordStore;

/// 쿼리 한 번에 받을 최대 결과 수. 심볼당 레코드는 하나이므로 작게 둡니다.
const QUERY_PAGE_SIZE: u32 = 10;

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    results: Vec<PageObject>,
}

#[derive(Debug, Deserialize)]
struct PageObject {
    id: String,
    #[serde(default)]
    archived: bool,
    #[serde(default)]
    properties: Map<String, Value>,
}

/// 심볼을 키로 시세 레코드를 저장하는 Notion 데이터베이스.
pub struct NotionDatabase {
    client: NotionClient,
    database_id: SecretString,
}

impl NotionDatabase {
    pub fn new(client: NotionClient, database_id: &SecretString) -> Self {
        Self {
            client,
            database_id: SecretString::new(database_id.expose_secret().into()),
        }
    }
}

#[async_trait]
impl RecordStore for NotionDatabase {
    /// `Symbol` 속성이 심볼과 같은 페이지를 찾습니다.
    ///
    /// 필터 결과를 대소문자 구분 없이 한 번 더 비교하고, 보관(archived)된
    /// 페이지는 제외합니다.
    async fn find_existing_record(&self, symbol: &Symbol) -> StockResult<Option<RecordHandle>> {
        let path = format!("/databases/{}/query", self.database_id.expose_secret());
        let body = json!({
            "filter": {
                "property": PROP_SYMBOL,
                "rich_text": { "equals": symbol.as_str() }
            },
            "page_size": QUERY_PAGE_SIZE,
        });

        let response: QueryResponse = self
            .client
            .send(Method::POST, &path, Some(&body), "database.query")
            .await?;

        let handle = response
            .results
            .into_iter()
            .filter(|page| !page.archived)
            .find(|page| {
                page_symbol(&page.properties)
                    .is_some_and(|s| s.eq_ignore_ascii_case(symbol.as_str()))
            })
            .map(|page| RecordHandle::new(page.id));

        tracing::debug!(symbol = %symbol, found = handle.is_some(), "기존 레코드 조회");

        Ok(handle)
    }

    async fn create_record(&self, record: &StockRecord) -> StockResult<RecordHandle> {
        let body = json!({
            "parent": { "database_id": self.database_id.expose_secret() },
            "properties": create_properties(record),
        });

        let page: PageObject = self
            .client
            .send(Method::POST, "/pages", Some(&body), "page.create")
            .await?;

        Ok(RecordHandle::new(page.id))
    }

    async fn update_record(&self, handle: &RecordHandle, record: &StockRecord) -> StockResult<()> {
        let path = format!("/pages/{}", handle.as_str());
        let body = json!({ "properties": quote_properties(record) });

        let _: Value = self
            .client
            .send(Method::PATCH, &path, Some(&body), "page.update")
            .await?;

        Ok(())
    }
}
