//! Notion 페이지 블록 작성기.

use async_trait::async_trait;
use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::{json, Value};
use stock_core::StockResult;

use super::properties::rich_text;
use super::NotionClient;
use crate::provider::PageWriter;

/// 요청 한 번에 추가하거나 조회할 수 있는 최대 블록 수.
pub const MAX_BLOCKS_PER_REQUEST: usize = 100;

/// 페이지에 쓰는 블록 종류.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading1(String),
    Heading2(String),
    Paragraph(String),
    Divider,
}

impl Block {
    /// Notion 블록 객체로 변환합니다.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Heading1(text) => text_block("heading_1", text),
            Self::Heading2(text) => text_block("heading_2", text),
            Self::Paragraph(text) => text_block("paragraph", text),
            Self::Divider => json!({ "object": "block", "type": "divider", "divider": {} }),
        }
    }
}

fn text_block(kind: &str, text: &str) -> Value {
    let mut block = json!({ "object": "block", "type": kind });
    block[kind] = json!({ "rich_text": rich_text(text) });
    block
}

#[derive(Debug, Deserialize)]
struct ChildrenResponse {
    #[serde(default)]
    results: Vec<BlockObject>,
    #[serde(default)]
    has_more: bool,
    next_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BlockObject {
    id: String,
}

/// 요약을 쓰는 단일 Notion 페이지.
pub struct NotionPage {
    client: NotionClient,
    page_id: SecretString,
}

impl NotionPage {
    pub fn new(client: NotionClient, page_id: &SecretString) -> Self {
        Self {
            client,
            page_id: SecretString::new(page_id.expose_secret().into()),
        }
    }

    async fn list_children(&self) -> StockResult<Vec<String>> {
        let mut ids = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let path = format!("/blocks/{}/children", self.page_id.expose_secret());
            let mut query = vec![("page_size", MAX_BLOCKS_PER_REQUEST.to_string())];
            if let Some(cursor) = &cursor {
                query.push(("start_cursor", cursor.clone()));
            }

            let request = self.client.request(Method::GET, &path).query(&query);
            let page: ChildrenResponse = self
                .client
                .execute(request, "blocks.children.list")
                .await?;

            ids.extend(page.results.into_iter().map(|b| b.id));

            match page.next_cursor {
                Some(next) if page.has_more => cursor = Some(next),
                _ => break,
            }
        }

        Ok(ids)
    }
}

#[async_trait]
impl PageWriter for NotionPage {
    async fn clear_page(&self) -> StockResult<usize> {
        let ids = self.list_children().await?;

        for id in &ids {
            let path = format!("/blocks/{}", id);
            let _: Value = self
                .client
                .send(Method::DELETE, &path, None, "block.delete")
                .await?;
        }

        tracing::debug!(deleted = ids.len(), "페이지 블록 삭제 완료");
        Ok(ids.len())
    }

    async fn append_blocks(&self, blocks: &[Block]) -> StockResult<()> {
        let path = format!("/blocks/{}/children", self.page_id.expose_secret());

        for chunk in blocks.chunks(MAX_BLOCKS_PER_REQUEST) {
            let children: Vec<Value> = chunk.iter().map(Block::to_json).collect();
            let body = json!({ "children": children });

            let _: Value = self
                .client
                .send(Method::PATCH, &path, Some(&body), "blocks.children.append")
                .await?;
        }

        tracing::debug!(appended = blocks.len(), "페이지 블록 추가 완료");
        Ok(())
    }
}
