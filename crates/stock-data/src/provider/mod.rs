//! 시세 공급자와 저장소 trait 및 구현.

pub mod alpha_vantage;
mod http;
pub mod notion;

pub use alpha_vantage::{AlphaVantageClient, ALPHA_VANTAGE_BASE_URL};
pub use notion::{Block, NotionClient, NotionDatabase, NotionPage, NOTION_BASE_URL, NOTION_VERSION};

use async_trait::async_trait;
use stock_core::{Quote, RecordHandle, StockRecord, StockResult, Symbol, UpsertOutcome};

/// 시세 공급자 trait.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// 심볼의 현재 시세를 조회합니다.
    ///
    /// 응답이 비어 있거나, 형식이 잘못되었거나, 에러/요청 한도 초과를
    /// 나타내면 실패합니다.
    async fn fetch_quote(&self, symbol: &Symbol) -> StockResult<Quote>;

    /// 공급자 이름을 반환합니다.
    fn name(&self) -> &str;
}

/// 심볼을 키로 하는 레코드 저장소 trait.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// 심볼과 일치하는 기존 레코드를 찾습니다.
    async fn find_existing_record(&self, symbol: &Symbol) -> StockResult<Option<RecordHandle>>;

    /// 새 레코드를 생성합니다.
    async fn create_record(&self, record: &StockRecord) -> StockResult<RecordHandle>;

    /// 기존 레코드의 시세 필드를 덮어씁니다.
    async fn update_record(&self, handle: &RecordHandle, record: &StockRecord) -> StockResult<()>;

    /// 핸들이 없으면 생성, 있으면 갱신합니다.
    async fn upsert_record(
        &self,
        existing: Option<RecordHandle>,
        record: &StockRecord,
    ) -> StockResult<UpsertOutcome> {
        match existing {
            Some(handle) => {
                self.update_record(&handle, record).await?;
                Ok(UpsertOutcome::Updated(handle))
            }
            None => self.create_record(record).await.map(UpsertOutcome::Created),
        }
    }
}

/// 단일 페이지의 내용을 교체하는 trait.
#[async_trait]
pub trait PageWriter: Send + Sync {
    /// 페이지의 기존 블록을 모두 삭제하고 삭제한 개수를 반환합니다.
    async fn clear_page(&self) -> StockResult<usize>;

    /// 페이지 끝에 블록을 추가합니다.
    async fn append_blocks(&self, blocks: &[Block]) -> StockResult<()>;
}
