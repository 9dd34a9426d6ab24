//! 업데이트 사이클 모듈.

pub mod database_sync;
pub mod page_summary;
pub mod report;

pub use database_sync::{sync_database, update_database};
pub use page_summary::{collect_quotes, update_page, write_summary};
pub use report::{detail_lines, log_quote, summary_blocks};
