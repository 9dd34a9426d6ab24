//! 시세 업데이트를 위한 도메인 모델.

mod calculations;
mod quote;
mod record;

pub use calculations::*;
pub use quote::*;
pub use record::*;
