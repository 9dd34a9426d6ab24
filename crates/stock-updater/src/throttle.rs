//! 심볼 간 요청 간격 제어.
//!
//! Alpha Vantage 무료 등급은 분당 5회로 제한되므로 심볼 사이에 고정 간격을
//! 둡니다. 사이클에는 trait 객체로 주입되어 테스트에서 지연 없이 실행할 수
//! 있습니다.

use async_trait::async_trait;
use std::time::Duration;

/// 다음 요청 전 대기 전략.
#[async_trait]
pub trait Throttle: Send + Sync {
    /// 다음 요청이 허용될 때까지 대기합니다.
    async fn wait(&self);
}

/// 고정 간격 스로틀.
#[derive(Debug, Clone, Copy)]
pub struct FixedIntervalThrottle {
    interval: Duration,
}

impl FixedIntervalThrottle {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

#[async_trait]
impl Throttle for FixedIntervalThrottle {
    async fn wait(&self) {
        tracing::debug!(delay_secs = self.interval.as_secs(), "다음 심볼까지 대기");
        tokio::time::sleep(self.interval).await;
    }
}

/// 대기하지 않는 스로틀 (테스트용).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopThrottle;

#[async_trait]
impl Throttle for NoopThrottle {
    async fn wait(&self) {}
}
