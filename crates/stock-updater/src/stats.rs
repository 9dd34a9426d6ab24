//! 사이클 통계 구조체.

use serde::Serialize;
use std::time::Duration;

/// 업데이트 사이클 통계
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CycleStats {
    /// 총 처리 심볼 수
    pub total: usize,
    /// 새로 생성한 레코드 수
    pub created: usize,
    /// 갱신한 레코드 수 (페이지 모드에서는 조회 성공 수)
    pub updated: usize,
    /// 실패 횟수
    pub failed: usize,
    /// 실패 중 요청 한도 초과
    pub rate_limited: usize,
    /// 소요 시간
    #[serde(skip)]
    pub elapsed: Duration,
}

impl CycleStats {
    /// 새 통계 객체 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 성공 횟수
    pub fn succeeded(&self) -> usize {
        self.created + self.updated
    }

    /// 성공률 계산 (%)
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.succeeded() as f64 / self.total as f64) * 100.0
        }
    }

    /// 통계 요약 로그 출력
    pub fn log_summary(&self, operation: &str) {
        tracing::info!(
            operation = operation,
            total = self.total,
            succeeded = self.succeeded(),
            created = self.created,
            updated = self.updated,
            failed = self.failed,
            rate_limited = self.rate_limited,
            success_rate = format!("{:.1}%", self.success_rate()),
            elapsed = format!("{:.1}s", self.elapsed.as_secs_f64()),
            "사이클 완료"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_rate() {
        assert_eq!(CycleStats::new().success_rate(), 0.0);

        let stats = CycleStats {
            total: 4,
            created: 1,
            updated: 2,
            failed: 1,
            ..Default::default()
        };
        assert_eq!(stats.succeeded(), 3);
        assert!((stats.success_rate() - 75.0).abs() < f64::EPSILON);
    }
}
