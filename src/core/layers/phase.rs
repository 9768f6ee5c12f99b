/// 네트워크 호출 모드
///
/// 같은 파라미터 집합을 세 가지 방식으로 호출한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// 배치 통계 사용, 이동 통계 갱신, 드롭아웃 적용
    Train,
    /// 배치 통계 사용, 드롭아웃 적용, 이동 통계는 건드리지 않음 (손실 기록용)
    Observe,
    /// 이동 통계 사용, 드롭아웃 없음
    Inference,
}

impl Phase {
    /// 드롭아웃이 켜지는 모드인지
    pub fn is_stochastic(self) -> bool {
        !matches!(self, Phase::Inference)
    }

    /// 배치 통계로 정규화하는 모드인지
    pub fn uses_batch_stats(self) -> bool {
        !matches!(self, Phase::Inference)
    }
}
