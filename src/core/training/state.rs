//! 학습 상태와 상태 전이

use crate::core::loss::GanLosses;
use crate::core::optimizers::ClipReport;
use anyhow::{bail, Result};

/// 트레이너 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainerPhase {
    Idle,
    EpochRunning,
    BatchStepping,
    Evaluating,
    Done,
}

impl TrainerPhase {
    /// 허용되는 전이인지
    pub fn can_transition_to(self, next: TrainerPhase) -> bool {
        use TrainerPhase::*;
        matches!(
            (self, next),
            (Idle, EpochRunning)
                | (Idle, Done)
                | (EpochRunning, BatchStepping)
                | (BatchStepping, BatchStepping)
                | (BatchStepping, EpochRunning)
                | (BatchStepping, Evaluating)
                | (BatchStepping, Done)
                | (Evaluating, EpochRunning)
                | (Evaluating, Done)
        )
    }
}

/// 학습 루프 전용 상태. 스텝마다 한 번 갱신되며 스레드 간에 공유하지 않는다.
#[derive(Debug, Clone)]
pub struct TrainingState {
    /// 현재 에포크
    pub epoch: usize,
    /// 누적 스텝
    pub step: u64,
    /// 마지막 스텝의 손실
    pub last_losses: Option<GanLosses>,
    /// 마지막 클리핑 결과
    pub last_clip: Option<ClipReport>,
    phase: TrainerPhase,
}

impl Default for TrainingState {
    fn default() -> Self {
        Self::new()
    }
}

impl TrainingState {
    pub fn new() -> Self {
        Self {
            epoch: 0,
            step: 0,
            last_losses: None,
            last_clip: None,
            phase: TrainerPhase::Idle,
        }
    }

    pub fn phase(&self) -> TrainerPhase {
        self.phase
    }

    pub fn transition(&mut self, next: TrainerPhase) -> Result<()> {
        if !self.phase.can_transition_to(next) {
            bail!("잘못된 상태 전이: {:?} → {:?}", self.phase, next);
        }
        log::trace!("상태 전이 {:?} → {:?} (epoch {}, step {})", self.phase, next, self.epoch, self.step);
        self.phase = next;
        Ok(())
    }

    pub fn is_done(&self) -> bool {
        self.phase == TrainerPhase::Done
    }
}
