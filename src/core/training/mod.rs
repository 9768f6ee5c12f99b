//! # 학습 루프
//!
//! 학습 상태와 두 네트워크를 하나의 세션 객체에 모으고, 트레이너가 에포크/배치를
//! 돌리며 세션의 스텝을 호출한다.

pub mod session;
pub mod state;
pub mod trainer;

pub use session::{StepReport, TrainingSession};
pub use state::{TrainerPhase, TrainingState};
pub use trainer::{EvaluationRecord, Trainer, TrainingSummary};

#[cfg(test)]
mod __tests__;
