//! # 핵심 모듈
//!
//! 데이터 → 네트워크 → 손실 → 옵티마이저/클리핑 → 학습 루프 → 산출물

pub mod artifacts;
pub mod config;
pub mod data;
pub mod layers;
pub mod loss;
pub mod networks;
pub mod optimizers;
pub mod training;

// 주요 타입들 재수출
pub use artifacts::{ArtifactSink, FileSink, ImageGrid, MemorySink, NullSink};
pub use config::{ArchitectureConfig, GanConfig, OptimizerConfig, OutputConfig};
pub use data::{load_cifar10, ClassSlice, Dataset};
pub use layers::{ParamSet, Phase};
pub use loss::GanLosses;
pub use networks::{Critic, Generator};
pub use optimizers::{AdversarialOptimizer, ClipReport, RmsProp, WeightClipper};
pub use training::{StepReport, Trainer, TrainerPhase, TrainingSession, TrainingState, TrainingSummary};
