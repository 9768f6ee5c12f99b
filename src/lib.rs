//! CIFAR-10 단일 클래스 WGAN 학습 라이브러리
//!
//! 가중치 클리핑을 쓰는 생성자/판별자 교대 학습. 텐서 연산과 자동 미분은 candle에 맡긴다.

pub mod core;

// 핵심 모듈들 재수출
pub use crate::core::{
    // 구성
    ArchitectureConfig, GanConfig, OptimizerConfig, OutputConfig,
    // 데이터
    load_cifar10, ClassSlice, Dataset,
    // 네트워크
    Critic, Generator, ParamSet, Phase,
    // 손실/최적화
    AdversarialOptimizer, ClipReport, GanLosses, RmsProp, WeightClipper,
    // 학습
    StepReport, Trainer, TrainerPhase, TrainingSession, TrainingState, TrainingSummary,
    // 산출물
    ArtifactSink, FileSink, ImageGrid, MemorySink, NullSink,
};
