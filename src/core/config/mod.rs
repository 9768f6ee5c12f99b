//! # 학습 구성 설정
//!
//! 하이퍼파라미터는 모두 로드 시점 상수다. 기본값은 레이블 4(사슴) 이미지로
//! 1만 에포크를 도는 전체 학습 구성이다.

pub mod gan_config;

pub use gan_config::{ArchitectureConfig, GanConfig, OptimizerConfig, OutputConfig};

#[cfg(test)]
mod __tests__;
