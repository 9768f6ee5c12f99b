//! # 학습 산출물
//!
//! 스칼라 손실 로그, 샘플 이미지 그리드, 가중치 파일. 모두 쓰기 전용 부수 효과이며
//! 이후 학습에 영향을 주지 않는다.

pub mod image_grid;
pub mod metrics;
pub mod sink;
pub mod weights;

pub use image_grid::ImageGrid;
pub use metrics::{MetricsWriter, ScalarRecord};
pub use sink::{ArtifactSink, FileSink, MemorySink, NullSink, EVALUATIONS_FILE};
pub use weights::{export_weights, load_weights, CRITIC_WEIGHTS, GENERATOR_WEIGHTS};

#[cfg(test)]
mod __tests__;
