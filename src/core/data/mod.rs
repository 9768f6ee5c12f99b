//! # 데이터셋
//!
//! CIFAR-10 바이너리 배포본 로더, 특징별 min-max 스케일링, 단일 클래스 필터와
//! 배치 슬라이싱.

pub mod cifar10;
pub mod dataset;

pub use cifar10::{load_cifar10, CIFAR10_FILES};
pub use dataset::{ClassSlice, Dataset};

#[cfg(test)]
mod __tests__;
