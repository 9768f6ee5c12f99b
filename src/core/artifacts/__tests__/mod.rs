//! # 산출물 단위테스트

pub mod image_grid_test;
pub mod metrics_test;
pub mod sink_test;
pub mod weights_test;
