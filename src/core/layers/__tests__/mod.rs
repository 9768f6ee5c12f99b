//! # 레이어 단위테스트

pub mod params_test;
