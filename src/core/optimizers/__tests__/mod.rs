//! # 옵티마이저 단위테스트

pub mod controller_test;
pub mod rmsprop_test;
