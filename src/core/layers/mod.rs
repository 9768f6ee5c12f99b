//! # 레이어 구성요소
//!
//! candle 텐서 위에 얹는 얇은 레이어들. 파라미터는 네트워크별 `ParamSet`에
//! 명시적으로 등록되고, 초기화는 모두 시드 고정 RNG에서 나온다.

pub mod activations;
pub mod batch_norm;
pub mod builders;
pub mod init;
pub mod params;
pub mod phase;

pub use activations::{dropout, leaky_relu};
pub use batch_norm::BatchNorm;
pub use builders::{conv2d, conv_transpose2d, dense, downsample_config, upsample_config};
pub use init::Initializer;
pub use params::ParamSet;
pub use phase::Phase;

#[cfg(test)]
mod __tests__;
