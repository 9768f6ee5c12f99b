//! # 생성자/판별자 네트워크
//!
//! 두 네트워크는 각자 하나의 `ParamSet`을 생성 시점에 만들어 소유한다.
//! 학습/관찰/추론 모드와 진짜/가짜 배치 채점은 모두 같은 객체의 호출 변형이다.

pub mod critic;
pub mod generator;

pub use crate::core::layers::Phase;
pub use critic::Critic;
pub use generator::Generator;

use crate::core::layers::{dropout, leaky_relu};
use anyhow::{bail, Result};
use candle_core::Tensor;
use rand::rngs::StdRng;

/// 각 단계 공통 후처리: Leaky ReLU → (학습 모드에서만) 드롭아웃
pub(crate) fn activate(
    x: &Tensor,
    alpha: f64,
    keep_prob: f32,
    phase: Phase,
    rng: Option<&mut StdRng>,
) -> Result<Tensor> {
    let x = leaky_relu(x, alpha)?;
    match (phase.is_stochastic(), rng) {
        (false, _) => Ok(x),
        (true, Some(rng)) => dropout(&x, keep_prob, rng),
        (true, None) => bail!("{:?} 모드의 드롭아웃에는 RNG가 필요합니다", phase),
    }
}

#[cfg(test)]
mod __tests__;
