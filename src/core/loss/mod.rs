//! # 적대적 손실
//!
//! 판별자 점수(logit)에 시그모이드 교차 엔트로피를 적용한다. 가중치 클리핑을
//! 쓰는 구조이지만 손실은 선형 Wasserstein 손실이 아니라 교차 엔트로피 그대로다.

use anyhow::Result;
use candle_core::Tensor;

/// 한 스텝의 스칼라 손실 쌍
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct GanLosses {
    pub critic: f32,
    pub generator: f32,
}

impl GanLosses {
    pub fn is_finite(&self) -> bool {
        self.critic.is_finite() && self.generator.is_finite()
    }
}

/// 수치적으로 안정한 시그모이드 교차 엔트로피의 평균
///
/// `max(x, 0) - x * z + ln(1 + exp(-|x|))`, z는 모든 원소에 같은 목표값.
pub fn sigmoid_cross_entropy_with_logits(logits: &Tensor, target: f64) -> Result<Tensor> {
    let softplus_tail = logits.abs()?.neg()?.exp()?.affine(1.0, 1.0)?.log()?;
    let loss = logits.relu()?.sub(&logits.affine(target, 0.0)?)?.add(&softplus_tail)?;
    Ok(loss.mean_all()?)
}

/// 생성자 손실: 가짜 점수를 "진짜"(1)로 판정받도록
pub fn generator_loss(fake_scores: &Tensor) -> Result<Tensor> {
    sigmoid_cross_entropy_with_logits(fake_scores, 1.0)
}

/// 판별자 손실: 진짜는 1, 가짜는 0
pub fn critic_loss(real_scores: &Tensor, fake_scores: &Tensor) -> Result<Tensor> {
    let real = sigmoid_cross_entropy_with_logits(real_scores, 1.0)?;
    let fake = sigmoid_cross_entropy_with_logits(fake_scores, 0.0)?;
    Ok(real.add(&fake)?)
}

/// 0차원 손실 텐서 → f32
pub fn scalar(loss: &Tensor) -> Result<f32> {
    Ok(loss.to_dtype(candle_core::DType::F32)?.to_scalar::<f32>()?)
}
