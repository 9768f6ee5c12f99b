//! 판별자 가중치 클리핑

use crate::core::layers::ParamSet;
use anyhow::{ensure, Result};

/// 클리핑 한 번의 결과
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClipReport {
    /// 처리한 텐서 수
    pub tensors: usize,
    /// 경계 밖이라 잘린 원소 수
    pub clamped: usize,
    /// 클리핑 전 절댓값 최대
    pub max_abs_before: f32,
}

/// 모든 파라미터를 [-bound, bound] 상자 안으로 제자리 클램프
#[derive(Debug, Clone, Copy)]
pub struct WeightClipper {
    bound: f32,
}

impl WeightClipper {
    pub fn new(bound: f32) -> Result<Self> {
        ensure!(bound > 0.0 && bound.is_finite(), "클리핑 경계는 양수여야 합니다: {}", bound);
        Ok(Self { bound })
    }

    pub fn bound(&self) -> f32 {
        self.bound
    }

    pub fn clip(&self, params: &ParamSet) -> Result<ClipReport> {
        let mut report = ClipReport::default();
        for (_, var) in params.iter() {
            let tensor = var.as_tensor().detach();
            let abs = tensor.abs()?;
            report.max_abs_before = report
                .max_abs_before
                .max(abs.flatten_all()?.max(0)?.to_scalar::<f32>()?);
            report.clamped += abs
                .gt(self.bound)?
                .to_dtype(candle_core::DType::U32)?
                .sum_all()?
                .to_scalar::<u32>()? as usize;

            var.set(&tensor.clamp(-self.bound, self.bound)?)?;
            report.tensors += 1;
        }
        Ok(report)
    }
}
