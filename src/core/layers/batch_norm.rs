//! 호출 모드를 따르는 배치 정규화

use super::{Initializer, ParamSet, Phase};
use anyhow::{ensure, Result};
use candle_core::{DType, Tensor, Var};
use std::collections::HashMap;

/// 채널별 배치 정규화 (NCHW)
///
/// gamma/beta는 학습 파라미터로 `ParamSet`에 등록되고, 이동 평균/분산은
/// 학습 대상이 아닌 버퍼라서 옵티마이저와 클리핑 어느 쪽도 건드리지 않는다.
/// 버퍼는 `Var`에 두고 제자리 갱신하므로 순전파는 `&self`로 충분하다.
#[derive(Debug, Clone)]
pub struct BatchNorm {
    name: String,
    channels: usize,
    gamma: Tensor,
    beta: Tensor,
    running_mean: Var,
    running_var: Var,
    momentum: f64,
    eps: f64,
}

impl BatchNorm {
    pub fn new(
        init: &mut Initializer,
        params: &mut ParamSet,
        prefix: &str,
        channels: usize,
        momentum: f64,
        eps: f64,
    ) -> Result<Self> {
        let gamma = init.ones(&[channels])?;
        let beta = init.zeros(&[channels])?;
        let running_mean = Var::zeros(channels, DType::F32, init.device())?;
        let running_var = Var::ones(channels, DType::F32, init.device())?;

        let layer = Self {
            name: prefix.to_string(),
            channels,
            gamma: gamma.as_tensor().clone(),
            beta: beta.as_tensor().clone(),
            running_mean,
            running_var,
            momentum,
            eps,
        };
        params.insert(format!("{prefix}.gamma"), gamma)?;
        params.insert(format!("{prefix}.beta"), beta)?;
        Ok(layer)
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn running_mean(&self) -> &Tensor {
        self.running_mean.as_tensor()
    }

    pub fn running_var(&self) -> &Tensor {
        self.running_var.as_tensor()
    }

    /// 정규화 수행
    ///
    /// `Phase::Train`에서는 이동 통계 갱신이 반환 전에 끝난다. 그래서 뒤이은
    /// 옵티마이저 스텝은 항상 갱신된 통계 이후에 실행된다.
    pub fn forward(&self, x: &Tensor, phase: Phase) -> Result<Tensor> {
        let (_, c, _, _) = x.dims4()?;
        ensure!(
            c == self.channels,
            "{}: 채널 수 불일치 (입력 {}, 레이어 {})",
            self.name,
            c,
            self.channels
        );
        let shape = (1, c, 1, 1);

        let (mean, var) = if phase.uses_batch_stats() {
            let mean = channel_mean(x)?;
            let var = channel_mean(&x.broadcast_sub(&mean)?.sqr()?)?;
            if phase == Phase::Train {
                self.update_running(&mean, &var)?;
            }
            (mean, var)
        } else {
            (
                self.running_mean.as_tensor().reshape(shape)?,
                self.running_var.as_tensor().reshape(shape)?,
            )
        };

        let inv_std = var.affine(1.0, self.eps)?.sqrt()?.recip()?;
        let normalized = x.broadcast_sub(&mean)?.broadcast_mul(&inv_std)?;
        Ok(normalized
            .broadcast_mul(&self.gamma.reshape(shape)?)?
            .broadcast_add(&self.beta.reshape(shape)?)?)
    }

    fn update_running(&self, mean: &Tensor, var: &Tensor) -> Result<()> {
        let m = self.momentum;
        let batch_mean = mean.detach().flatten_all()?.affine(1.0 - m, 0.0)?;
        let batch_var = var.detach().flatten_all()?.affine(1.0 - m, 0.0)?;
        let next_mean = self.running_mean.as_tensor().affine(m, 0.0)?.add(&batch_mean)?;
        let next_var = self.running_var.as_tensor().affine(m, 0.0)?.add(&batch_var)?;
        self.running_mean.set(&next_mean)?;
        self.running_var.set(&next_var)?;
        Ok(())
    }

    /// 내보내기용 버퍼
    pub fn buffers(&self) -> Result<HashMap<String, Tensor>> {
        let mut out = HashMap::new();
        out.insert(format!("{}.running_mean", self.name), self.running_mean.as_tensor().copy()?);
        out.insert(format!("{}.running_var", self.name), self.running_var.as_tensor().copy()?);
        Ok(out)
    }

    /// 저장된 버퍼 복원 (없으면 그대로 둔다)
    pub fn load_buffers(&self, tensors: &HashMap<String, Tensor>) -> Result<()> {
        if let Some(t) = tensors.get(&format!("{}.running_mean", self.name)) {
            ensure!(t.dims1()? == self.channels, "{}: running_mean 형상 불일치", self.name);
            self.running_mean.set(&t.to_dtype(DType::F32)?)?;
        }
        if let Some(t) = tensors.get(&format!("{}.running_var", self.name)) {
            ensure!(t.dims1()? == self.channels, "{}: running_var 형상 불일치", self.name);
            self.running_var.set(&t.to_dtype(DType::F32)?)?;
        }
        Ok(())
    }
}

/// (N, C, H, W) → (1, C, 1, 1) 채널 평균
fn channel_mean(x: &Tensor) -> Result<Tensor> {
    Ok(x.mean_keepdim(0)?.mean_keepdim(2)?.mean_keepdim(3)?)
}
