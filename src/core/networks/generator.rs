//! 노이즈 → 이미지 생성자

use super::{activate, Phase};
use crate::core::config::ArchitectureConfig;
use crate::core::layers::{conv_transpose2d, dense, upsample_config, BatchNorm, Initializer, ParamSet};
use anyhow::{ensure, Result};
use candle_core::{Module, Tensor};
use candle_nn::{ConvTranspose2d, Linear};
use rand::rngs::StdRng;
use std::collections::HashMap;

const UPSAMPLE_KERNEL: usize = 4;

/// 업샘플링 한 단계: 전치 합성곱 + 배치 정규화
#[derive(Debug, Clone)]
struct UpsampleStage {
    conv: ConvTranspose2d,
    norm: BatchNorm,
}

/// 생성자
///
/// 노이즈를 작은 특징 맵으로 투영한 뒤, 단계마다 해상도를 두 배로 키우고 채널을
/// 줄인다. 마지막 단계는 tanh로 [-1, 1] 범위의 이미지를 낸다.
#[derive(Debug, Clone)]
pub struct Generator {
    params: ParamSet,
    project: Linear,
    project_norm: BatchNorm,
    stages: Vec<UpsampleStage>,
    output: ConvTranspose2d,
    noise_dim: usize,
    base: usize,
    base_channels: usize,
    alpha: f64,
    keep_prob: f32,
}

impl Generator {
    pub fn new(arch: &ArchitectureConfig, noise_dim: usize, init: &mut Initializer) -> Result<Self> {
        arch.validate()?;
        ensure!(noise_dim > 0, "noise_dim은 0보다 커야 합니다");

        let mut params = ParamSet::new("generator");
        let base = arch.base_resolution();
        let maps = &arch.feature_maps;
        let base_channels = maps[0];

        let project = dense(init, &mut params, "project", noise_dim, base_channels * base * base)?;
        let project_norm = BatchNorm::new(
            init,
            &mut params,
            "project_norm",
            base_channels,
            arch.bn_momentum,
            arch.bn_epsilon,
        )?;

        let mut stages = Vec::with_capacity(maps.len() - 1);
        for (i, pair) in maps.windows(2).enumerate() {
            let (c_in, c_out) = (pair[0], pair[1]);
            let conv = conv_transpose2d(
                init,
                &mut params,
                &format!("up{i}"),
                c_in,
                c_out,
                UPSAMPLE_KERNEL,
                upsample_config(),
            )?;
            let norm = BatchNorm::new(
                init,
                &mut params,
                &format!("up{i}_norm"),
                c_out,
                arch.bn_momentum,
                arch.bn_epsilon,
            )?;
            stages.push(UpsampleStage { conv, norm });
        }

        let last = maps[maps.len() - 1];
        let output = conv_transpose2d(
            init,
            &mut params,
            "to_image",
            last,
            arch.image_channels,
            UPSAMPLE_KERNEL,
            upsample_config(),
        )?;

        Ok(Self {
            params,
            project,
            project_norm,
            stages,
            output,
            noise_dim,
            base,
            base_channels,
            alpha: arch.leaky_alpha,
            keep_prob: arch.keep_prob,
        })
    }

    /// 생성자 소유 파라미터
    pub fn params(&self) -> &ParamSet {
        &self.params
    }

    pub fn noise_dim(&self) -> usize {
        self.noise_dim
    }

    /// 학습/관찰 모드 순전파 (드롭아웃 마스크는 `rng`에서)
    pub fn forward(&self, noise: &Tensor, phase: Phase, rng: &mut StdRng) -> Result<Tensor> {
        self.run(noise, phase, Some(rng))
    }

    /// 추론 모드 생성: 이동 통계 사용, 드롭아웃 없음. 같은 노이즈면 같은 결과.
    pub fn generate(&self, noise: &Tensor) -> Result<Tensor> {
        self.run(noise, Phase::Inference, None)
    }

    fn run(&self, noise: &Tensor, phase: Phase, mut rng: Option<&mut StdRng>) -> Result<Tensor> {
        let (batch, dim) = noise.dims2()?;
        ensure!(
            dim == self.noise_dim,
            "노이즈 차원 불일치: 입력 {}, 생성자 {}",
            dim,
            self.noise_dim
        );

        let x = self.project.forward(noise)?;
        let x = x.reshape((batch, self.base_channels, self.base, self.base))?;
        let x = self.project_norm.forward(&x, phase)?;
        let mut x = activate(&x, self.alpha, self.keep_prob, phase, rng.as_deref_mut())?;

        for stage in &self.stages {
            let h = stage.conv.forward(&x)?;
            let h = stage.norm.forward(&h, phase)?;
            x = activate(&h, self.alpha, self.keep_prob, phase, rng.as_deref_mut())?;
        }

        Ok(self.output.forward(&x)?.tanh()?)
    }

    fn norms(&self) -> impl Iterator<Item = &BatchNorm> {
        std::iter::once(&self.project_norm).chain(self.stages.iter().map(|s| &s.norm))
    }

    /// 파라미터 + 배치 정규화 버퍼
    pub fn named_tensors(&self) -> Result<HashMap<String, Tensor>> {
        let mut out = self.params.named_tensors()?;
        for norm in self.norms() {
            out.extend(norm.buffers()?);
        }
        Ok(out)
    }

    /// 내보낸 텐서에서 복원
    pub fn load_named(&self, tensors: &HashMap<String, Tensor>) -> Result<()> {
        self.params.load_from(tensors)?;
        for norm in self.norms() {
            norm.load_buffers(tensors)?;
        }
        Ok(())
    }
}
