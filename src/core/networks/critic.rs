//! 이미지 → 실수 점수 판별자(critic)

use super::{activate, Phase};
use crate::core::config::ArchitectureConfig;
use crate::core::layers::{conv2d, dense, downsample_config, BatchNorm, Initializer, ParamSet};
use anyhow::{ensure, Result};
use candle_core::{Module, Tensor};
use candle_nn::{Conv2d, Linear};
use rand::rngs::StdRng;
use std::collections::HashMap;

const DOWNSAMPLE_KERNEL: usize = 3;

/// 다운샘플링 한 단계 (첫 단계는 정규화 없음)
#[derive(Debug, Clone)]
struct DownsampleStage {
    conv: Conv2d,
    norm: Option<BatchNorm>,
}

/// 판별자
///
/// 생성자를 뒤집은 구조. 출력은 시그모이드를 거치지 않은 점수다.
/// 배치 정규화는 모드와 관계없이 배치 통계를 쓴다.
#[derive(Debug, Clone)]
pub struct Critic {
    params: ParamSet,
    stages: Vec<DownsampleStage>,
    head: Linear,
    image_size: usize,
    image_channels: usize,
    alpha: f64,
    keep_prob: f32,
}

impl Critic {
    pub fn new(arch: &ArchitectureConfig, init: &mut Initializer) -> Result<Self> {
        arch.validate()?;

        let mut params = ParamSet::new("critic");
        let channels: Vec<usize> = arch.feature_maps.iter().rev().copied().collect();

        let mut stages = Vec::with_capacity(channels.len());
        let mut c_in = arch.image_channels;
        for (i, &c_out) in channels.iter().enumerate() {
            let conv = conv2d(
                init,
                &mut params,
                &format!("down{i}"),
                c_in,
                c_out,
                DOWNSAMPLE_KERNEL,
                downsample_config(),
            )?;
            let norm = if i == 0 {
                None
            } else {
                Some(BatchNorm::new(
                    init,
                    &mut params,
                    &format!("down{i}_norm"),
                    c_out,
                    arch.bn_momentum,
                    arch.bn_epsilon,
                )?)
            };
            stages.push(DownsampleStage { conv, norm });
            c_in = c_out;
        }

        let base = arch.base_resolution();
        let head = dense(init, &mut params, "score", c_in * base * base, 1)?;

        Ok(Self {
            params,
            stages,
            head,
            image_size: arch.image_size,
            image_channels: arch.image_channels,
            alpha: arch.leaky_alpha,
            keep_prob: arch.keep_prob,
        })
    }

    /// 판별자 소유 파라미터
    pub fn params(&self) -> &ParamSet {
        &self.params
    }

    /// 진짜 배치 채점
    pub fn score_real(&self, images: &Tensor, phase: Phase, rng: &mut StdRng) -> Result<Tensor> {
        self.score(images, phase, rng)
    }

    /// 생성자 출력 채점. `score_real`과 같은 파라미터를 그대로 재사용한다.
    pub fn score_fake(&self, images: &Tensor, phase: Phase, rng: &mut StdRng) -> Result<Tensor> {
        self.score(images, phase, rng)
    }

    fn score(&self, images: &Tensor, phase: Phase, rng: &mut StdRng) -> Result<Tensor> {
        let (_, c, h, w) = images.dims4()?;
        ensure!(
            c == self.image_channels && h == self.image_size && w == self.image_size,
            "판별자 입력 형상 불일치: ({}, {}, {}) vs ({}, {}, {})",
            c,
            h,
            w,
            self.image_channels,
            self.image_size,
            self.image_size
        );

        let norm_phase = if phase == Phase::Train { Phase::Train } else { Phase::Observe };
        let mut x = images.clone();
        for stage in &self.stages {
            let mut h = stage.conv.forward(&x)?;
            if let Some(norm) = &stage.norm {
                h = norm.forward(&h, norm_phase)?;
            }
            x = activate(&h, self.alpha, self.keep_prob, phase, Some(&mut *rng))?;
        }

        let flat = x.flatten_from(1)?;
        Ok(self.head.forward(&flat)?)
    }

    fn norms(&self) -> impl Iterator<Item = &BatchNorm> {
        self.stages.iter().filter_map(|s| s.norm.as_ref())
    }

    /// 파라미터 + 배치 정규화 버퍼
    pub fn named_tensors(&self) -> Result<HashMap<String, Tensor>> {
        let mut out = self.params.named_tensors()?;
        for norm in self.norms() {
            out.extend(norm.buffers()?);
        }
        Ok(out)
    }

    pub fn load_named(&self, tensors: &HashMap<String, Tensor>) -> Result<()> {
        self.params.load_from(tensors)?;
        for norm in self.norms() {
            norm.load_buffers(tensors)?;
        }
        Ok(())
    }
}
