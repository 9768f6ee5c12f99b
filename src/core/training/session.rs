//! 학습 세션: 두 네트워크, 옵티마이저, 상태, RNG를 한곳에

use super::TrainingState;
use crate::core::artifacts::load_weights;
use crate::core::config::GanConfig;
use crate::core::layers::Initializer;
use crate::core::loss::{critic_loss, generator_loss, scalar, GanLosses};
use crate::core::networks::{Critic, Generator, Phase};
use crate::core::optimizers::{AdversarialOptimizer, ClipReport};
use anyhow::{bail, ensure, Result};
use candle_core::{Device, Tensor};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::Path;

/// 초기화 RNG와 학습 RNG가 같은 수열을 쓰지 않도록 시드를 벌린다
const RUN_SEED_OFFSET: u64 = 0x9E37_79B9_7F4A_7C15;

/// 한 스텝 결과
#[derive(Debug, Clone, Copy)]
pub struct StepReport {
    /// 이 스텝 이후의 누적 스텝 번호
    pub step: u64,
    /// 갱신 후 다시 계산한 손실
    pub losses: GanLosses,
    /// 판별자 클리핑 결과
    pub clip: ClipReport,
}

/// 학습 세션
///
/// 스텝/에포크 카운터와 두 파라미터 집합을 소유하며 모든 단계에 참조로 전달된다.
pub struct TrainingSession {
    config: GanConfig,
    device: Device,
    generator: Generator,
    critic: Critic,
    optimizer: AdversarialOptimizer,
    state: TrainingState,
    rng: StdRng,
}

impl TrainingSession {
    /// 구성 검증 후 두 네트워크를 시드 고정으로 초기화
    pub fn new(config: GanConfig, device: &Device) -> Result<Self> {
        config.validate()?;

        let mut init = Initializer::new(config.seed, device);
        let generator = Generator::new(&config.architecture, config.noise_dim, &mut init)?;
        let critic = Critic::new(&config.architecture, &mut init)?;
        let optimizer = AdversarialOptimizer::new(&config.optimizer, &generator, &critic)?;
        let rng = StdRng::seed_from_u64(config.seed.wrapping_add(RUN_SEED_OFFSET));

        log::info!(
            "세션 초기화: 생성자 파라미터 {}개 ({} 원소), 판별자 파라미터 {}개 ({} 원소)",
            generator.params().len(),
            generator.params().element_count(),
            critic.params().len(),
            critic.params().element_count()
        );

        Ok(Self {
            config,
            device: device.clone(),
            generator,
            critic,
            optimizer,
            state: TrainingState::new(),
            rng,
        })
    }

    pub fn config(&self) -> &GanConfig {
        &self.config
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn generator(&self) -> &Generator {
        &self.generator
    }

    pub fn critic(&self) -> &Critic {
        &self.critic
    }

    pub fn optimizer(&self) -> &AdversarialOptimizer {
        &self.optimizer
    }

    pub fn state(&self) -> &TrainingState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut TrainingState {
        &mut self.state
    }

    /// 내보낸 가중치로 두 네트워크 값을 덮어쓴다
    pub fn load_weights(&mut self, dir: impl AsRef<Path>) -> Result<()> {
        load_weights(dir, &self.generator, &self.critic, &self.device)
    }

    /// U(-1, 1) 노이즈 (n, noise_dim)
    pub fn sample_noise(&mut self, n: usize) -> Result<Tensor> {
        let dim = self.config.noise_dim;
        let values: Vec<f32> = (0..n * dim).map(|_| self.rng.gen_range(-1.0f32..=1.0)).collect();
        Ok(Tensor::from_vec(values, (n, dim), &self.device)?)
    }

    /// 새 노이즈로 한 스텝
    pub fn train_step(&mut self, real: &Tensor) -> Result<StepReport> {
        let batch = real.dims4()?.0;
        let noise = self.sample_noise(batch)?;
        self.train_step_with_noise(real, &noise)
    }

    /// 주어진 배치와 노이즈로 한 스텝
    ///
    /// 순서는 고정이다:
    /// 1. 판별자 순전파/역전파/갱신
    /// 2. 판별자 파라미터 클리핑
    /// 3. 같은 노이즈로 생성자 순전파/역전파/갱신 (클리핑된 판별자로 채점)
    /// 4. 기록용 손실 재계산 (파라미터/버퍼 변경 없음)
    pub fn train_step_with_noise(&mut self, real: &Tensor, noise: &Tensor) -> Result<StepReport> {
        let batch = real.dims4()?.0;
        let (noise_batch, _) = noise.dims2()?;
        ensure!(
            batch == noise_batch,
            "진짜 배치 {}개와 노이즈 {}개가 맞지 않습니다",
            batch,
            noise_batch
        );

        // 1. 판별자
        let fake = self.generator.forward(noise, Phase::Train, &mut self.rng)?.detach();
        let real_scores = self.critic.score_real(real, Phase::Train, &mut self.rng)?;
        let fake_scores = self.critic.score_fake(&fake, Phase::Train, &mut self.rng)?;
        let d_loss = critic_loss(&real_scores, &fake_scores)?;
        self.optimizer.step_critic(&d_loss)?;

        // 2. 클리핑
        let clip = self.optimizer.clip_critic(&self.critic)?;

        // 3. 생성자
        let fake = self.generator.forward(noise, Phase::Train, &mut self.rng)?;
        let fake_scores = self.critic.score_fake(&fake, Phase::Train, &mut self.rng)?;
        let g_loss = generator_loss(&fake_scores)?;
        self.optimizer.step_generator(&g_loss)?;

        // 4. 기록용 손실
        let losses = self.evaluate(real, noise)?;

        self.state.step += 1;
        self.state.last_losses = Some(losses);
        self.state.last_clip = Some(clip);

        if self.config.abort_on_divergence && !losses.is_finite() {
            bail!(
                "손실 발산 (epoch {}, step {}): D={} G={}",
                self.state.epoch,
                self.state.step,
                losses.critic,
                losses.generator
            );
        }

        Ok(StepReport {
            step: self.state.step,
            losses,
            clip,
        })
    }

    /// 현재 파라미터로 두 손실 계산 (파라미터와 정규화 버퍼는 그대로)
    pub fn evaluate(&mut self, real: &Tensor, noise: &Tensor) -> Result<GanLosses> {
        let fake = self.generator.forward(noise, Phase::Observe, &mut self.rng)?;
        let real_scores = self.critic.score_real(real, Phase::Observe, &mut self.rng)?;
        let fake_scores = self.critic.score_fake(&fake, Phase::Observe, &mut self.rng)?;
        Ok(GanLosses {
            critic: scalar(&critic_loss(&real_scores, &fake_scores)?)?,
            generator: scalar(&generator_loss(&fake_scores)?)?,
        })
    }

    /// 새 노이즈로 추론 모드 샘플 n개 생성
    pub fn generate_samples(&mut self, n: usize) -> Result<Tensor> {
        let noise = self.sample_noise(n)?;
        self.generator.generate(&noise)
    }
}
