//! 생성자/판별자 옵티마이저 제어기

use super::{ClipReport, ParamsRmsProp, RmsProp, WeightClipper};
use crate::core::config::OptimizerConfig;
use crate::core::networks::{Critic, Generator};
use anyhow::Result;
use candle_core::Tensor;
use candle_nn::Optimizer;

/// 두 네트워크의 갱신 제어기
///
/// 옵티마이저 두 개는 각각 정확히 한 네트워크의 `ParamSet`으로만 만들어진다.
/// 한쪽 손실의 역전파 결과로 다른 쪽 파라미터가 바뀌는 일은 없다.
#[derive(Debug)]
pub struct AdversarialOptimizer {
    generator_opt: RmsProp,
    critic_opt: RmsProp,
    clipper: WeightClipper,
}

impl AdversarialOptimizer {
    pub fn new(config: &OptimizerConfig, generator: &Generator, critic: &Critic) -> Result<Self> {
        let params = ParamsRmsProp {
            lr: config.learning_rate,
            decay: config.decay,
            momentum: config.momentum,
            epsilon: config.epsilon,
        };
        Ok(Self {
            generator_opt: RmsProp::new(generator.params().vars(), params)?,
            critic_opt: RmsProp::new(critic.params().vars(), params)?,
            clipper: WeightClipper::new(config.clip_value)?,
        })
    }

    /// 판별자 손실 역전파 후 판별자 파라미터만 갱신
    pub fn step_critic(&mut self, critic_loss: &Tensor) -> Result<()> {
        let grads = critic_loss.backward()?;
        self.critic_opt.step(&grads)?;
        Ok(())
    }

    /// 판별자 파라미터 클리핑. 판별자 갱신 직후 매번 호출해야 한다.
    pub fn clip_critic(&self, critic: &Critic) -> Result<ClipReport> {
        self.clipper.clip(critic.params())
    }

    /// 생성자 손실 역전파 후 생성자 파라미터만 갱신
    pub fn step_generator(&mut self, generator_loss: &Tensor) -> Result<()> {
        let grads = generator_loss.backward()?;
        self.generator_opt.step(&grads)?;
        Ok(())
    }

    pub fn clipper(&self) -> &WeightClipper {
        &self.clipper
    }

    pub fn generator_optimizer(&self) -> &RmsProp {
        &self.generator_opt
    }

    pub fn critic_optimizer(&self) -> &RmsProp {
        &self.critic_opt
    }

    /// 두 옵티마이저 학습률 동시 변경
    pub fn set_learning_rate(&mut self, lr: f64) {
        self.generator_opt.set_learning_rate(lr);
        self.critic_opt.set_learning_rate(lr);
    }
}
