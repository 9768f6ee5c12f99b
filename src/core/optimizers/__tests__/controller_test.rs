use crate::core::config::GanConfig;
use crate::core::layers::Initializer;
use crate::core::loss::{critic_loss, generator_loss};
use crate::core::networks::{Critic, Generator, Phase};
use crate::core::optimizers::AdversarialOptimizer;
use candle_core::{Device, Tensor};
use rand::rngs::StdRng;
use rand::SeedableRng;

struct Fixture {
    generator: Generator,
    critic: Critic,
    optimizer: AdversarialOptimizer,
    real: Tensor,
    noise: Tensor,
    rng: StdRng,
}

fn fixture() -> Fixture {
    let config = GanConfig::toy();
    let mut init = Initializer::new(config.seed, &Device::Cpu);
    let generator = Generator::new(&config.architecture, config.noise_dim, &mut init).unwrap();
    let critic = Critic::new(&config.architecture, &mut init).unwrap();
    let optimizer = AdversarialOptimizer::new(&config.optimizer, &generator, &critic).unwrap();

    let real: Vec<f32> = (0..4 * 3 * 8 * 8).map(|i| ((i % 11) as f32 / 5.0) - 1.0).collect();
    let noise: Vec<f32> = (0..4 * 8).map(|i| (i as f32 * 0.61).cos()).collect();
    Fixture {
        generator,
        critic,
        optimizer,
        real: Tensor::from_vec(real, (4, 3, 8, 8), &Device::Cpu).unwrap(),
        noise: Tensor::from_vec(noise, (4, 8), &Device::Cpu).unwrap(),
        rng: StdRng::seed_from_u64(0),
    }
}

#[test]
fn 옵티마이저_변수_분리_테스트() {
    let f = fixture();
    assert_eq!(f.optimizer.generator_optimizer().var_count(), f.generator.params().len());
    assert_eq!(f.optimizer.critic_optimizer().var_count(), f.critic.params().len());
    assert_eq!(f.optimizer.clipper().bound(), 0.01);
}

#[test]
fn 판별자_갱신은_생성자를_건드리지_않음_테스트() {
    let mut f = fixture();
    let g_before = f.generator.params().snapshot().unwrap();
    let d_before = f.critic.params().snapshot().unwrap();

    let fake = f.generator.forward(&f.noise, Phase::Train, &mut f.rng).unwrap().detach();
    let real_scores = f.critic.score_real(&f.real, Phase::Train, &mut f.rng).unwrap();
    let fake_scores = f.critic.score_fake(&fake, Phase::Train, &mut f.rng).unwrap();
    let loss = critic_loss(&real_scores, &fake_scores).unwrap();
    f.optimizer.step_critic(&loss).unwrap();

    assert_eq!(g_before, f.generator.params().snapshot().unwrap());
    assert_ne!(d_before, f.critic.params().snapshot().unwrap());
}

#[test]
fn 생성자_갱신은_판별자를_건드리지_않음_테스트() {
    let mut f = fixture();
    let g_before = f.generator.params().snapshot().unwrap();
    let d_before = f.critic.params().snapshot().unwrap();

    // 판별자를 통과한 그래프라도 생성자 옵티마이저는 생성자 변수만 본다
    let fake = f.generator.forward(&f.noise, Phase::Train, &mut f.rng).unwrap();
    let fake_scores = f.critic.score_fake(&fake, Phase::Train, &mut f.rng).unwrap();
    let loss = generator_loss(&fake_scores).unwrap();
    f.optimizer.step_generator(&loss).unwrap();

    assert_ne!(g_before, f.generator.params().snapshot().unwrap());
    assert_eq!(d_before, f.critic.params().snapshot().unwrap());
}

#[test]
fn 판별자_클리핑_테스트() {
    let f = fixture();
    // glorot 초기값은 0.01보다 크다
    assert!(f.critic.params().max_abs().unwrap() > 0.01);

    let report = f.optimizer.clip_critic(&f.critic).unwrap();
    assert_eq!(report.tensors, f.critic.params().len());
    assert!(report.clamped > 0);
    assert!(f.critic.params().max_abs().unwrap() <= 0.01);
}

#[test]
fn 학습률_동시_변경_테스트() {
    use candle_nn::Optimizer;

    let mut f = fixture();
    f.optimizer.set_learning_rate(0.0005);
    assert_eq!(f.optimizer.generator_optimizer().learning_rate(), 0.0005);
    assert_eq!(f.optimizer.critic_optimizer().learning_rate(), 0.0005);
}
