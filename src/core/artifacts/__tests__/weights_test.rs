use crate::core::artifacts::{export_weights, load_weights, CRITIC_WEIGHTS, GENERATOR_WEIGHTS};
use crate::core::config::GanConfig;
use crate::core::layers::Initializer;
use crate::core::networks::{Critic, Generator, Phase};
use candle_core::{Device, Tensor};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn networks(seed: u64) -> (Generator, Critic) {
    let config = GanConfig::toy();
    let mut init = Initializer::new(seed, &Device::Cpu);
    let generator = Generator::new(&config.architecture, config.noise_dim, &mut init).unwrap();
    let critic = Critic::new(&config.architecture, &mut init).unwrap();
    (generator, critic)
}

#[test]
fn 가중치_복원_테스트() {
    let dir = tempfile::tempdir().unwrap();
    let (generator, critic) = networks(1);

    // 이동 통계가 기본값과 달라지도록 학습 모드 한 번
    let noise = Tensor::from_vec((0..32).map(|i| (i as f32 * 0.3).sin()).collect(), (4, 8), &Device::Cpu).unwrap();
    generator.forward(&noise, Phase::Train, &mut StdRng::seed_from_u64(0)).unwrap();
    let expected = generator.generate(&noise).unwrap().flatten_all().unwrap().to_vec1::<f32>().unwrap();

    export_weights(dir.path(), &generator, &critic).unwrap();
    assert!(dir.path().join(GENERATOR_WEIGHTS).exists());
    assert!(dir.path().join(CRITIC_WEIGHTS).exists());

    let (restored_g, restored_d) = networks(2);
    load_weights(dir.path(), &restored_g, &restored_d, &Device::Cpu).unwrap();

    assert_eq!(generator.params().snapshot().unwrap(), restored_g.params().snapshot().unwrap());
    assert_eq!(critic.params().snapshot().unwrap(), restored_d.params().snapshot().unwrap());
    let actual = restored_g.generate(&noise).unwrap().flatten_all().unwrap().to_vec1::<f32>().unwrap();
    assert_eq!(expected, actual);
}

#[test]
fn 없는_디렉토리_오류_테스트() {
    let dir = tempfile::tempdir().unwrap();
    let (generator, critic) = networks(0);
    assert!(load_weights(dir.path().join("missing"), &generator, &critic, &Device::Cpu).is_err());
}
