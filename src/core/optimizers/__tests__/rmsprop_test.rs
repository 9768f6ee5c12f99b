use crate::core::optimizers::{ParamsRmsProp, RmsProp};
use approx::assert_relative_eq;
use candle_core::{Device, Tensor, Var};
use candle_nn::Optimizer;

#[test]
fn 기본_하이퍼파라미터_테스트() {
    let p = ParamsRmsProp::default();
    assert_eq!(p.lr, 0.001);
    assert_eq!(p.decay, 0.9);
    assert_eq!(p.momentum, 0.0);
    assert_eq!(p.epsilon, 1e-10);
}

#[test]
fn 첫_스텝_갱신값_테스트() {
    let x = Var::new(&[1f32, -2.0], &Device::Cpu).unwrap();
    let mut opt = RmsProp::new(vec![x.clone()], ParamsRmsProp::default()).unwrap();

    // loss = sum(x^2) → g = 2x
    let loss = x.as_tensor().sqr().unwrap().sum_all().unwrap();
    opt.step(&loss.backward().unwrap()).unwrap();

    // ms = 0.9 * 1 + 0.1 * g^2 → x -= lr * g / sqrt(ms)
    let expected = |x: f32| {
        let g = 2.0 * x;
        let ms = 0.9 + 0.1 * g * g;
        x - 0.001 * g / ms.sqrt()
    };
    let values = x.as_tensor().to_vec1::<f32>().unwrap();
    assert_relative_eq!(values[0], expected(1.0), epsilon = 1e-6);
    assert_relative_eq!(values[1], expected(-2.0), epsilon = 1e-6);
    assert_eq!(opt.steps(), 1);
}

#[test]
fn 모멘텀_누적_테스트() {
    let x = Var::new(&[1f32], &Device::Cpu).unwrap();
    let params = ParamsRmsProp {
        momentum: 0.5,
        ..Default::default()
    };
    let mut opt = RmsProp::new(vec![x.clone()], params).unwrap();

    // loss = x → g = 1 고정
    let mut expected = 1.0f32;
    let mut ms = 1.0f32;
    let mut mom = 0.0f32;
    for _ in 0..3 {
        let loss = x.as_tensor().sum_all().unwrap();
        opt.step(&loss.backward().unwrap()).unwrap();

        ms = 0.9 * ms + 0.1;
        mom = 0.5 * mom + 0.001 / ms.sqrt();
        expected -= mom;
    }
    assert_relative_eq!(x.as_tensor().to_vec1::<f32>().unwrap()[0], expected, epsilon = 1e-6);
}

#[test]
fn 그래디언트_없는_변수_건너뜀_테스트() {
    let used = Var::new(&[1f32], &Device::Cpu).unwrap();
    let unused = Var::new(&[3f32], &Device::Cpu).unwrap();
    let mut opt = RmsProp::new(vec![used.clone(), unused.clone()], ParamsRmsProp::default()).unwrap();
    assert_eq!(opt.var_count(), 2);

    let loss = used.as_tensor().sqr().unwrap().sum_all().unwrap();
    opt.step(&loss.backward().unwrap()).unwrap();

    assert!(used.as_tensor().to_vec1::<f32>().unwrap()[0] < 1.0);
    assert_eq!(unused.as_tensor().to_vec1::<f32>().unwrap()[0], 3.0);
}

#[test]
fn 학습률_변경_테스트() {
    let x = Var::new(&[1f32], &Device::Cpu).unwrap();
    let mut opt = RmsProp::new(vec![x], ParamsRmsProp::default()).unwrap();
    opt.set_learning_rate(0.01);
    assert_eq!(opt.learning_rate(), 0.01);
}

#[test]
fn 정수_변수_제외_테스트() {
    let float = Var::new(&[1f32], &Device::Cpu).unwrap();
    let int = Var::from_tensor(&Tensor::new(&[1u32], &Device::Cpu).unwrap()).unwrap();
    let opt = RmsProp::new(vec![float, int], ParamsRmsProp::default()).unwrap();
    assert_eq!(opt.var_count(), 1);
}
