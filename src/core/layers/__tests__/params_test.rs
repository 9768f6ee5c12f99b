use crate::core::layers::{Initializer, ParamSet};
use candle_core::{Device, Tensor};
use std::collections::HashMap;

#[test]
fn 파라미터_등록_중복거부_테스트() {
    let init = Initializer::new(0, &Device::Cpu);
    let mut params = ParamSet::new("test");
    params.insert("w", init.zeros(&[2, 2]).unwrap()).unwrap();
    params.insert("b", init.zeros(&[2]).unwrap()).unwrap();

    assert_eq!(params.len(), 2);
    assert_eq!(params.element_count(), 6);
    assert_eq!(params.names(), vec!["w", "b"]);
    assert!(params.insert("w", init.ones(&[1]).unwrap()).is_err());
}

#[test]
fn 변수_저장소_공유_테스트() {
    let init = Initializer::new(0, &Device::Cpu);
    let mut params = ParamSet::new("test");
    params.insert("w", init.zeros(&[3]).unwrap()).unwrap();

    // 옵티마이저 쪽에서 받은 변수를 바꾸면 집합 안의 값도 바뀐다
    let vars = params.vars();
    vars[0].set(&Tensor::new(&[1f32, 2., 3.], &Device::Cpu).unwrap()).unwrap();

    let snapshot = params.snapshot().unwrap();
    assert_eq!(snapshot["w"], vec![1.0, 2.0, 3.0]);
    assert_eq!(params.max_abs().unwrap(), 3.0);
}

#[test]
fn 시드_고정_초기화_테스트() {
    let mut a = Initializer::new(7, &Device::Cpu);
    let mut b = Initializer::new(7, &Device::Cpu);
    let mut c = Initializer::new(8, &Device::Cpu);

    let va = a.glorot_uniform(&[4, 5], 5, 4).unwrap().flatten_all().unwrap().to_vec1::<f32>().unwrap();
    let vb = b.glorot_uniform(&[4, 5], 5, 4).unwrap().flatten_all().unwrap().to_vec1::<f32>().unwrap();
    let vc = c.glorot_uniform(&[4, 5], 5, 4).unwrap().flatten_all().unwrap().to_vec1::<f32>().unwrap();

    assert_eq!(va, vb, "같은 시드는 같은 값");
    assert_ne!(va, vc, "다른 시드는 다른 값");

    let limit = (6.0f32 / 9.0).sqrt();
    assert!(va.iter().all(|v| v.abs() <= limit + 1e-6));
}

#[test]
fn 텐서_복원_형상검사_테스트() {
    let init = Initializer::new(0, &Device::Cpu);
    let mut params = ParamSet::new("test");
    params.insert("w", init.zeros(&[2]).unwrap()).unwrap();

    let mut good = HashMap::new();
    good.insert("w".to_string(), Tensor::new(&[5f32, 6.], &Device::Cpu).unwrap());
    params.load_from(&good).unwrap();
    assert_eq!(params.snapshot().unwrap()["w"], vec![5.0, 6.0]);

    let mut bad = HashMap::new();
    bad.insert("w".to_string(), Tensor::new(&[1f32, 2., 3.], &Device::Cpu).unwrap());
    assert!(params.load_from(&bad).is_err());

    assert!(params.load_from(&HashMap::new()).is_err());
}
