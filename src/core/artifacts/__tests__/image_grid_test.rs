use crate::core::artifacts::ImageGrid;
use candle_core::{DType, Device, Tensor};

#[test]
fn 그리드_크기_테스트() {
    let samples = Tensor::zeros((10, 3, 8, 8), DType::F32, &Device::Cpu).unwrap();
    let grid = ImageGrid::from_samples(&samples, 5).unwrap();

    // 5열 2행, 간격 2픽셀
    assert_eq!(grid.width(), 5 * 8 + 4 * 2);
    assert_eq!(grid.height(), 2 * 8 + 2);
    assert_eq!(grid.tiles(), 10);
}

#[test]
fn 기본_80장_20열_테스트() {
    let samples = Tensor::zeros((80, 3, 32, 32), DType::F32, &Device::Cpu).unwrap();
    let grid = ImageGrid::from_samples(&samples, 20).unwrap();
    assert_eq!(grid.width(), 20 * 32 + 19 * 2);
    assert_eq!(grid.height(), 4 * 32 + 3 * 2);
}

#[test]
fn 픽셀값_변환_테스트() {
    // 첫 장은 -1(검정), 둘째 장은 1(흰색)
    let black = Tensor::full(-1f32, (1, 3, 2, 2), &Device::Cpu).unwrap();
    let white = Tensor::ones((1, 3, 2, 2), DType::F32, &Device::Cpu).unwrap();
    let samples = Tensor::cat(&[&black, &white], 0).unwrap();
    let grid = ImageGrid::from_samples(&samples, 2).unwrap();

    assert_eq!(grid.pixel(0, 0), [0, 0, 0]);
    assert_eq!(grid.pixel(4, 1), [255, 255, 255]);
    // 간격은 검정
    assert_eq!(grid.pixel(2, 0), [0, 0, 0]);
}

#[test]
fn 범위밖_값_클램프_테스트() {
    let samples = Tensor::full(3f32, (1, 1, 1, 1), &Device::Cpu).unwrap();
    let grid = ImageGrid::from_samples(&samples, 1).unwrap();
    assert_eq!(grid.pixel(0, 0), [255, 255, 255]);
}

#[test]
fn ppm_헤더_테스트() {
    let samples = Tensor::zeros((2, 3, 4, 4), DType::F32, &Device::Cpu).unwrap();
    let grid = ImageGrid::from_samples(&samples, 2).unwrap();
    let ppm = grid.to_ppm();

    let header = b"P6\n10 4\n255\n";
    assert_eq!(&ppm[..header.len()], header);
    assert_eq!(ppm.len(), header.len() + 10 * 4 * 3);
}

#[test]
fn 지원하지_않는_채널_오류_테스트() {
    let samples = Tensor::zeros((2, 2, 4, 4), DType::F32, &Device::Cpu).unwrap();
    assert!(ImageGrid::from_samples(&samples, 2).is_err());
    let samples = Tensor::zeros((2, 3, 4, 4), DType::F32, &Device::Cpu).unwrap();
    assert!(ImageGrid::from_samples(&samples, 0).is_err());
}
