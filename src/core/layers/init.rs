//! 시드 고정 파라미터 초기화

use anyhow::Result;
use candle_core::{Device, Tensor, Var};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// 파라미터 초기화기
///
/// candle의 CPU 난수는 시드를 받지 않으므로 값은 여기서 직접 뽑는다.
pub struct Initializer {
    rng: StdRng,
    device: Device,
}

impl Initializer {
    pub fn new(seed: u64, device: &Device) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            device: device.clone(),
        }
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    /// Glorot(Xavier) 균등 분포: U(-limit, limit), limit = sqrt(6 / (fan_in + fan_out))
    pub fn glorot_uniform(&mut self, shape: &[usize], fan_in: usize, fan_out: usize) -> Result<Var> {
        let limit = (6.0 / (fan_in + fan_out) as f64).sqrt() as f32;
        let len: usize = shape.iter().product();
        let values: Vec<f32> = (0..len).map(|_| self.rng.gen_range(-limit..=limit)).collect();
        let tensor = Tensor::from_vec(values, shape, &self.device)?;
        Ok(Var::from_tensor(&tensor)?)
    }

    /// 상수로 채운 파라미터
    pub fn constant(&self, shape: &[usize], value: f32) -> Result<Var> {
        let len: usize = shape.iter().product();
        let tensor = Tensor::from_vec(vec![value; len], shape, &self.device)?;
        Ok(Var::from_tensor(&tensor)?)
    }

    pub fn zeros(&self, shape: &[usize]) -> Result<Var> {
        self.constant(shape, 0.0)
    }

    pub fn ones(&self, shape: &[usize]) -> Result<Var> {
        self.constant(shape, 1.0)
    }
}
