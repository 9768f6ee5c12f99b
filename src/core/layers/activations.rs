//! 활성화 함수와 드롭아웃

use anyhow::Result;
use candle_core::Tensor;
use rand::rngs::StdRng;
use rand::Rng;

/// Leaky ReLU: max(alpha * x, x)
pub fn leaky_relu(x: &Tensor, alpha: f64) -> Result<Tensor> {
    Ok(x.maximum(&x.affine(alpha, 0.0)?)?)
}

/// 드롭아웃 (역스케일 방식)
///
/// 마스크는 호출자의 시드 고정 RNG에서 뽑으므로 같은 시드면 같은 마스크가 나온다.
pub fn dropout(x: &Tensor, keep_prob: f32, rng: &mut StdRng) -> Result<Tensor> {
    if keep_prob >= 1.0 {
        return Ok(x.clone());
    }
    let scale = 1.0 / keep_prob;
    let mask: Vec<f32> = (0..x.elem_count())
        .map(|_| if rng.gen::<f32>() < keep_prob { scale } else { 0.0 })
        .collect();
    let mask = Tensor::from_vec(mask, x.dims(), x.device())?;
    Ok(x.mul(&mask)?)
}
