//! candle-nn 모듈 생성 헬퍼
//!
//! 가중치는 `Initializer`로 만들고 `ParamSet`에 등록한 뒤, 같은 저장소를 공유하는
//! 텐서로 candle-nn 모듈을 조립한다.

use super::{Initializer, ParamSet};
use anyhow::Result;
use candle_nn::{Conv2d, Conv2dConfig, ConvTranspose2d, ConvTranspose2dConfig, Linear};

/// 해상도를 두 배로 키우는 전치 합성곱 설정 (kernel 4, stride 2, padding 1)
pub fn upsample_config() -> ConvTranspose2dConfig {
    ConvTranspose2dConfig {
        padding: 1,
        output_padding: 0,
        stride: 2,
        dilation: 1,
    }
}

/// 해상도를 절반으로 줄이는 합성곱 설정 (kernel 3, stride 2, padding 1)
pub fn downsample_config() -> Conv2dConfig {
    Conv2dConfig {
        padding: 1,
        stride: 2,
        ..Default::default()
    }
}

/// 완전연결층: weight (out, in), bias (out)
pub fn dense(
    init: &mut Initializer,
    params: &mut ParamSet,
    prefix: &str,
    in_dim: usize,
    out_dim: usize,
) -> Result<Linear> {
    let weight = init.glorot_uniform(&[out_dim, in_dim], in_dim, out_dim)?;
    let bias = init.zeros(&[out_dim])?;
    let layer = Linear::new(weight.as_tensor().clone(), Some(bias.as_tensor().clone()));
    params.insert(format!("{prefix}.weight"), weight)?;
    params.insert(format!("{prefix}.bias"), bias)?;
    Ok(layer)
}

/// 합성곱: weight (c_out, c_in, k, k)
pub fn conv2d(
    init: &mut Initializer,
    params: &mut ParamSet,
    prefix: &str,
    c_in: usize,
    c_out: usize,
    kernel: usize,
    config: Conv2dConfig,
) -> Result<Conv2d> {
    let area = kernel * kernel;
    let weight = init.glorot_uniform(&[c_out, c_in, kernel, kernel], c_in * area, c_out * area)?;
    let bias = init.zeros(&[c_out])?;
    let layer = Conv2d::new(weight.as_tensor().clone(), Some(bias.as_tensor().clone()), config);
    params.insert(format!("{prefix}.weight"), weight)?;
    params.insert(format!("{prefix}.bias"), bias)?;
    Ok(layer)
}

/// 전치 합성곱: weight (c_in, c_out, k, k)
pub fn conv_transpose2d(
    init: &mut Initializer,
    params: &mut ParamSet,
    prefix: &str,
    c_in: usize,
    c_out: usize,
    kernel: usize,
    config: ConvTranspose2dConfig,
) -> Result<ConvTranspose2d> {
    let area = kernel * kernel;
    let weight = init.glorot_uniform(&[c_in, c_out, kernel, kernel], c_in * area, c_out * area)?;
    let bias = init.zeros(&[c_out])?;
    let layer = ConvTranspose2d::new(weight.as_tensor().clone(), Some(bias.as_tensor().clone()), config);
    params.insert(format!("{prefix}.weight"), weight)?;
    params.insert(format!("{prefix}.bias"), bias)?;
    Ok(layer)
}
