//! 네트워크 가중치 내보내기/가져오기 (safetensors)

use crate::core::networks::{Critic, Generator};
use anyhow::{Context, Result};
use candle_core::Device;
use std::fs;
use std::path::Path;

pub const GENERATOR_WEIGHTS: &str = "generator.safetensors";
pub const CRITIC_WEIGHTS: &str = "critic.safetensors";

/// `dir`에 두 네트워크의 파라미터와 정규화 버퍼를 저장
pub fn export_weights(dir: impl AsRef<Path>, generator: &Generator, critic: &Critic) -> Result<()> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).with_context(|| format!("디렉토리 생성 실패: {}", dir.display()))?;
    candle_core::safetensors::save(&generator.named_tensors()?, dir.join(GENERATOR_WEIGHTS))?;
    candle_core::safetensors::save(&critic.named_tensors()?, dir.join(CRITIC_WEIGHTS))?;
    Ok(())
}

/// `export_weights`로 저장한 디렉토리에서 복원
///
/// 옵티마이저 상태와 스텝 카운터는 저장하지 않으므로 복원 후 처음부터 다시 쌓인다.
pub fn load_weights(dir: impl AsRef<Path>, generator: &Generator, critic: &Critic, device: &Device) -> Result<()> {
    let dir = dir.as_ref();
    let g_path = dir.join(GENERATOR_WEIGHTS);
    let d_path = dir.join(CRITIC_WEIGHTS);
    let g = candle_core::safetensors::load(&g_path, device)
        .with_context(|| format!("생성자 가중치 읽기 실패: {}", g_path.display()))?;
    let d = candle_core::safetensors::load(&d_path, device)
        .with_context(|| format!("판별자 가중치 읽기 실패: {}", d_path.display()))?;
    generator.load_named(&g)?;
    critic.load_named(&d)?;
    log::info!("가중치 복원 완료: {}", dir.display());
    Ok(())
}
