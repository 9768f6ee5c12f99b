//! 샘플 이미지 그리드 (binary PPM)

use anyhow::{bail, ensure, Result};
use candle_core::{DType, Tensor};
use std::fs;
use std::path::Path;

/// 타일 사이 간격 (픽셀)
const GUTTER: usize = 2;

/// RGB 8비트 이미지 그리드
#[derive(Debug, Clone, PartialEq)]
pub struct ImageGrid {
    width: usize,
    height: usize,
    tiles: usize,
    pixels: Vec<u8>,
}

impl ImageGrid {
    /// (N, C, H, W), [-1, 1] 범위 샘플을 `columns`개씩 줄지어 배치
    pub fn from_samples(samples: &Tensor, columns: usize) -> Result<Self> {
        let (n, c, h, w) = samples.dims4()?;
        ensure!(n > 0 && columns > 0, "빈 그리드는 만들 수 없습니다");
        if c != 1 && c != 3 {
            bail!("채널 {}개 이미지는 그리드로 그릴 수 없습니다 (1 또는 3)", c);
        }

        // [-1, 1] → [0, 1] → [0, 255]
        let unit = samples
            .to_dtype(DType::F32)?
            .affine(0.5, 0.5)?
            .clamp(0f32, 1f32)?
            .permute((0, 2, 3, 1))?
            .contiguous()?
            .flatten_all()?
            .to_vec1::<f32>()?;

        let cols = columns.min(n);
        let rows = n.div_ceil(cols);
        let width = cols * w + (cols - 1) * GUTTER;
        let height = rows * h + (rows - 1) * GUTTER;
        let mut pixels = vec![0u8; width * height * 3];

        for (i, tile) in unit.chunks_exact(h * w * c).enumerate() {
            let x0 = (i % cols) * (w + GUTTER);
            let y0 = (i / cols) * (h + GUTTER);
            for y in 0..h {
                for x in 0..w {
                    let src = (y * w + x) * c;
                    let dst = ((y0 + y) * width + x0 + x) * 3;
                    for k in 0..3 {
                        let v = if c == 1 { tile[src] } else { tile[src + k] };
                        pixels[dst + k] = (v * 255.0).round() as u8;
                    }
                }
            }
        }

        Ok(Self {
            width,
            height,
            tiles: n,
            pixels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tiles(&self) -> usize {
        self.tiles
    }

    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let i = (y * self.width + x) * 3;
        [self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]]
    }

    /// P6 형식 바이트열
    pub fn to_ppm(&self) -> Vec<u8> {
        let mut out = format!("P6\n{} {}\n255\n", self.width, self.height).into_bytes();
        out.extend_from_slice(&self.pixels);
        out
    }

    pub fn save_ppm(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.to_ppm())?;
        Ok(())
    }
}
