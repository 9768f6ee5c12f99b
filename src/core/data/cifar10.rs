//! CIFAR-10 바이너리 형식 로더
//!
//! 레코드 하나는 3073바이트: 레이블 1바이트 + R/G/B 평면 각 1024바이트(32x32, 행 우선).

use super::Dataset;
use anyhow::{ensure, Context, Result};
use ndarray::Array2;
use rayon::prelude::*;
use std::fs;
use std::path::Path;

/// 학습 5개 + 테스트 1개. 전부 합쳐서 쓴다.
pub const CIFAR10_FILES: [&str; 6] = [
    "data_batch_1.bin",
    "data_batch_2.bin",
    "data_batch_3.bin",
    "data_batch_4.bin",
    "data_batch_5.bin",
    "test_batch.bin",
];

const SIDE: usize = 32;
const CHANNELS: usize = 3;
const PLANE: usize = SIDE * SIDE;
const RECORD_LEN: usize = 1 + PLANE * CHANNELS;

/// 디렉토리의 6개 배치 파일을 읽어 HWC 순서의 데이터셋으로
///
/// 파일별 해석은 병렬로 하되 합치는 순서는 `CIFAR10_FILES` 순서를 따른다.
pub fn load_cifar10(dir: impl AsRef<Path>) -> Result<Dataset> {
    let dir = dir.as_ref();
    let decoded = CIFAR10_FILES
        .par_iter()
        .map(|name| -> Result<(Vec<f32>, Vec<u8>)> {
            let path = dir.join(name);
            let bytes = fs::read(&path).with_context(|| format!("CIFAR-10 파일 읽기 실패: {}", path.display()))?;
            let mut pixels = Vec::new();
            let mut labels = Vec::new();
            let count = decode_records(&bytes, &mut pixels, &mut labels)
                .with_context(|| format!("CIFAR-10 레코드 해석 실패: {}", path.display()))?;
            log::debug!("{}: {}개 레코드", path.display(), count);
            Ok((pixels, labels))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut pixels = Vec::new();
    let mut labels = Vec::new();
    for (p, l) in decoded {
        pixels.extend(p);
        labels.extend(l);
    }

    let rows = labels.len();
    let images = Array2::from_shape_vec((rows, PLANE * CHANNELS), pixels)?;
    log::info!("CIFAR-10 로드 완료: {}개 이미지 ({})", rows, dir.display());
    Dataset::from_rows(images, labels, SIDE, CHANNELS)
}

/// 바이트 버퍼의 레코드를 HWC f32 픽셀과 레이블로 풀어 붙인다. 반환값은 레코드 수.
pub fn decode_records(bytes: &[u8], pixels: &mut Vec<f32>, labels: &mut Vec<u8>) -> Result<usize> {
    ensure!(
        bytes.len() % RECORD_LEN == 0,
        "파일 길이 {}가 레코드 크기 {}의 배수가 아닙니다",
        bytes.len(),
        RECORD_LEN
    );

    let count = bytes.len() / RECORD_LEN;
    pixels.reserve(count * PLANE * CHANNELS);
    labels.reserve(count);

    for record in bytes.chunks_exact(RECORD_LEN) {
        labels.push(record[0]);
        let planes = &record[1..];
        for p in 0..PLANE {
            for c in 0..CHANNELS {
                pixels.push(planes[c * PLANE + p] as f32);
            }
        }
    }
    Ok(count)
}
