//! 메모리 상주 데이터셋과 단일 클래스 슬라이스

use anyhow::{ensure, Result};
use candle_core::{Device, Tensor};
use ndarray::parallel::prelude::*;
use ndarray::{s, Array2, Axis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// (이미지, 레이블) 모음. 이미지 한 장은 HWC 순서로 펼친 한 행.
#[derive(Debug, Clone)]
pub struct Dataset {
    images: Array2<f32>,
    labels: Vec<u8>,
    image_size: usize,
    channels: usize,
}

impl Dataset {
    pub fn from_rows(images: Array2<f32>, labels: Vec<u8>, image_size: usize, channels: usize) -> Result<Self> {
        ensure!(
            images.nrows() == labels.len(),
            "이미지 {}개와 레이블 {}개가 맞지 않습니다",
            images.nrows(),
            labels.len()
        );
        ensure!(
            images.ncols() == image_size * image_size * channels,
            "행 길이 {}가 {}x{}x{}와 다릅니다",
            images.ncols(),
            image_size,
            image_size,
            channels
        );
        Ok(Self {
            images,
            labels,
            image_size,
            channels,
        })
    }

    /// 0..=255 범위 무작위 픽셀과 순환 레이블로 만든 데이터셋
    pub fn synthetic(count: usize, image_size: usize, channels: usize, classes: u8, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let width = image_size * image_size * channels;
        let images = Array2::from_shape_fn((count, width), |_| rng.gen_range(0u8..=255) as f32);
        let classes = classes.max(1);
        let labels = (0..count).map(|i| (i % classes as usize) as u8).collect();
        Self {
            images,
            labels,
            image_size,
            channels,
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[u8] {
        &self.labels
    }

    pub fn images(&self) -> &Array2<f32> {
        &self.images
    }

    pub fn image_size(&self) -> usize {
        self.image_size
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// 특징(열)별 min-max 스케일링으로 [0, 1]에 맞춘다
    ///
    /// 전체 데이터에 대해 열마다 최소/최대를 구하며, 값이 모두 같은 열은 0이 된다.
    pub fn min_max_scale(&mut self) {
        self.images
            .axis_iter_mut(Axis(1))
            .into_par_iter()
            .for_each(|mut column| {
                let (min, max) = column
                    .iter()
                    .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
                let range = max - min;
                let scale = if range > 0.0 { range } else { 1.0 };
                column.mapv_inplace(|v| (v - min) / scale);
            });
    }

    /// 한 레이블만 골라낸 슬라이스
    pub fn select_label(&self, label: u8) -> Result<ClassSlice> {
        let rows: Vec<usize> = self
            .labels
            .iter()
            .enumerate()
            .filter(|(_, l)| **l == label)
            .map(|(i, _)| i)
            .collect();
        ensure!(!rows.is_empty(), "레이블 {}에 해당하는 이미지가 없습니다", label);

        let images = self.images.select(Axis(0), &rows);
        Ok(ClassSlice {
            images,
            label,
            image_size: self.image_size,
            channels: self.channels,
        })
    }
}

/// 단일 클래스 이미지 모음 (불변)
#[derive(Debug, Clone)]
pub struct ClassSlice {
    images: Array2<f32>,
    label: u8,
    image_size: usize,
    channels: usize,
}

impl ClassSlice {
    pub fn len(&self) -> usize {
        self.images.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.images.nrows() == 0
    }

    pub fn label(&self) -> u8 {
        self.label
    }

    pub fn image_size(&self) -> usize {
        self.image_size
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// 에포크당 배치 수: floor(n / batch_size) - 1 (0 미만이면 0)
    ///
    /// 꼬리 부분 배치와 함께 마지막 완전 배치 하나도 버려진다.
    pub fn batches_per_epoch(&self, batch_size: usize) -> usize {
        if batch_size == 0 {
            return 0;
        }
        (self.len() / batch_size).saturating_sub(1)
    }

    /// `index`번째 배치를 NCHW 텐서로, 값은 [-1, 1]로 재조정
    pub fn batch(&self, index: usize, batch_size: usize, device: &Device) -> Result<Tensor> {
        let start = index * batch_size;
        let end = start + batch_size;
        ensure!(
            batch_size > 0 && end <= self.len(),
            "배치 범위 {}..{}가 슬라이스 크기 {}를 벗어납니다",
            start,
            end,
            self.len()
        );

        let rows: Vec<f32> = self.images.slice(s![start..end, ..]).iter().copied().collect();
        let side = self.image_size;
        let batch = Tensor::from_vec(rows, (batch_size, side, side, self.channels), device)?
            .permute((0, 3, 1, 2))?
            .contiguous()?
            .affine(2.0, -1.0)?;
        Ok(batch)
    }
}
