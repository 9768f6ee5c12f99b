//! 산출물 저장소

use super::{export_weights, ImageGrid, MetricsWriter};
use crate::core::networks::{Critic, Generator};
use crate::core::training::EvaluationRecord;
use chrono::{DateTime, Utc};
use serde::Serialize;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// 학습 루프가 산출물을 넘기는 곳
///
/// 호출은 동기식이지만 학습 쪽은 결과를 기다리지 않는다. 실패는 경고로만 남는다.
pub trait ArtifactSink {
    /// 이름/스텝으로 키가 붙은 스칼라 기록
    fn record_scalar(&mut self, name: &str, step: u64, value: f32) -> Result<()>;

    /// 에포크 번호로 이름 붙은 샘플 그리드 기록
    fn write_grid(&mut self, epoch: usize, grid: &ImageGrid) -> Result<Option<PathBuf>>;

    /// 현재 가중치 내보내기
    fn export_weights(&mut self, epoch: usize, generator: &Generator, critic: &Critic) -> Result<Option<PathBuf>>;

    /// 주기 평가 손실 기록
    fn record_evaluation(&mut self, _record: &EvaluationRecord) -> Result<()> {
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// 아무것도 기록하지 않음
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl ArtifactSink for NullSink {
    fn record_scalar(&mut self, _name: &str, _step: u64, _value: f32) -> Result<()> {
        Ok(())
    }

    fn write_grid(&mut self, _epoch: usize, _grid: &ImageGrid) -> Result<Option<PathBuf>> {
        Ok(None)
    }

    fn export_weights(&mut self, _epoch: usize, _g: &Generator, _d: &Critic) -> Result<Option<PathBuf>> {
        Ok(None)
    }
}

/// 메모리에 쌓아 두는 저장소 (검사용)
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    pub scalars: Vec<(String, u64, f32)>,
    pub grids: Vec<(usize, ImageGrid)>,
    pub exported_epochs: Vec<usize>,
    pub evaluations: Vec<EvaluationRecord>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// 이름별 값 시계열
    pub fn series(&self, name: &str) -> Vec<(u64, f32)> {
        self.scalars
            .iter()
            .filter(|(n, _, _)| n == name)
            .map(|(_, step, value)| (*step, *value))
            .collect()
    }
}

impl ArtifactSink for MemorySink {
    fn record_scalar(&mut self, name: &str, step: u64, value: f32) -> Result<()> {
        self.scalars.push((name.to_string(), step, value));
        Ok(())
    }

    fn write_grid(&mut self, epoch: usize, grid: &ImageGrid) -> Result<Option<PathBuf>> {
        self.grids.push((epoch, grid.clone()));
        Ok(None)
    }

    fn export_weights(&mut self, epoch: usize, _g: &Generator, _d: &Critic) -> Result<Option<PathBuf>> {
        self.exported_epochs.push(epoch);
        Ok(None)
    }

    fn record_evaluation(&mut self, record: &EvaluationRecord) -> Result<()> {
        self.evaluations.push(*record);
        Ok(())
    }
}

/// 평가 로그 한 줄
#[derive(Serialize)]
struct EvaluationLine<'a> {
    #[serde(flatten)]
    record: &'a EvaluationRecord,
    timestamp: DateTime<Utc>,
}

pub const EVALUATIONS_FILE: &str = "evaluations.jsonl";

/// 출력 디렉토리에 파일로 기록
///
/// ```text
/// <root>/metrics.jsonl
/// <root>/evaluations.jsonl
/// <root>/samples-ep{epoch}.ppm
/// <root>/weights/ep{epoch}/{generator,critic}.safetensors
/// ```
pub struct FileSink {
    root: PathBuf,
    metrics: MetricsWriter,
    evaluations: MetricsWriter,
}

impl FileSink {
    pub fn create(root: impl AsRef<Path>, metrics_file: &str) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).with_context(|| format!("출력 디렉토리 생성 실패: {}", root.display()))?;
        let metrics_path = root.join(metrics_file);
        let metrics = MetricsWriter::new(&metrics_path, 64)
            .with_context(|| format!("로그 파일 열기 실패: {}", metrics_path.display()))?;
        let evaluations_path = root.join(EVALUATIONS_FILE);
        let evaluations = MetricsWriter::new(&evaluations_path, 1)
            .with_context(|| format!("평가 로그 파일 열기 실패: {}", evaluations_path.display()))?;
        Ok(Self {
            root,
            metrics,
            evaluations,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn grid_path(&self, epoch: usize) -> PathBuf {
        self.root.join(format!("samples-ep{epoch}.ppm"))
    }

    pub fn weights_dir(&self, epoch: usize) -> PathBuf {
        self.root.join("weights").join(format!("ep{epoch}"))
    }
}

impl ArtifactSink for FileSink {
    fn record_scalar(&mut self, name: &str, step: u64, value: f32) -> Result<()> {
        self.metrics.write_scalar(name, step, value)?;
        Ok(())
    }

    fn write_grid(&mut self, epoch: usize, grid: &ImageGrid) -> Result<Option<PathBuf>> {
        let path = self.grid_path(epoch);
        grid.save_ppm(&path)
            .with_context(|| format!("샘플 그리드 저장 실패: {}", path.display()))?;
        Ok(Some(path))
    }

    fn export_weights(&mut self, epoch: usize, generator: &Generator, critic: &Critic) -> Result<Option<PathBuf>> {
        let dir = self.weights_dir(epoch);
        export_weights(&dir, generator, critic)?;
        Ok(Some(dir))
    }

    fn record_evaluation(&mut self, record: &EvaluationRecord) -> Result<()> {
        self.evaluations.write_record(&EvaluationLine {
            record,
            timestamp: Utc::now(),
        })?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.metrics.flush()?;
        self.evaluations.flush()?;
        Ok(())
    }
}
