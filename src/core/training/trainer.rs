//! 에포크 단위 학습 루프

use super::{TrainerPhase, TrainingSession};
use crate::core::artifacts::{ArtifactSink, ImageGrid};
use crate::core::data::ClassSlice;
use crate::core::loss::GanLosses;
use anyhow::{ensure, Context, Result};
use candle_core::Tensor;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::{Duration, Instant};

/// 주기 평가 한 번의 기록
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct EvaluationRecord {
    pub epoch: usize,
    pub step: u64,
    pub losses: GanLosses,
}

/// 학습 종료 요약
#[derive(Debug, Clone)]
pub struct TrainingSummary {
    pub epochs: usize,
    pub steps: u64,
    pub batches_per_epoch: usize,
    pub evaluations: Vec<EvaluationRecord>,
    pub final_losses: Option<GanLosses>,
    pub elapsed: Duration,
}

/// 학습 루프
///
/// 에포크마다 완전한 배치만 돈다. `eval_interval` 에포크마다(0 포함) 그 에포크의
/// 마지막 배치로 손실을 출력하고 샘플 그리드를 남긴다.
pub struct Trainer<S: ArtifactSink> {
    session: TrainingSession,
    data: ClassSlice,
    sink: S,
    show_progress: bool,
}

impl<S: ArtifactSink> Trainer<S> {
    pub fn new(session: TrainingSession, data: ClassSlice, sink: S) -> Result<Self> {
        let config = session.config();
        let arch = &config.architecture;
        ensure!(
            data.image_size() == arch.image_size && data.channels() == arch.image_channels,
            "데이터 형상 {}x{}x{}가 구성 {}x{}x{}와 다릅니다",
            data.image_size(),
            data.image_size(),
            data.channels(),
            arch.image_size,
            arch.image_size,
            arch.image_channels
        );
        let batches = data.batches_per_epoch(config.batch_size);
        ensure!(
            batches > 0,
            "이미지 {}개, 배치 크기 {}로는 에포크당 배치가 0개입니다 (평가에 마지막 배치가 필요)",
            data.len(),
            config.batch_size
        );

        Ok(Self {
            session,
            data,
            sink,
            show_progress: false,
        })
    }

    /// 진행 막대 표시 여부
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn session(&self) -> &TrainingSession {
        &self.session
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_parts(self) -> (TrainingSession, S) {
        (self.session, self.sink)
    }

    pub fn run(&mut self) -> Result<TrainingSummary> {
        let started = Instant::now();
        let epochs = self.session.config().epochs;
        let batch_size = self.session.config().batch_size;
        let eval_interval = self.session.config().eval_interval;
        let batches = self.data.batches_per_epoch(batch_size);

        println!(
            "🚀 학습 시작: 레이블 {} 이미지 {}개, 배치 {} x {}개/에포크, {} 에포크",
            self.data.label(),
            self.data.len(),
            batch_size,
            batches,
            epochs
        );

        let bar = self.progress_bar(epochs)?;
        let mut evaluations = Vec::new();

        for epoch in 0..epochs {
            self.session.state_mut().epoch = epoch;
            self.session.state_mut().transition(TrainerPhase::EpochRunning)?;

            let mut last_batch: Option<(Tensor, Tensor)> = None;
            for index in 0..batches {
                self.session.state_mut().transition(TrainerPhase::BatchStepping)?;
                let real = self.data.batch(index, batch_size, self.session.device())?;
                let noise = self.session.sample_noise(batch_size)?;
                let report = self.session.train_step_with_noise(&real, &noise)?;

                fire_and_forget(
                    "D_loss 기록",
                    self.sink.record_scalar("D_loss", report.step, report.losses.critic),
                );
                fire_and_forget(
                    "G_loss 기록",
                    self.sink.record_scalar("G_loss", report.step, report.losses.generator),
                );
                last_batch = Some((real, noise));
            }

            if epoch % eval_interval == 0 {
                self.session.state_mut().transition(TrainerPhase::Evaluating)?;
                let (real, noise) = last_batch
                    .as_ref()
                    .context("평가할 마지막 배치가 없습니다")?;
                let record = self.evaluate(epoch, epochs, real, noise, &bar)?;
                evaluations.push(record);
            }

            bar.inc(1);
        }

        self.session.state_mut().transition(TrainerPhase::Done)?;
        fire_and_forget("로그 플러시", self.sink.flush());
        bar.finish_and_clear();

        let summary = TrainingSummary {
            epochs,
            steps: self.session.state().step,
            batches_per_epoch: batches,
            evaluations,
            final_losses: self.session.state().last_losses,
            elapsed: started.elapsed(),
        };
        println!(
            "✅ 학습 완료: {} 스텝, {:.1}초",
            summary.steps,
            summary.elapsed.as_secs_f32()
        );
        Ok(summary)
    }

    fn evaluate(
        &mut self,
        epoch: usize,
        epochs: usize,
        real: &Tensor,
        noise: &Tensor,
        bar: &ProgressBar,
    ) -> Result<EvaluationRecord> {
        let losses = self.session.evaluate(real, noise)?;
        emit(
            bar,
            format!(
                "Epoch {}/{}.... Discriminator Loss: {:.4}.... Generator Loss: {:.4}....",
                epoch, epochs, losses.critic, losses.generator
            ),
        );

        let count = self.session.config().sample_count;
        let columns = self.session.config().output.grid_columns;
        let samples = self.session.generate_samples(count)?;
        let grid = ImageGrid::from_samples(&samples, columns)?;
        if let Some(Some(path)) = fire_and_forget("샘플 그리드 저장", self.sink.write_grid(epoch, &grid)) {
            emit(bar, format!("🖼️  샘플 {}장 저장: {}", grid.tiles(), path.display()));
        }

        if self.session.config().output.export_weights {
            let exported = self
                .sink
                .export_weights(epoch, self.session.generator(), self.session.critic());
            if let Some(Some(dir)) = fire_and_forget("가중치 내보내기", exported) {
                log::info!("가중치 저장: {}", dir.display());
            }
        }

        let record = EvaluationRecord {
            epoch,
            step: self.session.state().step,
            losses,
        };
        fire_and_forget("평가 기록", self.sink.record_evaluation(&record));
        Ok(record)
    }

    fn progress_bar(&self, epochs: usize) -> Result<ProgressBar> {
        if !self.show_progress {
            return Ok(ProgressBar::hidden());
        }
        let bar = ProgressBar::new(epochs as u64);
        bar.set_style(
            ProgressStyle::with_template("{spinner} [{elapsed_precise}] {bar:40} {pos}/{len} epochs")?,
        );
        Ok(bar)
    }
}

/// 숨김 막대는 println을 버리므로 그때는 표준 출력으로
fn emit(bar: &ProgressBar, line: String) {
    if bar.is_hidden() {
        println!("{}", line);
    } else {
        bar.println(line);
    }
}

/// 산출물 쓰기 실패는 경고만 남기고 학습을 계속한다
fn fire_and_forget<T>(what: &str, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("{} 실패: {:#}", what, e);
            None
        }
    }
}
