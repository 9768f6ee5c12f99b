use anyhow::{ensure, Result};
use std::path::PathBuf;

/// GAN 학습 전체 구성
#[derive(Debug, Clone)]
pub struct GanConfig {
    /// 배치 크기
    pub batch_size: usize,
    /// 노이즈 벡터 차원
    pub noise_dim: usize,
    /// 에포크 수
    pub epochs: usize,
    /// 평가 시 생성할 샘플 수
    pub sample_count: usize,
    /// 평가 주기 (에포크 단위)
    pub eval_interval: usize,
    /// 학습에 사용할 클래스 레이블
    pub target_label: u8,
    /// 초기화와 노이즈 샘플링에 쓰는 시드
    pub seed: u64,
    /// 손실이 NaN/Inf가 되면 즉시 중단
    pub abort_on_divergence: bool,
    /// 네트워크 구조
    pub architecture: ArchitectureConfig,
    /// 옵티마이저 및 클리핑
    pub optimizer: OptimizerConfig,
    /// 산출물 출력
    pub output: OutputConfig,
}

/// 생성자/판별자 구조 설정
#[derive(Debug, Clone)]
pub struct ArchitectureConfig {
    /// 이미지 한 변의 픽셀 수 (정사각형)
    pub image_size: usize,
    /// 이미지 채널 수
    pub image_channels: usize,
    /// 생성자 기준 특징 맵 채널 (가장 작은 해상도부터)
    pub feature_maps: Vec<usize>,
    /// Leaky ReLU 기울기
    pub leaky_alpha: f64,
    /// 드롭아웃 유지 확률
    pub keep_prob: f32,
    /// 배치 정규화 이동 평균 모멘텀
    pub bn_momentum: f64,
    /// 배치 정규화 엡실론
    pub bn_epsilon: f64,
}

/// RMSProp 및 가중치 클리핑 설정
#[derive(Debug, Clone)]
pub struct OptimizerConfig {
    /// 학습률
    pub learning_rate: f64,
    /// 제곱 평균 감쇠율
    pub decay: f64,
    /// 모멘텀
    pub momentum: f64,
    /// 엡실론 (수치 안정성을 위한 작은 값)
    pub epsilon: f64,
    /// 판별자 가중치 클리핑 경계
    pub clip_value: f32,
}

/// 산출물 출력 설정
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// 출력 디렉토리
    pub output_dir: PathBuf,
    /// 스칼라 로그 파일 이름
    pub metrics_file: String,
    /// 샘플 그리드 한 줄당 이미지 수
    pub grid_columns: usize,
    /// 평가 시점마다 가중치 내보내기
    pub export_weights: bool,
}

impl Default for GanConfig {
    fn default() -> Self {
        Self {
            batch_size: 1024,
            noise_dim: 100,
            epochs: 10000,
            sample_count: 80,
            eval_interval: 500,
            target_label: 4,
            seed: 42,
            abort_on_divergence: true,
            architecture: ArchitectureConfig::default(),
            optimizer: OptimizerConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for ArchitectureConfig {
    fn default() -> Self {
        Self {
            image_size: 32,
            image_channels: 3,
            feature_maps: vec![512, 256, 128],
            leaky_alpha: 0.01,
            keep_prob: 0.8,
            bn_momentum: 0.99,
            bn_epsilon: 1e-3,
        }
    }
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.001,
            decay: 0.9,
            momentum: 0.0,
            epsilon: 1e-10,
            clip_value: 0.01,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            metrics_file: "metrics.jsonl".to_string(),
            grid_columns: 20,
            export_weights: true,
        }
    }
}

impl GanConfig {
    /// 새 구성 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 테스트용 소형 구성: 8x8x3 이미지, 3층 생성자/판별자
    pub fn toy() -> Self {
        Self {
            batch_size: 4,
            noise_dim: 8,
            epochs: 2,
            sample_count: 10,
            eval_interval: 1,
            architecture: ArchitectureConfig {
                image_size: 8,
                feature_maps: vec![8, 4],
                ..ArchitectureConfig::default()
            },
            output: OutputConfig {
                grid_columns: 5,
                export_weights: false,
                ..OutputConfig::default()
            },
            ..Self::default()
        }
    }

    /// 배치 크기 설정
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// 노이즈 차원 설정
    pub fn with_noise_dim(mut self, noise_dim: usize) -> Self {
        self.noise_dim = noise_dim;
        self
    }

    /// 에포크 수 설정
    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    /// 시드 설정
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// 대상 레이블 설정
    pub fn with_target_label(mut self, label: u8) -> Self {
        self.target_label = label;
        self
    }

    /// 평가 주기 설정
    pub fn with_eval_interval(mut self, interval: usize) -> Self {
        self.eval_interval = interval;
        self
    }

    /// 학습률 설정
    pub fn with_learning_rate(mut self, lr: f64) -> Self {
        self.optimizer.learning_rate = lr;
        self
    }

    /// 출력 디렉토리 설정
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output.output_dir = dir.into();
        self
    }

    /// 생성자 입력 특징 맵의 한 변 크기
    pub fn base_resolution(&self) -> usize {
        self.architecture.base_resolution()
    }

    /// 구성 검증 (형상 불일치 등 구성 오류는 텐서 할당 전에 잡는다)
    pub fn validate(&self) -> Result<()> {
        ensure!(self.batch_size > 0, "batch_size는 0보다 커야 합니다");
        ensure!(self.noise_dim > 0, "noise_dim은 0보다 커야 합니다");
        ensure!(self.eval_interval > 0, "eval_interval은 0보다 커야 합니다");
        ensure!(self.sample_count > 0, "sample_count는 0보다 커야 합니다");
        ensure!(self.output.grid_columns > 0, "grid_columns는 0보다 커야 합니다");
        self.architecture.validate()?;
        self.optimizer.validate()?;
        Ok(())
    }
}

impl ArchitectureConfig {
    /// 업샘플링 단계 수
    pub fn stages(&self) -> usize {
        self.feature_maps.len()
    }

    /// 생성자 입력 특징 맵의 한 변 크기 (단계가 너무 많으면 0)
    pub fn base_resolution(&self) -> usize {
        u32::try_from(self.stages())
            .ok()
            .and_then(|s| self.image_size.checked_shr(s))
            .unwrap_or(0)
    }

    /// 샘플 하나의 원소 수 (H * W * C)
    pub fn sample_len(&self) -> usize {
        self.image_size * self.image_size * self.image_channels
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(!self.feature_maps.is_empty(), "feature_maps가 비어 있습니다");
        ensure!(
            self.feature_maps.iter().all(|&c| c > 0),
            "feature_maps에 0 채널이 있습니다: {:?}",
            self.feature_maps
        );
        ensure!(self.image_channels > 0, "image_channels는 0보다 커야 합니다");
        ensure!(
            self.stages() < usize::BITS as usize,
            "feature_maps 단계 {}개는 너무 많습니다 (최대 {})",
            self.stages(),
            usize::BITS - 1
        );
        let scale = 1usize << self.stages();
        ensure!(
            self.image_size >= scale && self.image_size % scale == 0,
            "image_size {}는 2^{} = {}의 배수여야 합니다",
            self.image_size,
            self.stages(),
            scale
        );
        ensure!(
            self.keep_prob > 0.0 && self.keep_prob <= 1.0,
            "keep_prob는 (0, 1] 범위여야 합니다: {}",
            self.keep_prob
        );
        ensure!(
            (0.0..1.0).contains(&self.bn_momentum),
            "bn_momentum은 [0, 1) 범위여야 합니다: {}",
            self.bn_momentum
        );
        ensure!(self.bn_epsilon > 0.0, "bn_epsilon은 0보다 커야 합니다");
        Ok(())
    }
}

impl OptimizerConfig {
    /// 클리핑 경계 설정
    pub fn with_clip_value(mut self, clip: f32) -> Self {
        self.clip_value = clip;
        self
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.learning_rate > 0.0, "learning_rate는 0보다 커야 합니다");
        ensure!(self.clip_value > 0.0, "clip_value는 0보다 커야 합니다");
        ensure!((0.0..1.0).contains(&self.decay), "decay는 [0, 1) 범위여야 합니다");
        ensure!(self.momentum >= 0.0, "momentum은 음수일 수 없습니다");
        Ok(())
    }
}
