use anyhow::Result;
use candle_core::Device;
use cifar_wgan::{load_cifar10, FileSink, GanConfig, Trainer, TrainingSession};
use clap::Parser;
use std::path::PathBuf;

/// CIFAR-10 한 클래스로 WGAN 학습
///
/// 인자 없이 실행하면 기본 하이퍼파라미터 그대로 학습한다.
#[derive(Parser, Debug)]
#[command(name = "cifar_wgan", version, about)]
struct Args {
    /// CIFAR-10 바이너리 배치 파일 디렉토리
    #[arg(long, default_value = "data/cifar-10-batches-bin")]
    data_dir: PathBuf,

    /// 산출물 디렉토리 (로그, 샘플 그리드, 가중치)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// 에포크 수
    #[arg(long)]
    epochs: Option<usize>,

    /// 난수 시드
    #[arg(long)]
    seed: Option<u64>,

    /// 학습할 클래스 레이블 (0-9)
    #[arg(long)]
    label: Option<u8>,

    /// 이전에 내보낸 가중치 디렉토리에서 시작
    #[arg(long)]
    init_from: Option<PathBuf>,

    /// 진행 막대 숨기기
    #[arg(long)]
    no_progress: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = GanConfig::default();
    if let Some(dir) = args.output_dir {
        config = config.with_output_dir(dir);
    }
    if let Some(epochs) = args.epochs {
        config = config.with_epochs(epochs);
    }
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    if let Some(label) = args.label {
        config = config.with_target_label(label);
    }
    config.validate()?;

    println!("📂 데이터 로드: {}", args.data_dir.display());
    let mut dataset = load_cifar10(&args.data_dir)?;
    dataset.min_max_scale();
    let images = dataset.select_label(config.target_label)?;

    let device = Device::Cpu;
    let mut session = TrainingSession::new(config.clone(), &device)?;
    if let Some(dir) = &args.init_from {
        session.load_weights(dir)?;
    }

    let sink = FileSink::create(&config.output.output_dir, &config.output.metrics_file)?;
    let mut trainer = Trainer::new(session, images, sink)?.with_progress(!args.no_progress);
    let summary = trainer.run()?;

    if let Some(losses) = summary.final_losses {
        println!(
            "📊 최종 손실: Discriminator {:.4}, Generator {:.4}",
            losses.critic, losses.generator
        );
    }
    Ok(())
}
