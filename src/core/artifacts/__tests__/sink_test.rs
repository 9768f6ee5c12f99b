use crate::core::artifacts::{ArtifactSink, FileSink, ImageGrid, MemorySink, NullSink};
use candle_core::{DType, Device, Tensor};

fn grid() -> ImageGrid {
    let samples = Tensor::zeros((4, 3, 4, 4), DType::F32, &Device::Cpu).unwrap();
    ImageGrid::from_samples(&samples, 2).unwrap()
}

#[test]
fn 메모리_저장소_시계열_테스트() {
    let mut sink = MemorySink::new();
    sink.record_scalar("D_loss", 1, 1.0).unwrap();
    sink.record_scalar("G_loss", 1, 2.0).unwrap();
    sink.record_scalar("D_loss", 2, 0.5).unwrap();
    sink.write_grid(0, &grid()).unwrap();

    assert_eq!(sink.series("D_loss"), vec![(1, 1.0), (2, 0.5)]);
    assert_eq!(sink.series("G_loss"), vec![(1, 2.0)]);
    assert_eq!(sink.grids.len(), 1);
    assert_eq!(sink.grids[0].0, 0);
}

#[test]
fn 빈_저장소_테스트() {
    let mut sink = NullSink;
    sink.record_scalar("D_loss", 1, 1.0).unwrap();
    assert!(sink.write_grid(0, &grid()).unwrap().is_none());
    sink.flush().unwrap();
}

#[test]
fn 파일_저장소_경로_테스트() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("run");
    let mut sink = FileSink::create(&root, "metrics.jsonl").unwrap();

    assert_eq!(sink.grid_path(500), root.join("samples-ep500.ppm"));
    assert_eq!(sink.weights_dir(3), root.join("weights").join("ep3"));

    let written = sink.write_grid(500, &grid()).unwrap().unwrap();
    assert_eq!(written, root.join("samples-ep500.ppm"));
    assert!(written.exists());

    sink.record_scalar("D_loss", 1, 0.7).unwrap();
    sink.flush().unwrap();
    let text = std::fs::read_to_string(root.join("metrics.jsonl")).unwrap();
    assert_eq!(text.lines().count(), 1);
}

#[test]
fn 평가_기록_jsonl_테스트() {
    use crate::core::artifacts::EVALUATIONS_FILE;
    use crate::core::loss::GanLosses;
    use crate::core::training::EvaluationRecord;

    let dir = tempfile::tempdir().unwrap();
    let mut sink = FileSink::create(dir.path(), "metrics.jsonl").unwrap();
    let record = EvaluationRecord {
        epoch: 500,
        step: 2000,
        losses: GanLosses {
            critic: 1.5,
            generator: 0.25,
        },
    };
    sink.record_evaluation(&record).unwrap();

    let text = std::fs::read_to_string(dir.path().join(EVALUATIONS_FILE)).unwrap();
    let line: serde_json::Value = serde_json::from_str(text.lines().next().unwrap()).unwrap();
    assert_eq!(line["epoch"], 500);
    assert_eq!(line["step"], 2000);
    assert_eq!(line["losses"]["critic"], 1.5);
    assert_eq!(line["losses"]["generator"], 0.25);
    assert!(line["timestamp"].is_string());
}
