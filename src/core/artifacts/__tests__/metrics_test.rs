use crate::core::artifacts::MetricsWriter;
use std::fs;

#[test]
fn jsonl_기록_테스트() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("metrics.jsonl");

    {
        let mut writer = MetricsWriter::new(&path, 100).unwrap();
        writer.write_scalar("D_loss", 1, 1.25).unwrap();
        writer.write_scalar("G_loss", 1, 0.5).unwrap();
    } // drop 시 플러시

    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<serde_json::Value> = text
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["name"], "D_loss");
    assert_eq!(lines[0]["step"], 1);
    assert_eq!(lines[0]["value"], 1.25);
    assert_eq!(lines[1]["name"], "G_loss");
    assert!(lines[1]["timestamp"].is_string());
}

#[test]
fn 이어쓰기_테스트() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("metrics.jsonl");

    for step in 0..2 {
        let mut writer = MetricsWriter::new(&path, 0).unwrap();
        writer.write_scalar("D_loss", step, 0.0).unwrap();
    }
    assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 2);
}
