//! 스칼라 손실 시계열 로그 (JSON Lines)

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

/// 로그 한 줄
#[derive(Debug, Clone, Serialize)]
pub struct ScalarRecord<'a> {
    pub name: &'a str,
    pub step: u64,
    pub value: f32,
    pub timestamp: DateTime<Utc>,
}

/// 버퍼링 JSONL 기록기
///
/// 레코드 하나를 한 줄 JSON으로 쓰고 `flush_interval`개마다 디스크로 내린다.
pub struct MetricsWriter {
    writer: BufWriter<File>,
    records_since_flush: usize,
    flush_interval: usize,
}

impl MetricsWriter {
    /// 파일이 있으면 이어 쓴다. `flush_interval`이 0이면 매 레코드 플러시.
    pub fn new<P: AsRef<Path>>(path: P, flush_interval: usize) -> std::io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
            records_since_flush: 0,
            flush_interval: flush_interval.max(1),
        })
    }

    pub fn write_scalar(&mut self, name: &str, step: u64, value: f32) -> std::io::Result<()> {
        self.write_record(&ScalarRecord {
            name,
            step,
            value,
            timestamp: Utc::now(),
        })
    }

    /// 직렬화 가능한 레코드 한 줄
    pub fn write_record<T: Serialize>(&mut self, record: &T) -> std::io::Result<()> {
        let json = serde_json::to_string(record)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        writeln!(self.writer, "{}", json)?;

        self.records_since_flush += 1;
        if self.records_since_flush >= self.flush_interval {
            self.flush()?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        self.writer.flush()?;
        self.records_since_flush = 0;
        Ok(())
    }
}

impl Drop for MetricsWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}
