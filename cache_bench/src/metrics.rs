// Benchmark metrics types
// 基准测试指标类型

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{PassStats, SweepPoint, Workload};

/// Throughput of one timed pass / 单次计时遍历的吞吐量
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BenchMetrics {
  pub engine: String,
  pub workload: Workload,
  pub data_size: usize,
  pub profile: String,
  /// Total operations count / 总操作数
  pub ops_count: u64,
  /// Gets that observed a value / 读到值的次数
  pub hits: u64,
  /// Total duration in nanoseconds / 总耗时（纳秒）
  pub duration_ns: u64,
  /// Throughput (ops/sec) / 吞吐量
  pub throughput: f64,
}

impl BenchMetrics {
  /// Create new metrics from raw data
  /// 从原始数据创建指标
  pub fn new(
    engine: &str,
    workload: Workload,
    point: &SweepPoint,
    stats: &PassStats,
    duration: Duration,
  ) -> Self {
    let ops_count = stats.ops();
    let duration_ns = duration.as_nanos() as u64;
    let throughput = if duration_ns > 0 {
      ops_count as f64 / duration.as_secs_f64()
    } else {
      0.0
    };

    Self {
      engine: engine.to_owned(),
      workload,
      data_size: point.data_size,
      profile: point.profile.to_string(),
      ops_count,
      hits: stats.hits,
      duration_ns,
      throughput,
    }
  }

  /// Get duration as Duration type
  /// 获取 Duration 类型的耗时
  pub fn duration(&self) -> Duration {
    Duration::from_nanos(self.duration_ns)
  }
}
