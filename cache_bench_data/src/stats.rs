// Dataset statistics module
// 数据集统计模块

use serde::Serialize;

use crate::KvSource;

/// Dataset statistics / 数据集统计
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DatasetStats {
  /// Number of entries / 条目数
  pub item_count: usize,
  /// Total key bytes / 键总字节数
  pub key_bytes: u64,
  /// Total value bytes / 值总字节数
  pub val_bytes: u64,
  /// Average key size in bytes / 平均键大小（字节）
  pub avg_key_size: usize,
  /// Average value size in bytes / 平均值大小（字节）
  pub avg_val_size: usize,
  /// Min value size in bytes / 最小值大小（字节）
  pub min_val_size: usize,
  /// Max value size in bytes / 最大值大小（字节）
  pub max_val_size: usize,
}

impl DatasetStats {
  /// Walk every entry of a source / 遍历数据源的所有条目
  pub fn from_source<S: KvSource + ?Sized>(src: &S) -> Self {
    let n = src.len();
    if n == 0 {
      return Self::default();
    }

    let mut key_bytes = 0u64;
    let mut val_bytes = 0u64;
    let mut min = usize::MAX;
    let mut max = 0;
    for i in 0..n {
      key_bytes += src.key(i).len() as u64;
      let len = src.val(i).len();
      val_bytes += len as u64;
      min = min.min(len);
      max = max.max(len);
    }

    Self {
      item_count: n,
      key_bytes,
      val_bytes,
      avg_key_size: (key_bytes / n as u64) as usize,
      avg_val_size: (val_bytes / n as u64) as usize,
      min_val_size: min,
      max_val_size: max,
    }
  }

  /// Key plus value bytes / 键与值的总字节数
  pub fn total_bytes(&self) -> u64 {
    self.key_bytes + self.val_bytes
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{Dataset, ValueMode, ValueProfile};

  #[test]
  fn test_stats_from_dataset() {
    let p = ValueProfile::bytes(10).unwrap();
    let d = Dataset::new(12, &p, ValueMode::Unique);
    let stats = d.stats();
    assert_eq!(stats.item_count, 12);
    // key_0..key_9 are 5 bytes, key_10 / key_11 are 6
    assert_eq!(stats.key_bytes, 10 * 5 + 2 * 6);
    assert_eq!(stats.avg_key_size, 5);
    // "xxxxxxxxxx::entry-" is 18 bytes plus the index digits
    assert_eq!(stats.min_val_size, 19);
    assert_eq!(stats.max_val_size, 20);
    assert!(stats.avg_val_size <= p.estimated_size());
  }

  #[test]
  fn test_stats_empty() {
    let p = ValueProfile::bytes(1).unwrap();
    let stats = Dataset::new(0, &p, ValueMode::Unique).stats();
    assert_eq!(stats, DatasetStats::default());
    assert_eq!(stats.total_bytes(), 0);
  }
}
