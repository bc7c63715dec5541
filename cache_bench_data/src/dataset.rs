// Key/value source for one trial
// 单次试验的键值数据源

use serde::{Deserialize, Serialize};

use crate::{DatasetStats, FILLER, ValueGenerator, ValueProfile};

/// Filler length of the fixed in-memory comparison payload
/// 固定内存对比负载的填充长度
pub const PREFIXED_PAD: usize = 100;

/// How values are derived from the profile / 值如何由配置派生
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum ValueMode {
  /// One distinct value per entry (`value_for_index`) / 每条目一个唯一值
  #[default]
  Unique,
  /// Values reused from a bounded sample pool / 复用有界样本池中的值
  Cyclic { max_unique: usize },
  /// `value_<i>_` followed by `pad` filler bytes, ignores the profile payload
  /// `value_<i>_` 后接 `pad` 个填充字节，不使用配置负载
  Prefixed { pad: usize },
}

impl ValueMode {
  /// Fixed ~100 byte values of the in-memory comparison / 内存对比使用的约 100 字节固定值
  pub const fn prefixed() -> Self {
    Self::Prefixed { pad: PREFIXED_PAD }
  }
}

/// Positional key/value source over `[0, len)`
/// 按位置索引 `[0, len)` 的键值源
///
/// `key` and `val` panic when `idx >= len()`.
/// 当 `idx >= len()` 时 `key` 和 `val` 会 panic。
pub trait KvSource {
  fn len(&self) -> usize;

  fn is_empty(&self) -> bool {
    self.len() == 0
  }

  fn key(&self, idx: usize) -> &[u8];

  fn val(&self, idx: usize) -> &[u8];
}

enum Vals {
  Unique(Box<[Box<str>]>),
  Cyclic(ValueGenerator),
}

/// Keys `key_<i>` with values from a profile, read-only once built
/// 键为 `key_<i>`，值来自配置，构建后只读
pub struct Dataset {
  keys: Box<[Box<str>]>,
  vals: Vals,
  profile: ValueProfile,
  mode: ValueMode,
}

/// Value for entry `idx` in `Prefixed` mode / `Prefixed` 模式下条目 `idx` 的值
pub fn prefixed_val(idx: usize, pad: usize) -> String {
  let mut val = format!("value_{idx}_");
  val.extend(std::iter::repeat_n(FILLER, pad));
  val
}

/// Key for entry `idx` / 条目 `idx` 的键
#[inline]
pub fn key_of(idx: usize) -> String {
  format!("key_{idx}")
}

impl Dataset {
  pub fn new(size: usize, profile: &ValueProfile, mode: ValueMode) -> Self {
    let keys = (0..size).map(|i| key_of(i).into_boxed_str()).collect();
    let vals = match mode {
      ValueMode::Unique => Vals::Unique(
        (0..size)
          .map(|i| profile.value_for_index(i).into_boxed_str())
          .collect(),
      ),
      ValueMode::Cyclic { max_unique } => Vals::Cyclic(profile.generator(max_unique)),
      ValueMode::Prefixed { pad } => Vals::Unique(
        (0..size)
          .map(|i| prefixed_val(i, pad).into_boxed_str())
          .collect(),
      ),
    };
    Self {
      keys,
      vals,
      profile: profile.clone(),
      mode,
    }
  }

  pub fn profile(&self) -> &ValueProfile {
    &self.profile
  }

  pub fn mode(&self) -> ValueMode {
    self.mode
  }

  pub fn key_str(&self, idx: usize) -> &str {
    &self.keys[idx]
  }

  pub fn val_str(&self, idx: usize) -> &str {
    match &self.vals {
      Vals::Unique(v) => &v[idx],
      Vals::Cyclic(g) => {
        assert!(idx < self.keys.len(), "index {idx} out of range");
        g.value_at(idx)
      }
    }
  }

  /// Per-value sizing hint handed to engines / 传给引擎的单值大小估计
  ///
  /// The profile estimate, except in `Prefixed` mode where the longest value
  /// is used.
  pub fn val_size_hint(&self) -> usize {
    match self.mode {
      ValueMode::Prefixed { .. } => match self.keys.len() {
        0 => 0,
        n => self.val_str(n - 1).len(),
      },
      _ => self.profile.estimated_size(),
    }
  }

  pub fn stats(&self) -> DatasetStats {
    DatasetStats::from_source(self)
  }
}

impl KvSource for Dataset {
  #[inline]
  fn len(&self) -> usize {
    self.keys.len()
  }

  #[inline]
  fn key(&self, idx: usize) -> &[u8] {
    self.key_str(idx).as_bytes()
  }

  #[inline]
  fn val(&self, idx: usize) -> &[u8] {
    self.val_str(idx).as_bytes()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_unique_values() {
    let p = ValueProfile::bytes(4).unwrap();
    let d = Dataset::new(3, &p, ValueMode::Unique);
    assert_eq!(d.len(), 3);
    assert_eq!(d.key_str(2), "key_2");
    assert_eq!(d.val_str(1), "xxxx::entry-1");
  }

  #[test]
  fn test_cyclic_values() {
    let p = ValueProfile::bytes(1).unwrap();
    let d = Dataset::new(10, &p, ValueMode::Cyclic { max_unique: 4 });
    assert_eq!(d.val_str(0), "x::sample-0");
    assert_eq!(d.val_str(5), d.val_str(1));
  }

  #[test]
  #[should_panic]
  fn test_cyclic_out_of_range() {
    let p = ValueProfile::bytes(1).unwrap();
    let d = Dataset::new(2, &p, ValueMode::Cyclic { max_unique: 4 });
    let _ = d.val(2);
  }

  #[test]
  fn test_prefixed_values() {
    let p = ValueProfile::lines(3).unwrap();
    let d = Dataset::new(12, &p, ValueMode::prefixed());
    assert_eq!(d.val_str(0), format!("value_0_{}", "x".repeat(PREFIXED_PAD)));
    assert_eq!(d.val_str(11).len(), "value_11_".len() + PREFIXED_PAD);
    assert_eq!(d.val_size_hint(), d.val_str(11).len());
    assert_eq!(Dataset::new(0, &p, ValueMode::prefixed()).val_size_hint(), 0);
  }

  #[test]
  fn test_empty() {
    let p = ValueProfile::lines(1).unwrap();
    assert!(Dataset::new(0, &p, ValueMode::Unique).is_empty());
  }
}
