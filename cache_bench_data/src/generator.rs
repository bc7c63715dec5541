// Cyclic sample pool derived from a base value
// 由基础值派生的循环样本池

/// Upper bound of distinct samples / 不同样本数上限
pub const MAX_SAMPLES: usize = 256;

/// Bounded pool of sample values, looked up by index modulo pool size
/// 有界样本池，按索引取模查找
///
/// Keeps memory independent of dataset size while still serving distinct
/// strings; `value_at(i) == value_at(i + count())` always holds.
/// 内存占用与数据集大小无关，同时仍提供不同的字符串。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueGenerator {
  samples: Box<[Box<str>]>,
}

impl ValueGenerator {
  pub(crate) fn new(base: &str, max_unique_values: usize) -> Self {
    let count = max_unique_values.clamp(1, MAX_SAMPLES);
    let samples = (0..count)
      .map(|i| format!("{base}::sample-{i}").into_boxed_str())
      .collect();
    Self { samples }
  }

  /// Number of samples, in [1, 256] / 样本数，范围 [1, 256]
  #[inline]
  pub fn count(&self) -> usize {
    self.samples.len()
  }

  #[inline]
  pub fn value_at(&self, idx: usize) -> &str {
    &self.samples[idx % self.samples.len()]
  }

  pub fn samples(&self) -> &[Box<str>] {
    &self.samples
  }
}
