// Value profiles: deterministic payload templates
// 值配置：确定性的负载模板

use std::{fmt, fmt::Write, str::FromStr, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::{Error, Result, ValueGenerator};

/// Line template suffix, the index is zero padded to 4 digits
/// 行模板后缀，索引补零到 4 位
const LINE_TAIL: &str = " :: lorem ipsum data";

/// Bytes per line for indices below 10000 / 索引小于 10000 时每行字节数
const LINE_LEN: usize = "benchmark-value-line-0000".len() + LINE_TAIL.len() + 1;

/// Filler for BYTES payloads / BYTES 负载的填充字符
pub const FILLER: char = 'x';

/// Headroom for the per-entry suffix / 每条目后缀的预留空间
pub const SIZE_PAD: usize = 24;

/// Profiles swept by default / 默认扫描的配置
pub const DEFAULT_SPECS: [&str; 4] = ["LINES_10", "LINES_100", "LINES_1000", "BYTES_1024"];

/// Payload shape / 负载形态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Shape {
  /// `amount` template lines / `amount` 行模板文本
  Lines,
  /// `amount` filler bytes / `amount` 个填充字节
  Bytes,
}

impl Shape {
  pub fn prefix(self) -> &'static str {
    match self {
      Self::Lines => "LINES",
      Self::Bytes => "BYTES",
    }
  }

  fn from_prefix(prefix: &str) -> Option<Self> {
    [Self::Lines, Self::Bytes]
      .into_iter()
      .find(|s| prefix.eq_ignore_ascii_case(s.prefix()))
  }

  /// Build base payload / 构建基础负载
  fn build(self, amount: usize) -> String {
    match self {
      Self::Lines => {
        let mut buf = String::with_capacity(amount * LINE_LEN);
        for i in 0..amount {
          // Writing into a String cannot fail / 写入 String 不会失败
          let _ = writeln!(buf, "benchmark-value-line-{i:04}{LINE_TAIL}");
        }
        buf
      }
      Self::Bytes => FILLER.to_string().repeat(amount),
    }
  }
}

/// Payload profile: shape + amount, with its generated base value
/// 负载配置：形态 + 数量，以及生成的基础值
///
/// Cloning is cheap, the base value is shared.
/// 克隆开销很小，基础值是共享的。
#[derive(Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ValueProfile {
  shape: Shape,
  amount: usize,
  base: Arc<str>,
}

impl ValueProfile {
  pub fn new(shape: Shape, amount: usize) -> Result<Self> {
    if amount == 0 {
      return Err(Error::invalid_spec(format!("{}_0", shape.prefix())));
    }
    Ok(Self {
      shape,
      amount,
      base: shape.build(amount).into(),
    })
  }

  /// `amount` template lines / `amount` 行模板文本
  pub fn lines(amount: usize) -> Result<Self> {
    Self::new(Shape::Lines, amount)
  }

  /// `amount` filler bytes / `amount` 个填充字节
  pub fn bytes(amount: usize) -> Result<Self> {
    Self::new(Shape::Bytes, amount)
  }

  /// Parse `LINES_<n>` or `BYTES_<n>`, case-insensitive
  /// 解析 `LINES_<n>` 或 `BYTES_<n>`，不区分大小写
  pub fn parse(spec: &str) -> Result<Self> {
    let invalid = || Error::invalid_spec(spec);
    let (prefix, n) = spec.split_once('_').ok_or_else(invalid)?;
    let shape = Shape::from_prefix(prefix).ok_or_else(invalid)?;
    // Digits only: rejects signs, blanks and "LINES_" / 仅允许数字
    if n.is_empty() || !n.bytes().all(|b| b.is_ascii_digit()) {
      return Err(invalid());
    }
    let amount: usize = n.parse().map_err(|_| invalid())?;
    Self::new(shape, amount).map_err(|_| invalid())
  }

  /// Profiles of the default sweep / 默认扫描的配置
  pub fn defaults() -> Vec<Self> {
    DEFAULT_SPECS
      .iter()
      .filter_map(|s| Self::parse(s).ok())
      .collect()
  }

  #[inline]
  pub fn shape(&self) -> Shape {
    self.shape
  }

  #[inline]
  pub fn amount(&self) -> usize {
    self.amount
  }

  #[inline]
  pub fn base_value(&self) -> &str {
    &self.base
  }

  /// Sizing hint for backends that pre-allocate / 供预分配后端使用的大小估计
  #[inline]
  pub fn estimated_size(&self) -> usize {
    self.base.len() + SIZE_PAD
  }

  /// Distinct value for entry `idx` / 条目 `idx` 的唯一值
  pub fn value_for_index(&self, idx: usize) -> String {
    format!("{}::entry-{idx}", self.base)
  }

  /// Bounded sample pool, size clamped to [1, 256]
  /// 有界样本池，大小限制在 [1, 256]
  pub fn generator(&self, max_unique_values: usize) -> ValueGenerator {
    ValueGenerator::new(&self.base, max_unique_values)
  }
}

impl PartialEq for ValueProfile {
  fn eq(&self, other: &Self) -> bool {
    self.shape == other.shape && self.amount == other.amount
  }
}

impl Eq for ValueProfile {}

impl fmt::Display for ValueProfile {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}_{}", self.shape.prefix(), self.amount)
  }
}

impl fmt::Debug for ValueProfile {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "ValueProfile({self})")
  }
}

impl FromStr for ValueProfile {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    Self::parse(s)
  }
}

impl TryFrom<String> for ValueProfile {
  type Error = Error;

  fn try_from(s: String) -> Result<Self> {
    Self::parse(&s)
  }
}

impl From<ValueProfile> for String {
  fn from(p: ValueProfile) -> Self {
    p.to_string()
  }
}
