// Workload driver: one deterministic pass over an index range
// 工作负载驱动：对索引区间做一次确定性遍历

use std::{fmt, hint::black_box, str::FromStr};

use cache_bench_data::KvSource;
use serde::{Deserialize, Serialize};

use crate::{BenchEngine, Error, Result};

/// Mixed pass writes every n-th index / 混合负载每 n 个索引写一次
pub const MIXED_WRITE_EVERY: usize = 5;

/// Access pattern of a pass / 单次遍历的访问模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Workload {
  /// put every index / 每个索引写入
  Write,
  /// get every index / 每个索引读取
  Read,
  /// put at `i % 5 == 0`, get otherwise (20% / 80%)
  /// `i % 5 == 0` 时写入，否则读取
  Mixed,
}

/// Operation type for benchmark / 基准测试操作类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpType {
  Put,
  Get,
}

impl Workload {
  pub const ALL: [Self; 3] = [Self::Write, Self::Read, Self::Mixed];

  pub fn name(self) -> &'static str {
    match self {
      Self::Write => "write",
      Self::Read => "read",
      Self::Mixed => "mixed",
    }
  }

  /// Operation at `idx`, a pure function of the index
  /// `idx` 处的操作，仅由索引决定
  #[inline]
  pub fn op(self, idx: usize) -> OpType {
    match self {
      Self::Write => OpType::Put,
      Self::Read => OpType::Get,
      Self::Mixed if idx % MIXED_WRITE_EVERY == 0 => OpType::Put,
      Self::Mixed => OpType::Get,
    }
  }

  /// Operations over `[0, len)` in increasing index order
  /// `[0, len)` 上按索引递增的操作序列
  pub fn ops(self, len: usize) -> impl Iterator<Item = (usize, OpType)> {
    (0..len).map(move |i| (i, self.op(i)))
  }
}

impl fmt::Display for Workload {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

impl FromStr for Workload {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    Self::ALL
      .into_iter()
      .find(|w| s.eq_ignore_ascii_case(w.name()))
      .ok_or_else(|| Error::InvalidWorkload(s.into()))
  }
}

/// Counters of one pass / 单次遍历的计数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PassStats {
  pub puts: u64,
  pub gets: u64,
  /// Gets that observed a value / 读到值的次数
  pub hits: u64,
}

impl PassStats {
  #[inline]
  pub fn ops(&self) -> u64 {
    self.puts + self.gets
  }

  #[inline]
  pub fn misses(&self) -> u64 {
    self.gets - self.hits
  }
}

/// Run one pass of `workload` over every index of `src`, then commit once
/// 对 `src` 的每个索引执行一次 `workload`，最后提交一次
///
/// Misses are counted, not errors. The first failing call aborts the pass,
/// nothing is retried.
/// 未命中只计数不报错。首个失败的调用会中止遍历，不重试。
pub fn run<E, S>(engine: &mut E, src: &S, workload: Workload) -> Result<PassStats>
where
  E: BenchEngine + ?Sized,
  S: KvSource + ?Sized,
{
  let name = engine.name();
  let mut stats = PassStats::default();

  for (i, op) in workload.ops(src.len()) {
    let key = src.key(i);
    match op {
      OpType::Put => {
        engine
          .put(key, src.val(i))
          .map_err(|e| Error::op(name, "put", e))?;
        stats.puts += 1;
      }
      OpType::Get => {
        let val = engine.get(key).map_err(|e| Error::op(name, "get", e))?;
        stats.gets += 1;
        if val.is_some() {
          stats.hits += 1;
        }
        // Keep the read from being optimized away / 防止读取被优化掉
        black_box(val);
      }
    }
  }

  engine.commit().map_err(|e| Error::op(name, "commit", e))?;
  Ok(stats)
}
