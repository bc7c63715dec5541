use std::path::PathBuf;

use thiserror::Error;

use crate::{EngineError, Phase};

#[derive(Error, Debug)]
pub enum Error {
  #[error(transparent)]
  Data(#[from] cache_bench_data::Error),

  /// Backend could not initialize its storage / 后端无法初始化存储
  #[error("open {engine}: {source}")]
  Open {
    engine: &'static str,
    source: EngineError,
  },

  /// put / get / commit failed mid-pass / 操作在遍历中失败
  #[error("{engine} {op}: {source}")]
  Op {
    engine: &'static str,
    op: &'static str,
    source: EngineError,
  },

  /// Closing a handle failed during teardown / 清理阶段关闭句柄失败
  #[error("close {engine}: {source}")]
  Close {
    engine: &'static str,
    source: EngineError,
  },

  /// Removing storage failed during teardown / 清理阶段删除存储失败
  #[error("cleanup {engine} {}: {source}", path.display())]
  Cleanup {
    engine: &'static str,
    path: PathBuf,
    source: std::io::Error,
  },

  #[error("trial is {actual:?}, expected {expected}")]
  Phase { expected: &'static str, actual: Phase },

  #[error("unknown workload {0:?}, expected write, read or mixed")]
  InvalidWorkload(Box<str>),

  #[error("no engine at index {0}")]
  NoEngine(usize),

  #[error("IO error: {0}")]
  Io(#[from] std::io::Error),

  #[error("JSON error: {0}")]
  Json(#[from] sonic_rs::Error),
}

impl Error {
  #[inline]
  pub(crate) fn op(engine: &'static str, op: &'static str, source: EngineError) -> Self {
    Self::Op { engine, op, source }
  }

  /// Engine this error belongs to, if any / 错误所属的引擎
  pub fn engine(&self) -> Option<&'static str> {
    match self {
      Self::Open { engine, .. }
      | Self::Op { engine, .. }
      | Self::Close { engine, .. }
      | Self::Cleanup { engine, .. } => Some(*engine),
      _ => None,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
