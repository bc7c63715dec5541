// Error types for cache_bench_data
// cache_bench_data 错误类型

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
  /// Malformed or out-of-range value profile / 值配置格式错误或越界
  #[error("invalid value profile {0:?}, expected LINES_<n> or BYTES_<n> with n > 0")]
  InvalidSpec(Box<str>),
}

impl Error {
  #[inline]
  pub fn invalid_spec(spec: impl Into<Box<str>>) -> Self {
    Self::InvalidSpec(spec.into())
  }
}

pub type Result<T> = std::result::Result<T, Error>;
