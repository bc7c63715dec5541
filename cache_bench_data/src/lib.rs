// Cache Benchmark Data Library
// 缓存基准测试数据库

#![cfg_attr(docsrs, feature(doc_cfg))]

mod dataset;
mod error;
mod generator;
mod profile;
mod stats;

pub use dataset::{Dataset, KvSource, PREFIXED_PAD, ValueMode, key_of, prefixed_val};
pub use error::{Error, Result};
pub use generator::{MAX_SAMPLES, ValueGenerator};
pub use profile::{DEFAULT_SPECS, FILLER, SIZE_PAD, Shape, ValueProfile};
pub use stats::DatasetStats;
