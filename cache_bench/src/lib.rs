// Cache Benchmark Library
// 缓存性能评测库

mod engine;
mod error;
mod metrics;
mod sweep;
mod trial;
pub mod workload;

pub mod adapter;

#[cfg(feature = "fjall")]
pub use adapter::fjall::FjallAdapter;
#[cfg(feature = "heed")]
pub use adapter::heed::HeedAdapter;
#[cfg(feature = "lru")]
pub use adapter::lru::LruAdapter;
#[cfg(feature = "moka")]
pub use adapter::moka::MokaAdapter;
#[cfg(feature = "rocksdb")]
pub use adapter::rocksdb::RocksDbAdapter;
#[cfg(feature = "sled")]
pub use adapter::sled::SledAdapter;
pub use adapter::engines;
pub use cache_bench_data::{Dataset, KvSource, ValueMode, ValueProfile};
pub use engine::{BenchEngine, EngineError, EngineResult, EngineSpec, OpenConf, dir_size};
pub use error::{Error, Result};
pub use metrics::BenchMetrics;
pub use sweep::{PointOutcome, SweepConf, SweepPoint, sweep};
pub use trial::{Phase, TeardownReport, Trial, TrialConf};
pub use workload::{MIXED_WRITE_EVERY, OpType, PassStats, Workload};
