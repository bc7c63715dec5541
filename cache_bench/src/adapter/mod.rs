// Adapter modules / 适配器模块

#[cfg(feature = "moka")]
pub mod moka;

#[cfg(feature = "lru")]
pub mod lru;

#[cfg(feature = "sled")]
pub mod sled;

#[cfg(feature = "fjall")]
pub mod fjall;

#[cfg(feature = "heed")]
pub mod heed;

#[cfg(feature = "rocksdb")]
pub mod rocksdb;

use crate::EngineSpec;

/// Every backend compiled in, in-process engines first
/// 所有已编译的后端，进程内引擎在前
#[allow(clippy::vec_init_then_push, unused_mut)]
pub fn engines() -> Vec<EngineSpec> {
  let mut li = Vec::new();
  #[cfg(feature = "moka")]
  li.push(EngineSpec::of::<moka::MokaAdapter>(moka::NAME));
  #[cfg(feature = "lru")]
  li.push(EngineSpec::of::<lru::LruAdapter>(lru::NAME));
  #[cfg(feature = "sled")]
  li.push(EngineSpec::of::<sled::SledAdapter>(sled::NAME));
  #[cfg(feature = "fjall")]
  li.push(EngineSpec::of::<fjall::FjallAdapter>(fjall::NAME));
  #[cfg(feature = "heed")]
  li.push(EngineSpec::of::<heed::HeedAdapter>(heed::NAME));
  #[cfg(feature = "rocksdb")]
  li.push(EngineSpec::of::<rocksdb::RocksDbAdapter>(rocksdb::NAME));
  li
}
