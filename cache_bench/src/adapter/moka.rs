// moka adapter / moka 适配器
// In-process bounded cache, capacity = 2 x expected entries
// 进程内有界缓存，容量 = 2 倍预期条目数

use crate::{BenchEngine, EngineResult, OpenConf};

pub const NAME: &str = "moka";

/// moka::sync::Cache adapter with entry count capacity
/// moka::sync::Cache 适配器，按条目数限制容量
pub struct MokaAdapter {
  cache: moka::sync::Cache<Vec<u8>, Vec<u8>>,
}

impl BenchEngine for MokaAdapter {
  fn open(conf: &OpenConf) -> EngineResult<Self> {
    let cap = conf.entries.max(1).saturating_mul(2) as u64;
    Ok(Self {
      cache: moka::sync::Cache::builder().max_capacity(cap).build(),
    })
  }

  fn name(&self) -> &'static str {
    NAME
  }

  fn put(&mut self, key: &[u8], val: &[u8]) -> EngineResult<()> {
    self.cache.insert(key.to_vec(), val.to_vec());
    Ok(())
  }

  fn get(&mut self, key: &[u8]) -> EngineResult<Option<Vec<u8>>> {
    Ok(self.cache.get(key))
  }

  fn close(&mut self) -> EngineResult<()> {
    self.cache.invalidate_all();
    Ok(())
  }
}
