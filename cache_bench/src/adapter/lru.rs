// lru adapter / lru 适配器
// Item count based capacity (no weight support)
// 基于条目数的容量（不支持权重）

use std::num::NonZeroUsize;

use crate::{BenchEngine, EngineResult, OpenConf};

pub const NAME: &str = "lru";

/// lru::LruCache adapter with item count capacity
/// lru::LruCache 适配器，使用条目数容量
pub struct LruAdapter {
  cache: lru::LruCache<Vec<u8>, Vec<u8>>,
}

impl BenchEngine for LruAdapter {
  fn open(conf: &OpenConf) -> EngineResult<Self> {
    let cap = NonZeroUsize::new(conf.entries.saturating_mul(2)).unwrap_or(NonZeroUsize::MIN);
    Ok(Self {
      cache: lru::LruCache::new(cap),
    })
  }

  fn name(&self) -> &'static str {
    NAME
  }

  fn put(&mut self, key: &[u8], val: &[u8]) -> EngineResult<()> {
    self.cache.put(key.to_vec(), val.to_vec());
    Ok(())
  }

  fn get(&mut self, key: &[u8]) -> EngineResult<Option<Vec<u8>>> {
    Ok(self.cache.get(key).cloned())
  }

  fn close(&mut self) -> EngineResult<()> {
    self.cache.clear();
    Ok(())
  }
}
