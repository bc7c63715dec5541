// Sled adapter / Sled 适配器
// Embedded local disk cache / 嵌入式本地磁盘缓存

use std::path::PathBuf;

use crate::{BenchEngine, EngineResult, OpenConf};

pub const NAME: &str = "sled";

/// 8MB page cache, same for every disk engine / 8MB 页缓存，所有磁盘引擎相同
const CACHE_SIZE: u64 = 8 * 1024 * 1024;

/// Sled adapter / Sled 适配器
pub struct SledAdapter {
  db: sled::Db,
  /// Data directory / 数据目录
  path: PathBuf,
}

impl BenchEngine for SledAdapter {
  fn open(conf: &OpenConf) -> EngineResult<Self> {
    let path = conf.root.join(NAME);
    let db = sled::Config::new()
      .path(&path)
      .cache_capacity(CACHE_SIZE)
      .open()?;
    Ok(Self { db, path })
  }

  fn name(&self) -> &'static str {
    NAME
  }

  fn put(&mut self, key: &[u8], val: &[u8]) -> EngineResult<()> {
    self.db.insert(key, val)?;
    Ok(())
  }

  fn get(&mut self, key: &[u8]) -> EngineResult<Option<Vec<u8>>> {
    Ok(self.db.get(key)?.map(|v| v.to_vec()))
  }

  fn commit(&mut self) -> EngineResult<()> {
    self.db.flush()?;
    Ok(())
  }

  fn close(&mut self) -> EngineResult<()> {
    self.commit()
  }

  fn storage_paths(&self) -> Vec<PathBuf> {
    vec![self.path.clone()]
  }
}
