//! Fjall adapter
//! Fjall 适配器
//!
//! Log-structured (LSM) store / 日志结构存储

use std::path::PathBuf;

use fjall::KeyspaceCreateOptions;

use crate::{BenchEngine, EngineResult, OpenConf};

pub const NAME: &str = "fjall";
const KEYSPACE: &str = "cache";

/// 8MB block cache
/// 8MB 块缓存
const CACHE_SIZE: u64 = 8 * 1024 * 1024;

/// Memtable bounds / 内存表上下限
const MEMTABLE_MIN: u64 = 8 * 1024 * 1024;
const MEMTABLE_MAX: u64 = 64 * 1024 * 1024;

pub struct FjallAdapter {
  db: fjall::Database,
  keyspace: fjall::Keyspace,
  path: PathBuf,
}

impl BenchEngine for FjallAdapter {
  fn open(conf: &OpenConf) -> EngineResult<Self> {
    let path = conf.root.join(NAME);
    let memtable = conf.est_bytes().clamp(MEMTABLE_MIN, MEMTABLE_MAX);
    let db = fjall::Database::builder(&path)
      .cache_size(CACHE_SIZE)
      .open()?;
    let keyspace = db.keyspace(KEYSPACE, || {
      KeyspaceCreateOptions::default().max_memtable_size(memtable)
    })?;
    Ok(Self { db, keyspace, path })
  }

  fn name(&self) -> &'static str {
    NAME
  }

  fn put(&mut self, key: &[u8], val: &[u8]) -> EngineResult<()> {
    self.keyspace.insert(key, val)?;
    Ok(())
  }

  fn get(&mut self, key: &[u8]) -> EngineResult<Option<Vec<u8>>> {
    Ok(self.keyspace.get(key)?.map(|v| v.to_vec()))
  }

  fn commit(&mut self) -> EngineResult<()> {
    self.db.persist(fjall::PersistMode::SyncAll)?;
    Ok(())
  }

  fn close(&mut self) -> EngineResult<()> {
    self.commit()
  }

  fn storage_paths(&self) -> Vec<PathBuf> {
    vec![self.path.clone()]
  }
}
