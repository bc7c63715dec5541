//! LMDB adapter through heed
//! 基于 heed 的 LMDB 适配器
//!
//! Memory-mapped file-backed map: one data file plus its lock file.
//! 内存映射文件存储：一个数据文件和一个锁文件。

use std::path::PathBuf;

use heed::{Database, Env, EnvFlags, EnvOpenOptions, types::Bytes};

use crate::{BenchEngine, EngineResult, OpenConf};

pub const NAME: &str = "heed";
const DB_NAME: &str = "cache";
const FILE: &str = "cache.mdb";
const LOCK_SUFFIX: &str = "-lock";

/// Map size floor / 映射大小下限
const MAP_MIN: u64 = 64 * 1024 * 1024;
/// Headroom for copy-on-write pages / 写时复制页面的余量
const MAP_FACTOR: u64 = 4;
/// Map size granularity, a multiple of every common page size
/// 映射大小粒度，为常见页大小的倍数
const MAP_ALIGN: u64 = 1024 * 1024;

pub struct HeedAdapter {
  env: Env,
  db: Database<Bytes, Bytes>,
  file: PathBuf,
}

fn map_size(conf: &OpenConf) -> usize {
  let want = conf.est_bytes().saturating_mul(MAP_FACTOR).max(MAP_MIN);
  let aligned = want.div_ceil(MAP_ALIGN).saturating_mul(MAP_ALIGN);
  usize::try_from(aligned).unwrap_or(MAP_MIN as usize)
}

impl BenchEngine for HeedAdapter {
  fn open(conf: &OpenConf) -> EngineResult<Self> {
    let file = conf.root.join(FILE);
    let mut opts = EnvOpenOptions::new();
    opts.map_size(map_size(conf)).max_dbs(1);
    // SAFETY: the file is fresh and private to this adapter, nothing else maps it.
    // Durability is requested explicitly in commit.
    let env = unsafe {
      opts.flags(EnvFlags::NO_SUB_DIR | EnvFlags::NO_SYNC);
      opts.open(&file)?
    };
    let mut wtxn = env.write_txn()?;
    let db = env.create_database(&mut wtxn, Some(DB_NAME))?;
    wtxn.commit()?;
    Ok(Self { env, db, file })
  }

  fn name(&self) -> &'static str {
    NAME
  }

  fn put(&mut self, key: &[u8], val: &[u8]) -> EngineResult<()> {
    let mut wtxn = self.env.write_txn()?;
    self.db.put(&mut wtxn, key, val)?;
    wtxn.commit()?;
    Ok(())
  }

  fn get(&mut self, key: &[u8]) -> EngineResult<Option<Vec<u8>>> {
    let rtxn = self.env.read_txn()?;
    Ok(self.db.get(&rtxn, key)?.map(<[u8]>::to_vec))
  }

  fn commit(&mut self) -> EngineResult<()> {
    self.env.force_sync()?;
    Ok(())
  }

  fn close(&mut self) -> EngineResult<()> {
    self.commit()
  }

  fn storage_paths(&self) -> Vec<PathBuf> {
    let mut lock = self.file.clone().into_os_string();
    lock.push(LOCK_SUFFIX);
    vec![self.file.clone(), PathBuf::from(lock)]
  }
}
