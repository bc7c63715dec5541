// RocksDB adapter / RocksDB 适配器
// Off-heap persisted store: block cache and memtables live outside the Rust heap
// 堆外持久化存储：块缓存和内存表位于 Rust 堆之外

use std::path::PathBuf;

use rocksdb::{BlockBasedOptions, Cache, Options};

use crate::{BenchEngine, EngineResult, OpenConf};

pub const NAME: &str = "rocksdb";
/// 8MB cache / 8MB 缓存
const CACHE_SIZE: usize = 8 * 1024 * 1024;

/// Write buffer bounds / 写缓冲上下限
const WRITE_BUF_MIN: usize = 4 * 1024 * 1024;
const WRITE_BUF_MAX: usize = 256 * 1024 * 1024;

/// RocksDB adapter / RocksDB 适配器
pub struct RocksDbAdapter {
  db: rocksdb::DB,
  /// Data directory / 数据目录
  path: PathBuf,
}

impl BenchEngine for RocksDbAdapter {
  fn open(conf: &OpenConf) -> EngineResult<Self> {
    let path = conf.root.join(NAME);
    let cache = Cache::new_lru_cache(CACHE_SIZE);
    let mut block_opts = BlockBasedOptions::default();
    block_opts.set_block_cache(&cache);

    let mut opts = Options::default();
    opts.create_if_missing(true);
    opts.set_block_based_table_factory(&block_opts);
    // Sized from the dataset so population fits one memtable when possible
    // 按数据集大小设置，尽量让预填充装入一个内存表
    let write_buf = usize::try_from(conf.est_bytes())
      .unwrap_or(WRITE_BUF_MAX)
      .clamp(WRITE_BUF_MIN, WRITE_BUF_MAX);
    opts.set_write_buffer_size(write_buf);

    let db = rocksdb::DB::open(&opts, &path)?;
    Ok(Self { db, path })
  }

  fn name(&self) -> &'static str {
    NAME
  }

  fn put(&mut self, key: &[u8], val: &[u8]) -> EngineResult<()> {
    self.db.put(key, val)?;
    Ok(())
  }

  fn get(&mut self, key: &[u8]) -> EngineResult<Option<Vec<u8>>> {
    Ok(self.db.get(key)?)
  }

  fn commit(&mut self) -> EngineResult<()> {
    self.db.flush()?;
    // fsync WAL / 同步 WAL 到磁盘
    self.db.flush_wal(true)?;
    Ok(())
  }

  fn storage_paths(&self) -> Vec<PathBuf> {
    vec![self.path.clone()]
  }
}
