// Engine adapter trait for unified benchmarking
// 统一的引擎适配器 trait

use std::{
  fmt,
  path::{Path, PathBuf},
};

/// Native error of a backend, boxed at the adapter boundary
/// 后端原生错误，在适配器边界装箱
pub type EngineError = Box<dyn std::error::Error + Send + Sync>;

pub type EngineResult<T> = std::result::Result<T, EngineError>;

/// Calculate size of a file or directory tree iteratively
/// 迭代计算文件或目录树大小
pub fn dir_size(path: &Path) -> u64 {
  let Ok(meta) = std::fs::symlink_metadata(path) else {
    return 0;
  };
  if !meta.is_dir() {
    return meta.len();
  }
  let mut total = 0u64;
  let mut stack = vec![path.to_path_buf()];

  while let Some(current_path) = stack.pop() {
    if let Ok(entries) = std::fs::read_dir(&current_path) {
      for entry in entries.flatten() {
        let p = entry.path();
        if p.is_dir() {
          stack.push(p);
        } else {
          total += entry.metadata().map(|m| m.len()).unwrap_or(0);
        }
      }
    }
  }
  total
}

/// Settings handed to a backend when it is opened
/// 打开后端时传入的设置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenConf {
  /// Writable directory owned by this backend for this trial only
  /// 仅属于本次试验本后端的可写目录
  pub root: PathBuf,
  /// Expected entry count / 预期条目数
  pub entries: usize,
  /// Average key size in bytes / 平均键大小（字节）
  pub avg_key_size: usize,
  /// Average value size in bytes / 平均值大小（字节）
  pub avg_val_size: usize,
}

impl OpenConf {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self {
      root: root.into(),
      entries: 0,
      avg_key_size: 0,
      avg_val_size: 0,
    }
  }

  pub fn entries(mut self, entries: usize) -> Self {
    self.entries = entries;
    self
  }

  pub fn avg_key_size(mut self, size: usize) -> Self {
    self.avg_key_size = size;
    self
  }

  pub fn avg_val_size(mut self, size: usize) -> Self {
    self.avg_val_size = size;
    self
  }

  /// Estimated logical bytes of the whole dataset / 整个数据集的估计逻辑字节数
  pub fn est_bytes(&self) -> u64 {
    self.entries as u64 * (self.avg_key_size + self.avg_val_size) as u64
  }
}

/// Unified engine adapter trait / 统一引擎适配器 trait
///
/// Provides common interface for benchmarking different cache engines.
/// The driver and trial only ever see `dyn BenchEngine`.
/// 为不同缓存引擎提供统一的基准测试接口。
///
/// Note: No Send bound since one trial runs on a single thread.
/// 注意：无 Send 约束，因为单个试验只在一个线程上运行。
pub trait BenchEngine {
  /// Open under `conf.root` / 在 `conf.root` 下打开
  fn open(conf: &OpenConf) -> EngineResult<Self>
  where
    Self: Sized;

  /// Engine name / 引擎名称
  fn name(&self) -> &'static str;

  /// Put key-value / 写入键值
  fn put(&mut self, key: &[u8], val: &[u8]) -> EngineResult<()>;

  /// Get value by key / 按键读取
  fn get(&mut self, key: &[u8]) -> EngineResult<Option<Vec<u8>>>;

  /// Make prior writes durable / 持久化之前的写入
  fn commit(&mut self) -> EngineResult<()> {
    Ok(())
  }

  /// Release the engine before its storage is removed
  /// 在删除存储前释放引擎
  fn close(&mut self) -> EngineResult<()> {
    Ok(())
  }

  /// Every path created under the root, empty for in-memory engines
  /// 在根目录下创建的所有路径，内存引擎为空
  fn storage_paths(&self) -> Vec<PathBuf> {
    Vec::new()
  }

  /// Get disk usage in bytes / 获取磁盘使用量（字节）
  fn disk_usage(&self) -> u64 {
    self.storage_paths().iter().map(|p| dir_size(p)).sum()
  }
}

fn open_boxed<E: BenchEngine + 'static>(conf: &OpenConf) -> EngineResult<Box<dyn BenchEngine>> {
  Ok(Box::new(E::open(conf)?))
}

/// Type-erased constructor of one backend / 类型擦除的后端构造器
#[derive(Clone, Copy)]
pub struct EngineSpec {
  pub name: &'static str,
  open: fn(&OpenConf) -> EngineResult<Box<dyn BenchEngine>>,
}

impl EngineSpec {
  pub fn of<E: BenchEngine + 'static>(name: &'static str) -> Self {
    Self {
      name,
      open: open_boxed::<E>,
    }
  }

  pub fn open(&self, conf: &OpenConf) -> EngineResult<Box<dyn BenchEngine>> {
    (self.open)(conf)
  }
}

impl fmt::Debug for EngineSpec {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("EngineSpec").field(&self.name).finish()
  }
}
