// Trial orchestrator: setup, populate, measure, teardown for one sweep point
// 试验编排：单个扫描点的准备、预填充、测量与清理

use std::{
  fs, io,
  path::{Component, Path, PathBuf},
};

use cache_bench_data::{Dataset, ValueMode};
use humansize::{BINARY, format_size};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use tempfile::TempDir;

use crate::{
  BenchEngine, EngineSpec, Error, OpenConf, PassStats, Result, SweepPoint, Workload, workload,
};

/// Prefix of trial temp roots / 试验临时根目录前缀
const TMP_PREFIX: &str = "cache_bench_";

/// Trial lifecycle / 试验生命周期
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
  Init,
  Populated,
  Measuring,
  Teardown,
  Done,
}

/// Per-trial settings / 单次试验设置
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialConf {
  pub value_mode: ValueMode,
  /// Base directory for trial roots, system temp dir if unset
  /// 试验根目录的父目录，未设置时使用系统临时目录
  pub tmp_dir: Option<PathBuf>,
}

/// Outcome of a teardown, failures are collected and never raised
/// 清理结果，失败只收集不抛出
#[derive(Debug, Default)]
pub struct TeardownReport {
  /// Handles closed / 已关闭的句柄数
  pub closed: usize,
  /// Bytes the engines held on disk before removal / 删除前的磁盘占用
  pub disk_bytes: u64,
  pub errors: Vec<Error>,
}

impl TeardownReport {
  pub fn is_clean(&self) -> bool {
    self.errors.is_empty()
  }
}

struct Handle {
  name: &'static str,
  root: PathBuf,
  engine: Option<Box<dyn BenchEngine>>,
}

/// One (data size, value profile) trial over a set of engines
/// 针对一组引擎的单次（数据量，值配置）试验
///
/// Owns every engine and its storage. Dropping a trial that was not torn down
/// tears it down, so an error or panic between phases still cleans up.
/// 拥有所有引擎及其存储。未清理的试验在 drop 时自动清理。
pub struct Trial {
  point: SweepPoint,
  data: Dataset,
  handles: Vec<Handle>,
  dir: Option<TempDir>,
  phase: Phase,
}

impl Trial {
  /// Build the dataset and open every engine under a fresh temp root
  /// 构建数据集并在新的临时根目录下打开所有引擎
  pub fn open(point: &SweepPoint, engines: &[EngineSpec], conf: &TrialConf) -> Result<Self> {
    let data = Dataset::new(point.data_size, &point.profile, conf.value_mode);
    let stats = data.stats();
    let val_hint = data.val_size_hint();

    let mut builder = tempfile::Builder::new();
    builder.prefix(TMP_PREFIX);
    let dir = match &conf.tmp_dir {
      Some(base) => {
        fs::create_dir_all(base)?;
        builder.tempdir_in(base)?
      }
      None => builder.tempdir()?,
    };
    info!(
      "trial {point}: {} entries, {} data, root {}",
      stats.item_count,
      format_size(stats.total_bytes(), BINARY),
      dir.path().display()
    );

    let mut trial = Self {
      point: point.clone(),
      data,
      handles: Vec::with_capacity(engines.len()),
      dir: Some(dir),
      phase: Phase::Init,
    };

    // An early return drops `trial`, which closes what is already open
    // 提前返回会 drop `trial`，从而关闭已打开的引擎
    for spec in engines {
      let root = trial.root().join(spec.name);
      fs::create_dir(&root)?;
      let open_conf = OpenConf::new(&root)
        .entries(stats.item_count)
        .avg_key_size(stats.avg_key_size)
        .avg_val_size(val_hint);
      let engine = spec.open(&open_conf).map_err(|source| Error::Open {
        engine: spec.name,
        source,
      })?;
      debug!("{}: opened at {}", spec.name, root.display());
      trial.handles.push(Handle {
        name: spec.name,
        root,
        engine: Some(engine),
      });
    }
    Ok(trial)
  }

  pub fn point(&self) -> &SweepPoint {
    &self.point
  }

  pub fn data(&self) -> &Dataset {
    &self.data
  }

  pub fn phase(&self) -> Phase {
    self.phase
  }

  /// Trial temp root / 试验临时根目录
  pub fn root(&self) -> &Path {
    self.dir.as_ref().map_or(Path::new(""), |d| d.path())
  }

  /// Engine names in open order / 按打开顺序的引擎名
  pub fn engines(&self) -> Vec<&'static str> {
    self.handles.iter().map(|h| h.name).collect()
  }

  pub fn engine_idx(&self, name: &str) -> Option<usize> {
    self.handles.iter().position(|h| h.name == name)
  }

  /// Direct access to an open engine / 直接访问已打开的引擎
  pub fn engine_mut(&mut self, idx: usize) -> Option<&mut (dyn BenchEngine + 'static)> {
    self.handles.get_mut(idx)?.engine.as_deref_mut()
  }

  /// Write every entry into every engine, then commit each once
  /// 将所有条目写入每个引擎，然后各提交一次
  pub fn populate(&mut self) -> Result<()> {
    self.expect(&[Phase::Init], "Init")?;
    for h in &mut self.handles {
      if let Some(engine) = h.engine.as_deref_mut() {
        let stats = workload::run(engine, &self.data, Workload::Write)?;
        debug!("{}: populated {} entries", h.name, stats.puts);
      }
    }
    self.phase = Phase::Populated;
    info!("trial {}: populated {} engines", self.point, self.handles.len());
    Ok(())
  }

  /// One measured pass against engine `idx`, timing is up to the caller
  /// 对引擎 `idx` 执行一次测量遍历，计时由调用方负责
  pub fn run(&mut self, idx: usize, workload: Workload) -> Result<PassStats> {
    self.expect(&[Phase::Populated, Phase::Measuring], "Populated or Measuring")?;
    let engine = self
      .handles
      .get_mut(idx)
      .and_then(|h| h.engine.as_deref_mut())
      .ok_or(Error::NoEngine(idx))?;
    self.phase = Phase::Measuring;
    workload::run(engine, &self.data, workload)
  }

  /// Close every engine and remove its storage, each independently
  /// 关闭所有引擎并删除其存储，彼此独立
  pub fn teardown(mut self) -> TeardownReport {
    self.cleanup()
  }

  fn expect(&self, phases: &[Phase], expected: &'static str) -> Result<()> {
    if phases.contains(&self.phase) {
      Ok(())
    } else {
      Err(Error::Phase {
        expected,
        actual: self.phase,
      })
    }
  }

  fn cleanup(&mut self) -> TeardownReport {
    let mut report = TeardownReport::default();
    if self.phase == Phase::Done {
      return report;
    }
    self.phase = Phase::Teardown;

    for h in &mut self.handles {
      let Some(mut engine) = h.engine.take() else {
        continue;
      };
      let paths = engine.storage_paths();
      let disk = engine.disk_usage();
      report.disk_bytes += disk;

      if let Err(source) = engine.close() {
        warn!("{}: close failed: {source}", h.name);
        report.errors.push(Error::Close {
          engine: h.name,
          source,
        });
      }
      // Release files before removing them / 删除前先释放文件
      drop(engine);
      report.closed += 1;

      for path in paths {
        if !is_under(&path, &h.root) {
          warn!(
            "{}: refuse to remove {} outside {}",
            h.name,
            path.display(),
            h.root.display()
          );
          report.errors.push(Error::Cleanup {
            engine: h.name,
            source: io::Error::new(io::ErrorKind::PermissionDenied, "outside engine root"),
            path,
          });
          continue;
        }
        if let Err(source) = remove_path(&path) {
          warn!("{}: remove {} failed: {source}", h.name, path.display());
          report.errors.push(Error::Cleanup {
            engine: h.name,
            path,
            source,
          });
        }
      }

      // Non-recursive: leftovers mean the engine under-reported its paths
      // 非递归：残留文件说明引擎未报告全部路径
      if let Err(source) = fs::remove_dir(&h.root)
        && source.kind() != io::ErrorKind::NotFound
      {
        warn!("{}: remove {} failed: {source}", h.name, h.root.display());
        report.errors.push(Error::Cleanup {
          engine: h.name,
          path: h.root.clone(),
          source,
        });
      }
      debug!("{}: closed, {} released", h.name, format_size(disk, BINARY));
    }

    if let Some(dir) = self.dir.take() {
      let path = dir.path().to_path_buf();
      if let Err(source) = dir.close() {
        warn!("trial {}: remove {} failed: {source}", self.point, path.display());
        report.errors.push(Error::Cleanup {
          engine: "trial",
          path,
          source,
        });
      }
    }

    self.phase = Phase::Done;
    info!(
      "trial {}: closed {} engines, {} cleanup errors",
      self.point,
      report.closed,
      report.errors.len()
    );
    report
  }
}

impl Drop for Trial {
  fn drop(&mut self) {
    if self.phase != Phase::Done {
      let _ = self.cleanup();
    }
  }
}

/// `path` names `root` or something inside it, without climbing out through `..`
/// `path` 为 `root` 或其内部路径，且不经由 `..` 跳出
fn is_under(path: &Path, root: &Path) -> bool {
  path.strip_prefix(root).is_ok_and(|rel| {
    rel
      .components()
      .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
  })
}

/// Remove a file or directory tree, missing paths are fine
/// 删除文件或目录树，路径不存在视为成功
fn remove_path(path: &Path) -> io::Result<()> {
  let meta = match fs::symlink_metadata(path) {
    Ok(meta) => meta,
    Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
    Err(e) => return Err(e),
  };
  if meta.is_dir() {
    fs::remove_dir_all(path)
  } else {
    fs::remove_file(path)
  }
}
