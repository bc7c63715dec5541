// Sweep configuration and runner
// 扫描配置与运行器

use std::{fmt, path::Path, path::PathBuf};

use cache_bench_data::{ValueMode, ValueProfile};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::{EngineSpec, Result, TeardownReport, Trial, TrialConf, Workload};

/// One (data size, value profile) combination / 一个（数据量，值配置）组合
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepPoint {
  pub data_size: usize,
  pub profile: ValueProfile,
}

impl SweepPoint {
  pub fn new(data_size: usize, profile: ValueProfile) -> Self {
    Self { data_size, profile }
  }
}

impl fmt::Display for SweepPoint {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}x{}", self.data_size, self.profile)
  }
}

/// Benchmark sweep configuration / 基准扫描配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConf {
  /// Entry counts to test / 测试的条目数
  pub data_sizes: Vec<usize>,
  /// Value profiles to test / 测试的值配置
  pub profiles: Vec<ValueProfile>,
  /// Workloads measured per engine / 每个引擎测量的工作负载
  pub workloads: Vec<Workload>,
  pub value_mode: ValueMode,
  /// Unmeasured passes before timing / 计时前的预热遍历次数
  pub warmup: u32,
  /// Timed passes / 计时遍历次数
  pub iterations: u32,
  /// Base directory for trial roots / 试验根目录的父目录
  pub tmp_dir: Option<PathBuf>,
  /// Output directory / 输出目录
  pub report_dir: PathBuf,
}

impl Default for SweepConf {
  fn default() -> Self {
    Self {
      data_sizes: vec![1000, 10000, 100000],
      profiles: ValueProfile::defaults(),
      workloads: Workload::ALL.to_vec(),
      value_mode: ValueMode::Unique,
      warmup: 2,
      iterations: 3,
      tmp_dir: None,
      report_dir: PathBuf::from("report"),
    }
  }
}

impl SweepConf {
  /// Create new config with custom settings
  /// 使用自定义设置创建新配置
  pub fn new(data_sizes: Vec<usize>, profiles: Vec<ValueProfile>, workloads: Vec<Workload>) -> Self {
    Self {
      data_sizes,
      profiles,
      workloads,
      ..Self::default()
    }
  }

  /// Load from a JSON file, missing fields take defaults
  /// 从 JSON 文件加载，缺失字段使用默认值
  pub fn load(path: &Path) -> Result<Self> {
    let json = std::fs::read_to_string(path)?;
    Ok(sonic_rs::from_str(&json)?)
  }

  /// Parse profile specs such as `LINES_10` / 解析 `LINES_10` 等配置串
  pub fn profiles_from(specs: &[&str]) -> Result<Vec<ValueProfile>> {
    Ok(
      specs
        .iter()
        .map(|s| ValueProfile::parse(s))
        .collect::<cache_bench_data::Result<_>>()?,
    )
  }

  pub fn value_mode(mut self, mode: ValueMode) -> Self {
    self.value_mode = mode;
    self
  }

  /// Set warmup iterations / 设置预热迭代次数
  pub fn warmup(mut self, warmup: u32) -> Self {
    self.warmup = warmup;
    self
  }

  pub fn iterations(mut self, iterations: u32) -> Self {
    self.iterations = iterations;
    self
  }

  pub fn tmp_dir(mut self, dir: PathBuf) -> Self {
    self.tmp_dir = Some(dir);
    self
  }

  /// Set output directory / 设置输出目录
  pub fn report_dir(mut self, dir: PathBuf) -> Self {
    self.report_dir = dir;
    self
  }

  /// Every point, data size major / 所有扫描点，数据量优先
  pub fn points(&self) -> impl Iterator<Item = SweepPoint> + '_ {
    self.data_sizes.iter().flat_map(move |&size| {
      self
        .profiles
        .iter()
        .map(move |p| SweepPoint::new(size, p.clone()))
    })
  }

  pub fn trial_conf(&self) -> TrialConf {
    TrialConf {
      value_mode: self.value_mode,
      tmp_dir: self.tmp_dir.clone(),
    }
  }
}

/// Result of one sweep point / 单个扫描点的结果
#[derive(Debug)]
pub struct PointOutcome<T> {
  pub point: SweepPoint,
  pub result: Result<T>,
  /// None when the trial never opened / 试验未能打开时为 None
  pub teardown: Option<TeardownReport>,
}

/// Run a trial per point: open, populate, hand to `f`, tear down
/// 每个扫描点运行一次试验：打开、预填充、交给 `f`、清理
///
/// A failing point is logged and recorded, the remaining points still run.
/// 失败的扫描点会被记录，其余扫描点继续运行。
pub fn sweep<T, F>(conf: &SweepConf, engines: &[EngineSpec], mut f: F) -> Vec<PointOutcome<T>>
where
  F: FnMut(&mut Trial) -> Result<T>,
{
  let trial_conf = conf.trial_conf();
  conf
    .points()
    .map(|point| match Trial::open(&point, engines, &trial_conf) {
      Err(e) => {
        warn!("trial {point}: {e}");
        PointOutcome {
          point,
          result: Err(e),
          teardown: None,
        }
      }
      Ok(mut trial) => {
        let result = trial.populate().and_then(|()| f(&mut trial));
        if let Err(e) = &result {
          warn!("trial {point}: {e}");
        }
        let report = trial.teardown();
        info!("trial {point}: done");
        PointOutcome {
          point,
          result,
          teardown: Some(report),
        }
      }
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_default_config() {
    let cfg = SweepConf::default();
    assert_eq!(cfg.points().count(), 3 * 4);
    assert_eq!(cfg.workloads, Workload::ALL);
    assert_eq!(cfg.warmup, 2);
    assert_eq!(cfg.iterations, 3);
  }

  #[test]
  fn test_points_order() {
    let profiles = SweepConf::profiles_from(&["BYTES_1", "lines_2"]).unwrap();
    let cfg = SweepConf::new(vec![10, 20], profiles, vec![Workload::Read]);
    let names: Vec<String> = cfg.points().map(|p| p.to_string()).collect();
    assert_eq!(names, ["10xBYTES_1", "10xLINES_2", "20xBYTES_1", "20xLINES_2"]);
  }

  #[test]
  fn test_profiles_from_invalid() {
    assert!(SweepConf::profiles_from(&["LINES_1", "FOO_2"]).is_err());
  }

  #[test]
  fn test_json_partial() {
    let cfg: SweepConf =
      sonic_rs::from_str(r#"{"data_sizes":[5],"profiles":["bytes_3"],"value_mode":{"mode":"cyclic","max_unique":8}}"#)
        .unwrap();
    assert_eq!(cfg.data_sizes, [5]);
    assert_eq!(cfg.profiles[0].to_string(), "BYTES_3");
    assert_eq!(cfg.value_mode, ValueMode::Cyclic { max_unique: 8 });
    assert_eq!(cfg.iterations, 3);
  }
}
