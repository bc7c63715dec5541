// Throughput sweep over every compiled-in engine
// 对所有已编译引擎的吞吐量扫描
//
// Config: $CACHE_BENCH_CONF or benches/sweep.json, defaults otherwise.
// 配置：$CACHE_BENCH_CONF 或 benches/sweep.json，否则使用默认值。

use std::{env, fs, path::Path, time::Instant};

use cache_bench::{BenchMetrics, Result, SweepConf, Trial, engines, sweep};
use sonic_rs::to_string_pretty;

const CONF_ENV: &str = "CACHE_BENCH_CONF";
const CONF_FILE: &str = "benches/sweep.json";
const REPORT_FILE: &str = "sweep.json";

fn load_conf() -> Result<SweepConf> {
  if let Ok(path) = env::var(CONF_ENV) {
    return SweepConf::load(Path::new(&path));
  }
  let path = Path::new(CONF_FILE);
  if path.exists() {
    return SweepConf::load(path);
  }
  Ok(SweepConf::default())
}

/// Warmup then timed passes of every workload on every engine of the trial
/// 对试验中每个引擎的每种负载先预热再计时
fn measure(conf: &SweepConf, trial: &mut Trial) -> Result<Vec<BenchMetrics>> {
  let mut li = Vec::new();
  let point = trial.point().clone();

  for (idx, name) in trial.engines().into_iter().enumerate() {
    for &workload in &conf.workloads {
      let label = format!("{point} {name} {workload}");
      let outcome = (|| -> Result<()> {
        for _ in 0..conf.warmup {
          trial.run(idx, workload)?;
        }
        for _ in 0..conf.iterations {
          let start = Instant::now();
          let stats = trial.run(idx, workload)?;
          let elapsed = start.elapsed();
          let m = BenchMetrics::new(name, workload, &point, &stats, elapsed);
          println!(
            "{label:<32}: {:>7} ops, {:>10}, {:>12.0} ops/s",
            m.ops_count,
            format!("{:.2?}", elapsed),
            m.throughput
          );
          li.push(m);
        }
        Ok(())
      })();
      // One failing engine does not hide the others / 单个引擎失败不影响其他引擎
      if let Err(e) = outcome {
        println!("{label:<32}: FAILED {e}");
      }
    }
  }
  Ok(li)
}

fn main() {
  log_init::init();

  let conf = match load_conf() {
    Ok(conf) => conf,
    Err(e) => {
      eprintln!("load config: {e}");
      std::process::exit(1);
    }
  };
  let engines = engines();
  let names: Vec<_> = engines.iter().map(|e| e.name).collect();
  println!("Engines: {}", names.join(", "));
  println!(
    "Sweep: sizes {:?}, profiles {}, warmup {}, iterations {}\n",
    conf.data_sizes,
    conf
      .profiles
      .iter()
      .map(ToString::to_string)
      .collect::<Vec<_>>()
      .join(", "),
    conf.warmup,
    conf.iterations
  );

  let outcomes = sweep(&conf, &engines, |trial| measure(&conf, trial));

  let mut all = Vec::new();
  for outcome in outcomes {
    match outcome.result {
      Ok(li) => all.extend(li),
      Err(e) => println!("{}: FAILED {e}", outcome.point),
    }
  }

  // Save report / 保存报告
  let _ = fs::create_dir_all(&conf.report_dir);
  let report_path = conf.report_dir.join(REPORT_FILE);
  match to_string_pretty(&all) {
    Ok(json) => match fs::write(&report_path, json) {
      Ok(()) => println!("\nReport saved: {}", report_path.display()),
      Err(e) => eprintln!("write {}: {e}", report_path.display()),
    },
    Err(e) => eprintln!("serialize report: {e}"),
  }
}
