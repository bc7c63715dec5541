#[static_init::constructor(0)]
extern "C" fn _log_init() {
  log_init::init();
}

mod profile_prop {
  use cache_bench_data::{FILLER, ValueProfile};
  use proptest::prelude::*;

  proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// LINES_n holds exactly n newline terminated template lines in index order
    /// LINES_n 恰好包含 n 行按索引排序的模板行
    #[test]
    fn prop_lines_shape(amount in 1usize..2000) {
      let p = ValueProfile::lines(amount).unwrap();
      let base = p.base_value();

      prop_assert!(base.ends_with('\n'));
      let lines: Vec<&str> = base.lines().collect();
      prop_assert_eq!(lines.len(), amount);
      prop_assert_eq!(base.matches('\n').count(), amount);

      for (i, line) in lines.iter().enumerate() {
        let expect = format!("benchmark-value-line-{i:04} :: lorem ipsum data");
        prop_assert_eq!(*line, expect.as_str());
      }
      prop_assert!(p.estimated_size() >= base.len());
    }

    /// BYTES_n is n filler characters / BYTES_n 为 n 个填充字符
    #[test]
    fn prop_bytes_shape(amount in 1usize..10_000) {
      let p = ValueProfile::bytes(amount).unwrap();
      prop_assert_eq!(p.base_value().len(), amount);
      prop_assert!(p.base_value().chars().all(|c| c == FILLER));
      prop_assert_eq!(p.estimated_size(), amount + 24);
    }

    /// Parsing is case-insensitive and deterministic / 解析不区分大小写且确定
    #[test]
    fn prop_parse_matches_constructor(amount in 1usize..500, upper in any::<bool>()) {
      let lines = if upper { format!("LINES_{amount}") } else { format!("lines_{amount}") };
      let bytes = if upper { format!("BYTES_{amount}") } else { format!("bytes_{amount}") };

      let parsed = ValueProfile::parse(&lines).unwrap();
      let direct = ValueProfile::lines(amount).unwrap();
      prop_assert_eq!(parsed.base_value(), direct.base_value());
      prop_assert_eq!(&parsed, &direct);

      let parsed = ValueProfile::parse(&bytes).unwrap();
      let direct = ValueProfile::bytes(amount).unwrap();
      prop_assert_eq!(parsed.base_value(), direct.base_value());
    }

    /// Negative or garbage amounts never parse / 负数或非法数量无法解析
    #[test]
    fn prop_parse_rejects(n in i64::MIN..=0, junk in "[a-hj-xzA-HJ-XZ]{1,8}") {
      let neg_lines = format!("LINES_{n}");
      let junk_bytes = format!("BYTES_{junk}");
      let junk_kind = format!("{junk}_10");
      prop_assert!(ValueProfile::parse(&neg_lines).is_err());
      prop_assert!(ValueProfile::parse(&junk_bytes).is_err());
      prop_assert!(ValueProfile::parse(&junk_kind).is_err());
    }
  }
}

mod generator_prop {
  use cache_bench_data::{MAX_SAMPLES, ValueProfile};
  use proptest::prelude::*;

  proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Sample count stays in [1, 256] and lookups cycle
    /// 样本数在 [1, 256] 内且查找循环
    #[test]
    fn prop_generator_cyclic(max_unique in 0usize..1000, idx in 0usize..1_000_000) {
      let p = ValueProfile::bytes(8).unwrap();
      let g = p.generator(max_unique);
      let count = g.count();

      prop_assert!((1..=MAX_SAMPLES).contains(&count));
      prop_assert_eq!(count, max_unique.clamp(1, MAX_SAMPLES));
      prop_assert_eq!(g.value_at(idx), g.value_at(idx + count));
      prop_assert!(g.value_at(idx).starts_with(p.base_value()));
    }
  }
}

mod parse_dataset {
  use aok::{OK, Void};
  use cache_bench_data::{Dataset, Error, KvSource, PREFIXED_PAD, ValueMode, ValueProfile};
  use log::info;

  #[test]
  fn test_invalid_profiles() {
    for spec in ["", "LINES_", "LINES_-5", "FOO_10", " LINES_10\n", "BYTES_8 "] {
      assert!(
        matches!(ValueProfile::parse(spec), Err(Error::InvalidSpec(_))),
        "{spec:?}"
      );
    }
  }

  #[test]
  fn test_serde_string() -> Void {
    let p = ValueProfile::parse("lines_10")?;
    let json = sonic_rs::to_string(&p)?;
    assert_eq!(json, "\"LINES_10\"");
    let back: ValueProfile = sonic_rs::from_str(&json)?;
    assert_eq!(back, p);
    assert!(sonic_rs::from_str::<ValueProfile>("\"FOO_1\"").is_err());
    OK
  }

  #[test]
  fn test_dataset_keys() -> Void {
    let p = ValueProfile::parse("LINES_10")?;
    let d = Dataset::new(1000, &p, ValueMode::Unique);
    assert_eq!(d.len(), 1000);
    for i in [0, 1, 999] {
      assert_eq!(d.key(i), format!("key_{i}").as_bytes());
      assert_eq!(d.val_str(i), p.value_for_index(i));
    }
    info!("dataset {} bytes", d.stats().total_bytes());
    OK
  }

  #[test]
  fn test_prefixed_mode() -> Void {
    let p = ValueProfile::parse("BYTES_1024")?;
    let d = Dataset::new(10000, &p, ValueMode::prefixed());
    assert_eq!(d.val_str(42), format!("value_42_{}", "x".repeat(PREFIXED_PAD)));
    let stats = d.stats();
    assert_eq!(stats.min_val_size, "value_0_".len() + PREFIXED_PAD);
    assert_eq!(stats.max_val_size, "value_9999_".len() + PREFIXED_PAD);

    let mode: ValueMode = sonic_rs::from_str(r#"{"mode":"prefixed","pad":100}"#)?;
    assert_eq!(mode, ValueMode::prefixed());
    OK
  }
}
