//! Full report runs over synthetic extracts

mod common;

use approx::assert_relative_eq;
use gateway_stats::{
    codebook, run, run_table, ChiSquareDof, DegeneratePolicy, Error, NullVisualizer, Outcome,
    RawRecord, RawTable, ReportConfig, Substance, SvgVisualizer,
};

fn config_for(path: &std::path::Path) -> ReportConfig {
    ReportConfig::default().with_input(path)
}

#[test]
fn test_report_from_file() {
    let (_dir, path) = common::write_extract(&common::to_tsv(&common::gateway_table()));
    let report = run(&config_for(&path), &NullVisualizer).unwrap();

    assert_eq!(report.rows_loaded, 105);
    assert_eq!(report.rows_kept, 100);
    assert_eq!(report.tried(Substance::Marijuana), Some(40));
    assert_eq!(report.tried(Substance::Cocaine), Some(30));
    assert_eq!(report.tried(Substance::Heroin), Some(0));

    // 12 of the 40 marijuana users also used a hard drug
    assert_relative_eq!(report.overlap_share.unwrap(), 12.0 / 40.0);

    let (substance, marijuana_ages) = &report.ages[0];
    assert_eq!(*substance, Substance::Marijuana);
    assert_relative_eq!(marijuana_ages.done().unwrap().median, 16.0);
    assert!(report.ages[2].1.is_skipped());
}

#[test]
fn test_pairwise_results() {
    let report = run_table(&common::gateway_table(), &ReportConfig::default(), &NullVisualizer)
        .unwrap();
    assert_eq!(report.pairs.len(), 3);

    let cocaine = report.pair(Substance::Cocaine).unwrap();
    let chi = cocaine.chi_square.done().unwrap();
    assert_eq!(chi.observed, [40.0, 60.0, 30.0, 70.0]);
    assert_eq!(chi.expected, [35.0, 65.0, 35.0, 65.0]);
    assert_eq!(chi.degrees_of_freedom, 3.0);

    let gap = cocaine.age_gap.done().unwrap();
    assert_eq!(gap.n, 12);
    assert_relative_eq!(gap.mean, 3.5, epsilon = 1e-12);
    assert_eq!(gap.degrees_of_freedom, 22.0);
    assert!(gap.is_significant(0.05));

    // No heroin users: the chi-square still runs, the age test is skipped
    let heroin = report.pair(Substance::Heroin).unwrap();
    assert!(heroin.chi_square.done().is_some());
    assert!(matches!(heroin.age_gap, Outcome::Skipped(_)));
    assert!(report.skipped_count() >= 4);

    let shares: f64 = cocaine
        .shares
        .iter()
        .filter(|row| row.group == "Yes")
        .map(|row| row.proportion)
        .sum();
    assert_relative_eq!(shares, 1.0, epsilon = 1e-12);
}

#[test]
fn test_degenerate_samples_abort_when_configured() {
    let config = ReportConfig::default().with_on_degenerate(DegeneratePolicy::Abort);
    let result = run_table(&common::gateway_table(), &config, &NullVisualizer);
    assert!(matches!(
        result,
        Err(Error::Survey(gateway_stats::gateway_core::Error::DegenerateSample { .. }))
    ));
}

#[test]
fn test_two_by_two_dof() {
    let config = ReportConfig::default().with_chi_square_dof(ChiSquareDof::TwoByTwo);
    let report = run_table(&common::gateway_table(), &config, &NullVisualizer).unwrap();
    let chi = report
        .pair(Substance::Cocaine)
        .unwrap()
        .chi_square
        .done()
        .unwrap();
    assert_eq!(chi.degrees_of_freedom, 1.0);
    assert_relative_eq!(chi.p_value, 0.13820766697402576, epsilon = 1e-6);
}

#[test]
fn test_display_lists_results_and_caveats() {
    let report = run_table(&common::gateway_table(), &ReportConfig::default(), &NullVisualizer)
        .unwrap();
    let text = report.to_string();

    assert!(text.contains("Rows loaded: 105, kept after cleaning: 100"));
    assert!(text.contains("30.0%"));
    assert!(text.contains("Chi-square MJ vs COC"));
    assert!(text.contains("Age difference MJ vs HER: skipped"));
    assert!(text.contains("2N - 2 degrees of freedom"));
    assert!(text.contains("pooled marginal"));
}

#[test]
fn test_charts_are_written() {
    let (dir, path) = common::write_extract(&common::to_tsv(&common::gateway_table()));
    let charts = dir.path().join("charts");
    let viz = SvgVisualizer::new(&charts).unwrap();

    run(&config_for(&path).with_charts_dir(&charts), &viz).unwrap();
    assert!(viz.path_for("Number of people who tried each drug").exists());
    assert!(viz.path_for("Age of first use: MJAGE").exists());
    assert!(viz.path_for("MJ vs COC age difference").exists());
    assert!(!viz.path_for("MJ vs HER age difference").exists());
}

#[test]
fn test_fatal_errors() {
    let (_dir, path) = common::write_extract("MJEVER\tMJAGE\n1\t15\n");
    assert!(matches!(
        run(&config_for(&path), &NullVisualizer),
        Err(Error::Survey(gateway_stats::gateway_core::Error::SchemaMismatch { .. }))
    ));

    let missing = config_for(std::path::Path::new("/definitely/not/here.tsv"));
    assert!(matches!(
        run(&missing, &NullVisualizer),
        Err(Error::Survey(gateway_stats::gateway_core::Error::Io(_)))
    ));

    let only_bad_rows: gateway_stats::RawTable = common::gateway_table()
        .iter()
        .filter(|row| row.get(gateway_stats::Field::Ever(Substance::Marijuana)) == 94)
        .copied()
        .collect();
    assert!(matches!(
        run_table(&only_bad_rows, &ReportConfig::default(), &NullVisualizer),
        Err(Error::Survey(gateway_stats::gateway_core::Error::EmptyResultSet { .. }))
    ));

    let bad_alpha = config_for(&path).with_significance_level(1.5);
    assert!(matches!(
        run(&bad_alpha, &NullVisualizer),
        Err(Error::InvalidConfig(_))
    ));
}

#[test]
fn test_constant_age_gap_keeps_mean_difference() {
    let never = codebook::AGE_NEVER_USED;
    let (yes, no) = (codebook::EVER_YES, codebook::EVER_NO);
    let mut rows = vec![RawRecord::new([yes, yes, no, no], [15, 20, never, never]); 5];
    rows.extend(vec![RawRecord::new([no; 4], [never; 4]); 5]);
    let table: RawTable = rows.into_iter().collect();

    let dir = tempfile::tempdir().unwrap();
    let viz = SvgVisualizer::new(dir.path()).unwrap();
    let report = run_table(&table, &ReportConfig::default(), &viz).unwrap();

    let cocaine = report.pair(Substance::Cocaine).unwrap();
    assert!(cocaine.age_gap.is_skipped());
    assert_eq!(cocaine.paired, 5);
    assert_relative_eq!(cocaine.mean_age_difference.unwrap(), 5.0);
    assert!(viz.path_for("MJ vs COC age difference").exists());

    let heroin = report.pair(Substance::Heroin).unwrap();
    assert_eq!(heroin.paired, 0);
    assert!(heroin.mean_age_difference.is_none());

    let text = report.to_string();
    assert!(text.contains("Mean age difference MJ vs COC: mean 5.000 (n = 5)"));
    assert!(text.contains("Age difference MJ vs COC: skipped"));
    assert!(text.contains("Mean age difference MJ vs HER: no respondent used both"));
}
