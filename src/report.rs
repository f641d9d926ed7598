//! End-to-end survey report

use crate::{DegeneratePolicy, ReportConfig, Result};
use gateway_core::{Error as SurveyError, RawTable, Substance, Survey};
use gateway_hypothesis::{
    age_difference_sample, age_summary, mean_and_median, pairwise_tests, AgeGapTest, AgeSummary, ChiSquareDof,
    ChiSquareTest,
};
use gateway_polars::{proportion_rows, survey_frame, ProportionRow, SurveyFrameExt, HARD_DRUG_COUNT};
use gateway_survey::{clean, load_tsv, recode};
use gateway_viz::{Marker, ShareBar, SurveyVisualizer};
use polars::prelude::DataFrame;
use std::fmt;
use tracing::{info, instrument, warn};

const YES: &str = "Yes";

/// Result of one analysis step that may be skipped
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Done(T),
    /// The step could not run; holds the reason
    Skipped(String),
}

impl<T> Outcome<T> {
    pub fn done(&self) -> Option<&T> {
        match self {
            Outcome::Done(value) => Some(value),
            Outcome::Skipped(_) => None,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Outcome::Skipped(_))
    }
}

/// Marijuana compared with one hard drug
#[derive(Debug, Clone, PartialEq)]
pub struct PairReport {
    pub other: Substance,
    /// Distribution of `other`'s ever-used answer within each `MJEVER` group
    pub shares: Vec<ProportionRow>,
    pub chi_square: Outcome<ChiSquareTest>,
    /// Respondents with both ages known
    pub paired: usize,
    /// Mean of `age(other) - age(marijuana)`, `None` without paired rows
    pub mean_age_difference: Option<f64>,
    pub age_gap: Outcome<AgeGapTest>,
}

/// Everything the survey report computes
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub rows_loaded: usize,
    pub rows_kept: usize,
    /// Respondents who tried each substance
    pub tried: Vec<(Substance, usize)>,
    pub ages: Vec<(Substance, Outcome<AgeSummary>)>,
    /// Distribution of the hard-drug count within each `MJEVER` group
    pub hard_drug_shares: Vec<ProportionRow>,
    /// Share of marijuana users who also used at least one hard drug
    pub overlap_share: Option<f64>,
    pub pairs: Vec<PairReport>,
    pub significance_level: f64,
    pub chi_square_dof: ChiSquareDof,
}

/// Load `config.input` and run the report on it
#[instrument(skip_all, fields(input = %config.input.display()))]
pub fn run(config: &ReportConfig, viz: &dyn SurveyVisualizer) -> Result<Report> {
    config.validate()?;
    let raw = load_tsv(&config.input)?;
    run_table(&raw, config, viz)
}

/// Run the report on an already loaded table
///
/// Schema, parse and cleaning failures abort. Degenerate test samples follow
/// `config.on_degenerate`.
pub fn run_table(raw: &RawTable, config: &ReportConfig, viz: &dyn SurveyVisualizer) -> Result<Report> {
    let cleaned = clean(raw, &config.cleaning)?;
    let survey = recode(&cleaned)?;
    let frame = survey_frame(&survey)?;
    info!(rows_loaded = raw.len(), rows_kept = survey.len(), "survey prepared");

    let tried = tried_counts(&frame, viz)?;
    let ages = age_summaries(&survey, config, viz)?;

    let hard_drug_shares = proportion_rows(
        &frame.group_proportions(Substance::Marijuana.ever_column(), HARD_DRUG_COUNT)?,
        Substance::Marijuana.ever_column(),
        HARD_DRUG_COUNT,
    )?;
    viz.record_shares(
        &format!("{HARD_DRUG_COUNT} by {}", Substance::Marijuana.ever_column()),
        &share_bars(&hard_drug_shares),
    )?;
    let overlap_share = frame.conditional_share(
        Substance::Marijuana.ever_column(),
        YES,
        HARD_DRUG_COUNT,
        |count| count != "0",
    )?;

    let pairs = pair_reports(&survey, &frame, config, viz)?;

    let report = Report {
        rows_loaded: raw.len(),
        rows_kept: survey.len(),
        tried,
        ages,
        hard_drug_shares,
        overlap_share,
        pairs,
        significance_level: config.significance_level,
        chi_square_dof: config.chi_square_dof,
    };
    info!(skipped = report.skipped_count(), "report finished");
    Ok(report)
}

/// Keep a test result, or turn a degenerate sample into a skip when allowed
fn settle<T>(result: gateway_core::Result<T>, policy: DegeneratePolicy, what: &str) -> Result<Outcome<T>> {
    match result {
        Ok(value) => Ok(Outcome::Done(value)),
        Err(err) if err.is_recoverable() && policy == DegeneratePolicy::Skip => {
            warn!(test = what, reason = %err, "skipping test");
            Ok(Outcome::Skipped(err.to_string()))
        }
        Err(err) => Err(err.into()),
    }
}

fn tried_counts(frame: &DataFrame, viz: &dyn SurveyVisualizer) -> Result<Vec<(Substance, usize)>> {
    let tried = Substance::ALL
        .into_iter()
        .map(|s| -> Result<(Substance, usize)> { Ok((s, frame.count_equal(s.ever_column(), YES)?)) })
        .collect::<Result<Vec<_>>>()?;

    let bars: Vec<(String, usize)> = tried
        .iter()
        .map(|(s, n)| (s.short_label().to_string(), *n))
        .collect();
    viz.record_counts("Number of people who tried each drug", &bars)?;
    Ok(tried)
}

fn age_summaries(
    survey: &Survey,
    config: &ReportConfig,
    viz: &dyn SurveyVisualizer,
) -> Result<Vec<(Substance, Outcome<AgeSummary>)>> {
    let mut ages = Vec::with_capacity(Substance::ALL.len());
    for substance in Substance::ALL {
        let outcome = match age_summary(survey, substance) {
            Ok(summary) => {
                viz.record_distribution(
                    &format!("Age of first use: {}", substance.age_column()),
                    &survey.known_ages(substance),
                    Some(Marker::Median(summary.median)),
                    Some(config.age_bins),
                )?;
                Outcome::Done(summary)
            }
            // Nobody reported an age for this substance
            Err(err @ SurveyError::EmptyResultSet { .. }) => {
                warn!(substance = %substance, reason = %err, "no ages at first use");
                Outcome::Skipped(err.to_string())
            }
            Err(err) => return Err(err.into()),
        };
        ages.push((substance, outcome));
    }
    Ok(ages)
}

fn pair_reports(
    survey: &Survey,
    frame: &DataFrame,
    config: &ReportConfig,
    viz: &dyn SurveyVisualizer,
) -> Result<Vec<PairReport>> {
    let base = Substance::Marijuana;
    let tests = pairwise_tests(survey, base, &Substance::HARD_DRUGS, config.chi_square_dof);

    let mut pairs = Vec::with_capacity(tests.len());
    for test in tests {
        let other = test.other;
        let shares = proportion_rows(
            &frame.group_proportions(base.ever_column(), other.ever_column())?,
            base.ever_column(),
            other.ever_column(),
        )?;
        viz.record_shares(
            &format!("{} by {}", other.ever_column(), base.ever_column()),
            &share_bars(&shares),
        )?;

        let label = format!("{} vs {}", base.short_label(), other.short_label());
        let chi_square = settle(test.chi_square, config.on_degenerate, &format!("chi-square {label}"))?;
        let age_gap = settle(test.age_gap, config.on_degenerate, &format!("age gap {label}"))?;

        // Drawn even when the t test is skipped
        let sample = age_difference_sample(survey, base, other);
        let mean_age_difference = mean_and_median(&sample).map(|(mean, _)| mean);
        if let Some(mean) = mean_age_difference {
            viz.record_distribution(
                &format!("{label} age difference"),
                &sample,
                Some(Marker::Mean(mean)),
                None,
            )?;
        }

        pairs.push(PairReport {
            other,
            shares,
            chi_square,
            paired: sample.len(),
            mean_age_difference,
            age_gap,
        });
    }
    Ok(pairs)
}

fn share_bars(rows: &[ProportionRow]) -> Vec<ShareBar> {
    rows.iter()
        .map(|row| ShareBar {
            group: row.group.clone(),
            series: row.value.clone(),
            proportion: row.proportion,
        })
        .collect()
}

impl Report {
    pub fn pair(&self, other: Substance) -> Option<&PairReport> {
        self.pairs.iter().find(|p| p.other == other)
    }

    pub fn tried(&self, substance: Substance) -> Option<usize> {
        self.tried
            .iter()
            .find(|(s, _)| *s == substance)
            .map(|(_, n)| *n)
    }

    /// Number of analyses reported as skipped
    pub fn skipped_count(&self) -> usize {
        let ages = self.ages.iter().filter(|(_, a)| a.is_skipped()).count();
        let tests = self
            .pairs
            .iter()
            .map(|p| usize::from(p.chi_square.is_skipped()) + usize::from(p.age_gap.is_skipped()))
            .sum::<usize>();
        ages + tests
    }
}

fn verdict(significant: bool) -> &'static str {
    if significant {
        "significant"
    } else {
        "not significant"
    }
}

fn write_shares(f: &mut fmt::Formatter<'_>, rows: &[ProportionRow]) -> fmt::Result {
    for row in rows {
        writeln!(
            f,
            "    {:<4} {:>4}  {:>7.4}  (n = {})",
            row.group, row.value, row.proportion, row.count
        )?;
    }
    Ok(())
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mj = Substance::Marijuana;
        writeln!(f, "Marijuana as a gateway drug: NSDUH 2018")?;
        writeln!(
            f,
            "Rows loaded: {}, kept after cleaning: {}",
            self.rows_loaded, self.rows_kept
        )?;

        writeln!(f, "\nNumber of people who tried each drug")?;
        for (substance, n) in &self.tried {
            writeln!(f, "  {:<16} {n}", substance.to_string())?;
        }

        writeln!(f, "\nMedian age of first use")?;
        for (substance, outcome) in &self.ages {
            match outcome {
                Outcome::Done(a) => writeln!(
                    f,
                    "  {:<10} median {:.1}, mean {:.2} (n = {})",
                    substance.age_column(),
                    a.median,
                    a.mean,
                    a.n
                )?,
                Outcome::Skipped(reason) => {
                    writeln!(f, "  {:<10} skipped: {reason}", substance.age_column())?
                }
            }
        }

        writeln!(f, "\n{HARD_DRUG_COUNT} proportions by {}", mj.ever_column())?;
        write_shares(f, &self.hard_drug_shares)?;
        match self.overlap_share {
            Some(share) => writeln!(
                f,
                "  Marijuana users who also used at least one hard drug: {:.1}%",
                share * 100.0
            )?,
            None => writeln!(f, "  No marijuana users in the cleaned extract")?,
        }

        let alpha = self.significance_level;
        for pair in &self.pairs {
            let label = format!("{} vs {}", mj.short_label(), pair.other.short_label());
            writeln!(f, "\n{} proportions by {}", pair.other.ever_column(), mj.ever_column())?;
            write_shares(f, &pair.shares)?;

            match &pair.chi_square {
                Outcome::Done(t) => writeln!(
                    f,
                    "  Chi-square {label}: statistic {:.4}, df {}, p = {:.4e} ({} at alpha {alpha})",
                    t.statistic,
                    t.degrees_of_freedom,
                    t.p_value,
                    verdict(t.is_significant(alpha))
                )?,
                Outcome::Skipped(reason) => writeln!(f, "  Chi-square {label}: skipped: {reason}")?,
            }
            match pair.mean_age_difference {
                Some(mean) => writeln!(
                    f,
                    "  Mean age difference {label}: mean {mean:.3} (n = {})",
                    pair.paired
                )?,
                None => writeln!(f, "  Mean age difference {label}: no respondent used both")?,
            }
            match &pair.age_gap {
                Outcome::Done(t) => {
                    let (mean, sd, p) = t.summary();
                    writeln!(
                        f,
                        "  Age difference {label}: mean {mean:.3}, sd {sd:.3}, n {}, t {:.3}, df {}, p = {p:.4e} ({} at alpha {alpha})",
                        t.n,
                        t.t_statistic,
                        t.degrees_of_freedom,
                        verdict(t.is_significant(alpha))
                    )?
                }
                Outcome::Skipped(reason) => {
                    writeln!(f, "  Age difference {label}: skipped: {reason}")?
                }
            }
        }

        writeln!(f, "\nMethodology")?;
        let dof = match self.chi_square_dof {
            ChiSquareDof::GoodnessOfFit => "3 (goodness of fit over the four cells)",
            ChiSquareDof::TwoByTwo => "1 (2x2 layout)",
        };
        writeln!(
            f,
            "  The chi-square compares the pooled marginal yes/no totals of the two\n  \
             indicators, not a joint 2x2 contingency table; df = {dof}."
        )?;
        writeln!(
            f,
            "  The age-difference test is one-tailed on mean / (sd / sqrt(N)) with\n  \
             2N - 2 degrees of freedom instead of the usual N - 1."
        )?;
        write!(
            f,
            "  Cleaning does not check that a \"No\" answer comes with a Never age."
        )
    }
}
