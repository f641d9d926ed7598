//! One-sample test on the age difference between first uses

use crate::AgeGapTest;
use gateway_core::{Error, Result, Substance, Survey};
use statrs::distribution::{ContinuousCDF, StudentsT};
use statrs::statistics::Statistics;
use tracing::{debug, instrument};

/// `age(other) - age(base)` for every respondent with both ages known
///
/// Respondents with either age `Never` are excluded, so the sample length
/// equals the number of fully paired rows.
pub fn age_difference_sample(survey: &Survey, base: Substance, other: Substance) -> Vec<f64> {
    survey
        .iter()
        .filter_map(|r| r.age_gap(base, other))
        .collect()
}

/// One-tailed test that the mean age difference exceeds zero
///
/// The statistic is `mean / (sd / √N)` with the sample standard deviation,
/// and the p-value is `1 - CDF_t(t)` evaluated at `2N - 2` degrees of
/// freedom. A conventional one-sample test would use `N - 1`.
///
/// # Errors
///
/// [`Error::DegenerateSample`] when fewer than two values are given or the
/// values are all identical, since the statistic divides by the standard
/// deviation.
pub fn age_gap_test(sample: &[f64]) -> Result<AgeGapTest> {
    let n = sample.len();
    if n < 2 {
        return Err(Error::degenerate(format!(
            "need at least 2 paired ages, got {n}"
        )));
    }

    let mean = sample.mean();
    let std_dev = sample.std_dev();
    if !std_dev.is_finite() || std_dev == 0.0 {
        return Err(Error::degenerate(format!(
            "standard deviation is {std_dev}, the t statistic is undefined"
        )));
    }

    let t_statistic = mean / (std_dev / (n as f64).sqrt());
    let degrees_of_freedom = (2 * n - 2) as f64;
    let distribution = StudentsT::new(0.0, 1.0, degrees_of_freedom).map_err(|e| {
        Error::InvalidParameter(format!("Failed to create t-distribution: {e}"))
    })?;
    let p_value = 1.0 - distribution.cdf(t_statistic);

    Ok(AgeGapTest {
        n,
        mean,
        std_dev,
        t_statistic,
        degrees_of_freedom,
        p_value,
    })
}

/// Build the age-difference sample for `(base, other)` and test it
#[instrument(skip(survey), fields(rows = survey.len()))]
pub fn age_gap_test_for(survey: &Survey, base: Substance, other: Substance) -> Result<AgeGapTest> {
    let sample = age_difference_sample(survey, base, other);
    debug!(paired = sample.len(), "built age-difference sample");
    age_gap_test(&sample)
}
