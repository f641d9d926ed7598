//! Chi-square statistic over pooled marginal totals
//!
//! The procedure does not build a joint 2x2 table of (A, B). It places the
//! four marginal counts of two indicators side by side, treats each
//! indicator as its own group of size N and derives expected counts from
//! the pooled yes/no totals:
//!
//! ```text
//!              yes      no      total
//! A            A_yes    A_no    N
//! B            B_yes    B_no    N
//! total        Y        M       2N
//!
//! e(A_yes) = N * Y / 2N, e(A_no) = N * M / 2N, and likewise for B
//! ```

use crate::{ChiSquareDof, ChiSquareTest};
use gateway_core::{Error, EverUsed, Result, Substance, Survey};
use statrs::distribution::{ChiSquared, ContinuousCDF};
use tracing::{debug, instrument};

/// Marginal yes/no counts of two indicators over the same N respondents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PooledCounts {
    pub a_yes: usize,
    pub a_no: usize,
    pub b_yes: usize,
    pub b_no: usize,
    /// Table length, used as the row total for both indicators
    pub n: usize,
}

impl PooledCounts {
    pub fn from_survey(survey: &Survey, a: Substance, b: Substance) -> Self {
        Self {
            a_yes: survey.count_ever(a, EverUsed::Yes),
            a_no: survey.count_ever(a, EverUsed::No),
            b_yes: survey.count_ever(b, EverUsed::Yes),
            b_no: survey.count_ever(b, EverUsed::No),
            n: survey.len(),
        }
    }

    /// `[A_yes, A_no, B_yes, B_no]`
    pub fn observed(&self) -> [f64; 4] {
        [
            self.a_yes as f64,
            self.a_no as f64,
            self.b_yes as f64,
            self.b_no as f64,
        ]
    }

    /// Expected counts from the pooled marginals, in `observed` order
    pub fn expected(&self) -> [f64; 4] {
        let row_total = self.n as f64;
        let grand_total = (2 * self.n) as f64;
        let total_yes = (self.a_yes + self.b_yes) as f64;
        let total_no = (self.a_no + self.b_no) as f64;

        let e_yes = (row_total * total_yes) / grand_total;
        let e_no = (row_total * total_no) / grand_total;
        [e_yes, e_no, e_yes, e_no]
    }
}

/// Run the pooled chi-square procedure on precomputed counts
///
/// # Errors
///
/// [`Error::EmptyResultSet`] when `n == 0`, [`Error::DegenerateSample`]
/// when an expected count is zero (every respondent answered the same way
/// on both indicators).
pub fn pooled_chi_square(counts: &PooledCounts, dof: ChiSquareDof) -> Result<ChiSquareTest> {
    if counts.n == 0 {
        return Err(Error::empty_result("chi-square input"));
    }

    let observed = counts.observed();
    let expected = counts.expected();
    if expected.iter().any(|&e| e <= 0.0) {
        return Err(Error::degenerate(
            "an expected count is zero, the statistic is undefined",
        ));
    }

    let statistic = observed
        .iter()
        .zip(&expected)
        .map(|(&o, &e)| {
            let d = o - e;
            d * d / e
        })
        .sum::<f64>();

    let degrees_of_freedom = dof.degrees(observed.len());
    let distribution = ChiSquared::new(degrees_of_freedom).map_err(|e| {
        Error::InvalidParameter(format!("Failed to create chi-square distribution: {e}"))
    })?;
    let p_value = 1.0 - distribution.cdf(statistic);

    Ok(ChiSquareTest {
        observed,
        expected,
        statistic,
        degrees_of_freedom,
        p_value,
    })
}

/// Pooled chi-square test of the "ever used" indicators of `a` and `b`
#[instrument(skip(survey), fields(n = survey.len()))]
pub fn chi_square_independence(
    survey: &Survey,
    a: Substance,
    b: Substance,
    dof: ChiSquareDof,
) -> Result<ChiSquareTest> {
    let counts = PooledCounts::from_survey(survey, a, b);
    let test = pooled_chi_square(&counts, dof)?;
    debug!(statistic = test.statistic, p_value = test.p_value, "chi-square computed");
    Ok(test)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use gateway_core::{AgeAtFirstUse, Respondent};

    fn worked_example() -> PooledCounts {
        PooledCounts {
            a_yes: 40,
            a_no: 60,
            b_yes: 30,
            b_no: 70,
            n: 100,
        }
    }

    #[test]
    fn test_expected_counts_from_pooled_marginals() {
        let counts = worked_example();
        assert_eq!(counts.observed(), [40.0, 60.0, 30.0, 70.0]);
        assert_eq!(counts.expected(), [35.0, 65.0, 35.0, 65.0]);
    }

    #[test]
    fn test_statistic_matches_direct_recomputation() {
        let test = pooled_chi_square(&worked_example(), ChiSquareDof::GoodnessOfFit).unwrap();

        let direct = (40.0f64 - 35.0).powi(2) / 35.0
            + (60.0f64 - 65.0).powi(2) / 65.0
            + (30.0f64 - 35.0).powi(2) / 35.0
            + (70.0f64 - 65.0).powi(2) / 65.0;
        assert_relative_eq!(test.statistic, direct, epsilon = 1e-12);
        assert_relative_eq!(test.statistic, 2.197802197802198, epsilon = 1e-12);
    }

    #[test]
    fn test_p_value_depends_on_dof_choice() {
        let fit = pooled_chi_square(&worked_example(), ChiSquareDof::GoodnessOfFit).unwrap();
        assert_eq!(fit.degrees_of_freedom, 3.0);
        assert_relative_eq!(fit.p_value, 0.5323813994386946, epsilon = 1e-6);

        let two_by_two = pooled_chi_square(&worked_example(), ChiSquareDof::TwoByTwo).unwrap();
        assert_eq!(two_by_two.degrees_of_freedom, 1.0);
        assert_relative_eq!(two_by_two.p_value, 0.13820766697402576, epsilon = 1e-6);

        let direct = 1.0 - ChiSquared::new(1.0).unwrap().cdf(two_by_two.statistic);
        assert_eq!(two_by_two.p_value, direct);
    }

    #[test]
    fn test_identical_marginals_give_zero_statistic() {
        let counts = PooledCounts {
            a_yes: 25,
            a_no: 75,
            b_yes: 25,
            b_no: 75,
            n: 100,
        };
        let test = pooled_chi_square(&counts, ChiSquareDof::default()).unwrap();
        assert_eq!(test.statistic, 0.0);
        assert_relative_eq!(test.p_value, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_and_degenerate_inputs() {
        let empty = PooledCounts {
            a_yes: 0,
            a_no: 0,
            b_yes: 0,
            b_no: 0,
            n: 0,
        };
        assert!(matches!(
            pooled_chi_square(&empty, ChiSquareDof::default()),
            Err(Error::EmptyResultSet { .. })
        ));

        let nobody_used = PooledCounts {
            a_yes: 0,
            a_no: 10,
            b_yes: 0,
            b_no: 10,
            n: 10,
        };
        assert!(matches!(
            pooled_chi_square(&nobody_used, ChiSquareDof::default()),
            Err(Error::DegenerateSample { .. })
        ));
    }

    #[test]
    fn test_counts_from_survey() {
        use AgeAtFirstUse::{Never, Years};
        use EverUsed::{No, Yes};

        let survey: Survey = vec![
            Respondent::new([Yes, Yes, No, No], [Years(15), Years(19), Never, Never]),
            Respondent::new([Yes, No, No, No], [Years(16), Never, Never, Never]),
            Respondent::new([No, No, No, No], [Never; 4]),
        ]
        .into_iter()
        .collect();

        let counts = PooledCounts::from_survey(&survey, Substance::Marijuana, Substance::Cocaine);
        assert_eq!(
            counts,
            PooledCounts {
                a_yes: 2,
                a_no: 1,
                b_yes: 1,
                b_no: 2,
                n: 3,
            }
        );
    }
}
