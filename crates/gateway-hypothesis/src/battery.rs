//! Both tests for a base substance against each comparison substance

use crate::{age_gap_test_for, chi_square_independence, AgeGapTest, ChiSquareDof, ChiSquareTest};
use gateway_core::{Result, Substance, Survey};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{info, instrument};

/// Results for one `(base, other)` pair
///
/// Each test fails independently, so a degenerate age sample does not
/// hide a valid chi-square result.
#[derive(Debug)]
pub struct PairwiseTests {
    pub base: Substance,
    pub other: Substance,
    pub chi_square: Result<ChiSquareTest>,
    pub age_gap: Result<AgeGapTest>,
}

fn run_pair(survey: &Survey, base: Substance, other: Substance, dof: ChiSquareDof) -> PairwiseTests {
    PairwiseTests {
        base,
        other,
        chi_square: chi_square_independence(survey, base, other, dof),
        age_gap: age_gap_test_for(survey, base, other),
    }
}

/// Run the chi-square and age-gap tests of `base` against every substance in `others`
///
/// Results come back in the order of `others`. With the `parallel` feature
/// the pairs are evaluated on the rayon pool; the survey is only read.
#[instrument(skip(survey), fields(rows = survey.len()))]
pub fn pairwise_tests(
    survey: &Survey,
    base: Substance,
    others: &[Substance],
    dof: ChiSquareDof,
) -> Vec<PairwiseTests> {
    #[cfg(feature = "parallel")]
    let results: Vec<_> = others
        .par_iter()
        .map(|&other| run_pair(survey, base, other, dof))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let results: Vec<_> = others
        .iter()
        .map(|&other| run_pair(survey, base, other, dof))
        .collect();

    info!(pairs = results.len(), "pairwise tests finished");
    results
}
