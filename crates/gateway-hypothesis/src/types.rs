//! Result types for the significance tests

use serde::{Deserialize, Serialize};

/// Degrees of freedom used to turn the pooled chi-square statistic into a p-value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChiSquareDof {
    /// Goodness-of-fit over the four observed cells: `k - 1 = 3`
    #[default]
    GoodnessOfFit,
    /// The `(2 - 1) * (2 - 1) = 1` a 2x2 layout implies
    TwoByTwo,
}

impl ChiSquareDof {
    pub fn degrees(self, categories: usize) -> f64 {
        match self {
            Self::GoodnessOfFit => categories.saturating_sub(1) as f64,
            Self::TwoByTwo => 1.0,
        }
    }
}

/// Outcome of the pooled-marginal chi-square procedure
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChiSquareTest {
    /// `[A_yes, A_no, B_yes, B_no]`
    pub observed: [f64; 4],
    /// Expected counts from the pooled marginals, same order as `observed`
    pub expected: [f64; 4],
    /// `Σ (o - e)² / e`
    pub statistic: f64,
    pub degrees_of_freedom: f64,
    /// `1 - CDF_χ²(statistic, degrees_of_freedom)`
    pub p_value: f64,
}

impl ChiSquareTest {
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}

/// Outcome of the one-sample test on an age-difference sample
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeGapTest {
    /// Number of respondents with both ages known
    pub n: usize,
    pub mean: f64,
    /// Sample standard deviation (`N - 1` denominator)
    pub std_dev: f64,
    /// `mean / (std_dev / √N)`
    pub t_statistic: f64,
    /// `2N - 2`
    pub degrees_of_freedom: f64,
    /// One-tailed `1 - CDF_t(t_statistic, degrees_of_freedom)`
    pub p_value: f64,
}

impl AgeGapTest {
    /// `(mean, standard deviation, p-value)`, the triple the report prints
    pub fn summary(&self) -> (f64, f64, f64) {
        (self.mean, self.std_dev, self.p_value)
    }

    pub fn is_significant(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}
