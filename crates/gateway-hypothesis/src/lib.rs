//! Significance tests for the marijuana gateway analysis
//!
//! Two procedures are provided. Neither is its textbook counterpart:
//!
//! - [`chi_square_independence`]: a chi-square statistic over the four
//!   counts `[A_yes, A_no, B_yes, B_no]` with expected counts derived from
//!   pooled marginals (each indicator treated as its own group of size N).
//! - [`age_gap_test`]: a one-tailed t-test on the per-respondent age
//!   difference, evaluated with `2N - 2` degrees of freedom.
//!
//! Both deviate from standard practice; callers presenting the results
//! should say so.
//!
//! # Example
//!
//! ```rust
//! use gateway_hypothesis::age_gap_test;
//!
//! let test = age_gap_test(&[3.0, 5.0, 7.0]).unwrap();
//! assert_eq!(test.mean, 5.0);
//! assert_eq!(test.degrees_of_freedom, 4.0);
//! ```

mod age_gap;
mod battery;
mod chi_square;
mod descriptive;
mod types;

pub use age_gap::{age_difference_sample, age_gap_test, age_gap_test_for};
pub use battery::{pairwise_tests, PairwiseTests};
pub use chi_square::{chi_square_independence, pooled_chi_square, PooledCounts};
pub use descriptive::{age_summary, mean_and_median, AgeSummary};
pub use types::{AgeGapTest, ChiSquareDof, ChiSquareTest};
