//! Aggregation trait for survey DataFrames

use crate::Result;
use polars::prelude::*;

/// Extension trait for counts and proportions on survey DataFrames
///
/// Key columns may hold strings (`MJEVER`), integers (`DRUGEVER`) or
/// booleans. Grouping and sorting use the native values; the `&str`
/// arguments are matched against each value's string form. Null values are
/// ignored.
pub trait SurveyFrameExt {
    /// Number of rows whose `column` equals `value`
    ///
    /// # Arguments
    /// * `column` - Column name, e.g. `"COCEVER"`
    /// * `value` - Value to match, e.g. `"Yes"`
    fn count_equal(&self, column: &str, value: &str) -> Result<usize>;

    /// Normalized frequency distribution of `measured` within each group of `group`
    ///
    /// # Arguments
    /// * `group` - Grouping column
    /// * `measured` - Column whose distribution is computed per group
    ///
    /// # Returns
    /// DataFrame with columns `[group, measured, "prop", "count"]`, ordered
    /// by group and then by descending proportion. Proportions sum to 1
    /// within each group; groups without observations produce no rows.
    fn group_proportions(&self, group: &str, measured: &str) -> Result<DataFrame>;

    /// Share of rows with `group == group_value` whose `measured` value satisfies `predicate`
    ///
    /// # Returns
    /// `None` when the group is empty
    fn conditional_share<F>(
        &self,
        group: &str,
        group_value: &str,
        measured: &str,
        predicate: F,
    ) -> Result<Option<f64>>
    where
        F: Fn(&str) -> bool;
}
