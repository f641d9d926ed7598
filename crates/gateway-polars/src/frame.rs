//! Conversion of the recoded survey into a DataFrame

use crate::Result;
use gateway_core::{Respondent, Substance, Survey};
use polars::prelude::*;
use tracing::debug;

/// Derived column: number of hard drugs each respondent has used (0..=3)
pub const HARD_DRUG_COUNT: &str = "DRUGEVER";

/// Proportion column of a grouped frame
pub const PROPORTION: &str = "prop";

/// Row-count column of a grouped frame
pub const COUNT: &str = "count";

/// Build a DataFrame with one column per survey field
///
/// `*EVER` columns hold `"Yes"`/`"No"` strings. `*AGE` columns are nullable
/// `UInt32`, with null standing for `Never`. The last column is
/// [`HARD_DRUG_COUNT`].
pub fn survey_frame(survey: &Survey) -> Result<DataFrame> {
    let mut columns: Vec<Column> = Vec::with_capacity(2 * Substance::ALL.len() + 1);

    for substance in Substance::ALL {
        let ever: Vec<&str> = survey.iter().map(|r| r.ever(substance).label()).collect();
        columns.push(Series::new(PlSmallStr::from(substance.ever_column()), ever).into());

        let age: Vec<Option<u32>> = survey
            .iter()
            .map(|r| r.age(substance).years().map(u32::from))
            .collect();
        columns.push(Series::new(PlSmallStr::from(substance.age_column()), age).into());
    }

    let hard_drugs: Vec<u32> = survey.iter().map(Respondent::hard_drug_count).collect();
    columns.push(Series::new(PlSmallStr::from(HARD_DRUG_COUNT), hard_drugs).into());

    let df = DataFrame::new(columns)?;
    debug!(shape = ?df.shape(), "built survey frame");
    Ok(df)
}
