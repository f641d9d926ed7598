//! Group-wise counts and proportions

use crate::{Error, Result, SurveyFrameExt, COUNT, PROPORTION};
use polars::prelude::*;
use tracing::debug;

/// One row of a [`SurveyFrameExt::group_proportions`] frame
#[derive(Debug, Clone, PartialEq)]
pub struct ProportionRow {
    pub group: String,
    pub value: String,
    pub proportion: f64,
    pub count: u64,
}

fn lookup<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name)
        .map_err(|_| Error::InvalidColumn(name.to_string()))
}

/// Check that `name` exists and holds discrete values usable as a key
fn check_key(df: &DataFrame, name: &str) -> Result<()> {
    match lookup(df, name)?.dtype() {
        DataType::String
        | DataType::UInt32
        | DataType::UInt64
        | DataType::Int32
        | DataType::Int64
        | DataType::Boolean => Ok(()),
        dt => Err(Error::TypeMismatch {
            expected: "string, integer or boolean".to_string(),
            got: format!("{:?}", dt),
        }),
    }
}

/// Rows of `measured` per distinct `(group, measured)` pair, nulls dropped
fn pair_counts(df: &DataFrame, group: &str, measured: &str) -> LazyFrame {
    df.clone()
        .lazy()
        .filter(col(group).is_not_null().and(col(measured).is_not_null()))
        .group_by([col(group), col(measured)])
        .agg([len().cast(DataType::UInt64).alias(COUNT)])
}

/// String view of a key column, for matching and display
fn text_column(df: &DataFrame, name: &str) -> Result<StringChunked> {
    let cast = lookup(df, name)?.cast(&DataType::String)?;
    Ok(cast.str()?.clone())
}

impl SurveyFrameExt for DataFrame {
    fn count_equal(&self, column: &str, value: &str) -> Result<usize> {
        check_key(self, column)?;
        let counted = self
            .clone()
            .lazy()
            .filter(col(column).cast(DataType::String).eq(lit(value)))
            .select([len().cast(DataType::UInt64).alias(COUNT)])
            .collect()?;
        let n = counted.column(COUNT)?.u64()?.get(0).unwrap_or(0);
        Ok(n as usize)
    }

    fn group_proportions(&self, group: &str, measured: &str) -> Result<DataFrame> {
        check_key(self, group)?;
        check_key(self, measured)?;

        let group_total = col(COUNT).sum().over([col(group)]);
        let props = pair_counts(self, group, measured)
            .with_column(
                (col(COUNT).cast(DataType::Float64) / group_total.cast(DataType::Float64))
                    .alias(PROPORTION),
            )
            // value_counts order: most frequent first, ties by value
            .sort_by_exprs(
                [col(group), col(COUNT), col(measured)],
                SortMultipleOptions::default().with_order_descending_multi([false, true, false]),
            )
            .select([col(group), col(measured), col(PROPORTION), col(COUNT)])
            .collect()?;

        debug!(group, measured, rows = props.height(), "computed group proportions");
        Ok(props)
    }

    fn conditional_share<F>(
        &self,
        group: &str,
        group_value: &str,
        measured: &str,
        predicate: F,
    ) -> Result<Option<f64>>
    where
        F: Fn(&str) -> bool,
    {
        check_key(self, group)?;
        check_key(self, measured)?;

        let in_group = self
            .clone()
            .lazy()
            .filter(col(group).cast(DataType::String).eq(lit(group_value)))
            .collect()?;
        let counts = pair_counts(&in_group, group, measured).collect()?;

        let values = text_column(&counts, measured)?;
        let tallies = counts.column(COUNT)?.u64()?;
        let mut total = 0u64;
        let mut matching = 0u64;
        for (value, count) in values.into_iter().zip(tallies.into_iter()) {
            let (Some(value), Some(count)) = (value, count) else {
                continue;
            };
            total += count;
            if predicate(value) {
                matching += count;
            }
        }

        if total == 0 {
            return Ok(None);
        }
        Ok(Some(matching as f64 / total as f64))
    }
}

/// Read a [`SurveyFrameExt::group_proportions`] frame back into typed rows
pub fn proportion_rows(df: &DataFrame, group: &str, measured: &str) -> Result<Vec<ProportionRow>> {
    let groups = text_column(df, group)?;
    let values = text_column(df, measured)?;
    let props = lookup(df, PROPORTION)?.f64()?;
    let counts = lookup(df, COUNT)?.u64()?;

    let rows = (0..df.height())
        .filter_map(|i| {
            Some(ProportionRow {
                group: groups.get(i)?.to_string(),
                value: values.get(i)?.to_string(),
                proportion: props.get(i)?,
                count: counts.get(i)?,
            })
        })
        .collect();
    Ok(rows)
}
