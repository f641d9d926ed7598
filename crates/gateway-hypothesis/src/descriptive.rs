//! Descriptive statistics of ages at first use

use gateway_core::{Error, Result, Substance, Survey};
use serde::Serialize;
use statrs::statistics::{Data, Median, Statistics};

/// Location of the age-at-first-use distribution of one substance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeSummary {
    pub substance: Substance,
    /// Respondents with a known age
    pub n: usize,
    pub median: f64,
    pub mean: f64,
}

/// `(mean, median)` of a non-empty sample
pub fn mean_and_median(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }
    let mean = values.mean();
    let median = Data::new(values.to_vec()).median();
    Some((mean, median))
}

/// Median and mean age at first use of `substance`, `Never` rows excluded
pub fn age_summary(survey: &Survey, substance: Substance) -> Result<AgeSummary> {
    let ages = survey.known_ages(substance);
    let (mean, median) = mean_and_median(&ages)
        .ok_or_else(|| Error::empty_result(&format!("{} age filter", substance.age_column())))?;
    Ok(AgeSummary {
        substance,
        n: ages.len(),
        median,
        mean,
    })
}
