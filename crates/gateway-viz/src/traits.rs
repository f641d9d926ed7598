//! Visualization interface for the survey report
//!
//! The report calls these methods as it computes each aggregate, so a
//! visualizer sees the same numbers that end up in the printed summary.

use gateway_core::Result;

/// Vertical reference line drawn over a histogram
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Marker {
    Median(f64),
    Mean(f64),
}

impl Marker {
    pub fn value(&self) -> f64 {
        match *self {
            Marker::Median(v) | Marker::Mean(v) => v,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Marker::Median(_) => "median",
            Marker::Mean(_) => "mean",
        }
    }
}

/// One bar of a grouped proportion chart
#[derive(Debug, Clone, PartialEq)]
pub struct ShareBar {
    /// Group on the x axis, e.g. the `MJEVER` answer
    pub group: String,
    /// Series within the group, e.g. the `DRUGEVER` value
    pub series: String,
    pub proportion: f64,
}

/// Trait for recording the charts of the survey report
pub trait SurveyVisualizer {
    /// Record a bar chart of counts per category
    fn record_counts(&self, title: &str, counts: &[(String, usize)]) -> Result<()>;

    /// Record a histogram of `values` split into `bins` bins
    ///
    /// `bins` of `None` lets the visualizer pick the bin count
    /// ([`crate::freedman_diaconis_bins`]).
    fn record_distribution(
        &self,
        title: &str,
        values: &[f64],
        marker: Option<Marker>,
        bins: Option<usize>,
    ) -> Result<()>;

    /// Record grouped bars of proportions
    fn record_shares(&self, title: &str, bars: &[ShareBar]) -> Result<()>;

    /// Check if this visualizer actually produces output
    fn is_enabled(&self) -> bool {
        true
    }
}

/// Null visualizer that does nothing (for when charts are disabled)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullVisualizer;

impl SurveyVisualizer for NullVisualizer {
    fn record_counts(&self, _title: &str, _counts: &[(String, usize)]) -> Result<()> {
        Ok(())
    }

    fn record_distribution(
        &self,
        _title: &str,
        _values: &[f64],
        _marker: Option<Marker>,
        _bins: Option<usize>,
    ) -> Result<()> {
        Ok(())
    }

    fn record_shares(&self, _title: &str, _bars: &[ShareBar]) -> Result<()> {
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        false
    }
}
