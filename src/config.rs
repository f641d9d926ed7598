//! Report configuration

use crate::{Error, Result};
use gateway_hypothesis::ChiSquareDof;
use gateway_survey::CleaningRules;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// What to do when a test sample is degenerate (too small or constant)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegeneratePolicy {
    /// Report the test as skipped and continue
    #[default]
    Skip,
    /// Fail the whole report
    Abort,
}

/// Settings for one run of the survey report
///
/// Every field has a default, so a configuration file only needs the keys
/// it changes:
///
/// ```
/// use gateway_stats::{ChiSquareDof, ReportConfig};
///
/// let config = ReportConfig::from_json_str(
///     r#"{ "input": "extract.tsv", "chi_square_dof": "two_by_two" }"#,
/// )
/// .unwrap();
/// assert_eq!(config.chi_square_dof, ChiSquareDof::TwoByTwo);
/// assert_eq!(config.significance_level, 0.05);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Tab-separated survey extract
    pub input: PathBuf,
    /// Directory for SVG charts; no charts when absent
    pub charts_dir: Option<PathBuf>,
    pub cleaning: CleaningRules,
    pub chi_square_dof: ChiSquareDof,
    /// Alpha for the significance verdicts, in (0, 1)
    pub significance_level: f64,
    /// Bin count of the age-at-first-use histograms
    pub age_bins: usize,
    pub on_degenerate: DegeneratePolicy,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("NSDUH_2018_Tab.tsv"),
            charts_dir: None,
            cleaning: CleaningRules::default(),
            chi_square_dof: ChiSquareDof::default(),
            significance_level: 0.05,
            age_bins: 10,
            on_degenerate: DegeneratePolicy::default(),
        }
    }
}

impl ReportConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.significance_level > 0.0 && self.significance_level < 1.0) {
            return Err(Error::InvalidConfig(format!(
                "significance_level must be in (0, 1), got {}",
                self.significance_level
            )));
        }
        if self.age_bins == 0 {
            return Err(Error::InvalidConfig("age_bins must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn with_input(mut self, input: impl Into<PathBuf>) -> Self {
        self.input = input.into();
        self
    }

    pub fn with_charts_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.charts_dir = Some(dir.into());
        self
    }

    pub fn with_cleaning(mut self, cleaning: CleaningRules) -> Self {
        self.cleaning = cleaning;
        self
    }

    pub fn with_chi_square_dof(mut self, dof: ChiSquareDof) -> Self {
        self.chi_square_dof = dof;
        self
    }

    pub fn with_significance_level(mut self, alpha: f64) -> Self {
        self.significance_level = alpha;
        self
    }

    pub fn with_age_bins(mut self, bins: usize) -> Self {
        self.age_bins = bins;
        self
    }

    pub fn with_on_degenerate(mut self, policy: DegeneratePolicy) -> Self {
        self.on_degenerate = policy;
        self
    }
}
