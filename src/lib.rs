//! # gateway-stats
//!
//! Exploratory analysis of the NSDUH 2018 survey extract: is marijuana use
//! associated with later use of cocaine, heroin or methamphetamine?
//!
//! The pipeline is split across the workspace crates and re-exported here:
//!
//! - [`gateway_core`]: substances, codebook constants, record model, errors
//! - [`gateway_survey`]: TSV loading, cleaning and recoding
//! - [`gateway_polars`]: survey DataFrame with counts and group proportions
//! - [`gateway_hypothesis`]: pooled chi-square and age-difference t tests
//! - [`gateway_viz`]: chart rendering
//!
//! [`run`] drives the whole analysis from a [`ReportConfig`] and returns a
//! printable [`Report`].
//!
//! ```no_run
//! use gateway_stats::{run, NullVisualizer, ReportConfig};
//!
//! let config = ReportConfig::default().with_input("NSDUH_2018_Tab.tsv");
//! let report = run(&config, &NullVisualizer)?;
//! println!("{report}");
//! # Ok::<(), gateway_stats::Error>(())
//! ```

mod config;
mod error;
mod logging;
mod report;

pub use config::{DegeneratePolicy, ReportConfig};
pub use error::{Error, Result};
pub use logging::{init_tracing, LOG_ENV};
pub use report::{run, run_table, Outcome, PairReport, Report};

pub use gateway_core::{
    codebook, AgeAtFirstUse, EverUsed, Field, RawRecord, RawTable, Respondent, Substance, Survey,
};
pub use gateway_hypothesis::{
    age_difference_sample, age_gap_test, age_summary, chi_square_independence, pairwise_tests,
    AgeGapTest, AgeSummary, ChiSquareDof, ChiSquareTest, PairwiseTests, PooledCounts,
};
pub use gateway_polars::{survey_frame, ProportionRow, SurveyFrameExt, HARD_DRUG_COUNT};
pub use gateway_survey::{clean, load_tsv, read_tsv, recode, CleaningRules, CodeFilter, ColumnFilter};
pub use gateway_viz::{Marker, NullVisualizer, ShareBar, SurveyVisualizer, SvgVisualizer};

// Re-export the crates themselves for anything not lifted above
pub use gateway_core;
pub use gateway_hypothesis;
pub use gateway_polars;
pub use gateway_survey;
pub use gateway_viz;
