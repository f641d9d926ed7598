//! Polars integration for survey aggregates
//!
//! The recoded survey is converted to a [`DataFrame`](polars::prelude::DataFrame)
//! with one column per survey field plus the derived `DRUGEVER` hard-drug
//! count. Group-wise counts and proportions are then available through a
//! single extension trait.
//!
//! # Example
//!
//! ```rust,ignore
//! use gateway_polars::{survey_frame, SurveyFrameExt, HARD_DRUG_COUNT};
//!
//! let df = survey_frame(&survey)?;
//! let tried_cocaine = df.count_equal("COCEVER", "Yes")?;
//! let props = df.group_proportions("MJEVER", HARD_DRUG_COUNT)?;
//! ```

mod error;
mod frame;
mod methods;
mod traits;

pub use error::{Error, Result};
pub use frame::{survey_frame, COUNT, HARD_DRUG_COUNT, PROPORTION};
pub use methods::{proportion_rows, ProportionRow};
pub use traits::SurveyFrameExt;
