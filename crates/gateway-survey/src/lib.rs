//! Loader, Cleaner and Recoder for the NSDUH survey extract
//!
//! The three stages run in order and each is a pure function of its input:
//!
//! ```rust,ignore
//! use gateway_survey::{load_tsv, recode, CleaningRules};
//!
//! let raw = load_tsv("NSDUH_2018_Tab.tsv".as_ref())?;
//! let cleaned = CleaningRules::default().apply(&raw)?;
//! let survey = recode(&cleaned)?;
//! ```

mod cleaner;
mod loader;
mod recoder;

pub use cleaner::{clean, CleaningRules, CodeFilter, ColumnFilter};
pub use loader::{load_tsv, read_tsv};
pub use recoder::{recode, recode_record};
