//! Core types for the gateway-stats survey analysis
//!
//! This crate holds the vocabulary shared by every stage of the pipeline:
//! the four substances and their survey columns, the response codes of the
//! NSDUH codebook, the raw and recoded record model, and the error taxonomy.

pub mod codebook;
mod error;
mod record;
mod substance;

pub use error::{Error, Result};
pub use record::{AgeAtFirstUse, EverUsed, RawRecord, RawTable, Respondent, Survey};
pub use substance::{Field, Substance};
