//! Aggregation implementations

mod proportions;

pub use proportions::{proportion_rows, ProportionRow};
