//! Charts for the gateway-stats survey report
//!
//! The report hands every chart to a [`SurveyVisualizer`]. The
//! [`NullVisualizer`] discards them; the [`SvgVisualizer`] writes one SVG
//! file per chart with `plotters`.
//!
//! ```
//! use gateway_viz::{NullVisualizer, SurveyVisualizer};
//!
//! let viz = NullVisualizer;
//! assert!(!viz.is_enabled());
//! viz.record_counts("Number of people who tried each drug", &[("MJ".into(), 3)])
//!     .unwrap();
//! ```

mod binning;
mod svg;
mod traits;

pub use binning::{fixed_width_bins, freedman_diaconis_bins, Bin, MAX_AUTO_BINS};
pub use svg::SvgVisualizer;
pub use traits::{Marker, NullVisualizer, ShareBar, SurveyVisualizer};
