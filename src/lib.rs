//! GeoViz: load geotechnical sensor readings from CSV, summarize the numeric
//! columns and check displacement and pore pressure against fixed limits.
//!
//! ```text
//!   data::loader ──► data::schema ──► analysis::summary
//!        │
//!        └──────────────────────────► analysis::alerts
//! ```
//!
//! The desktop viewer (`main.rs`) is a thin layer over [`analysis::analyze`].

pub mod analysis;
pub mod data;
pub mod error;

pub use analysis::{analyze, Analysis};
pub use error::AnalysisError;
