//! `occufill-core` — establishment-name matching engine.
//!
//! Pure engine crate: normalization, ordered fuzzy matching, the month
//! vocabulary, and the extracted-dataset types. No IO dependencies.

pub mod config;
pub mod dataset;
pub mod error;
pub mod matcher;
pub mod month;
pub mod normalize;

pub use config::JobConfig;
pub use dataset::{ExtractedDataset, PeriodTable};
pub use error::ConfigError;
pub use month::{Month, MonthNames};
pub use normalize::normalize;
