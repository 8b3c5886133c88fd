//! `occufill-recon` — reconciliation between two establishment-name
//! universes (workbook rows vs extracted tables).
//!
//! Pure engine crate: builds a structured report; rendering the transcript
//! is the CLI's job.

pub mod report;
pub mod suggest;

pub use report::{build_report, ReconReport, Unmatched};
pub use suggest::Suggestion;
