//! `occufill-extract` — the document-table extraction boundary.
//!
//! The core never parses PDFs itself; it asks a [`TableExtractor`] for one
//! period's `name -> value` table. The shipped implementation shells out
//! to `pdftotext -layout` and scans the page text for the configured
//! markers. A document with no matching table yields an empty table, which
//! is "no data for this period", not an error.

use std::path::Path;

use occufill_core::dataset::PeriodTable;

pub mod batch;
pub mod error;
pub mod pdf;
pub mod table;

pub use batch::{collect_dataset, BatchOutcome, DocumentFailure, LoadedDocument};
pub use error::ExtractError;
pub use pdf::PdftotextExtractor;
pub use table::TableMarkers;

/// External collaborator boundary: one document in, one period table out.
pub trait TableExtractor {
    fn extract_period_table(&self, document: &Path) -> Result<PeriodTable, ExtractError>;
}
