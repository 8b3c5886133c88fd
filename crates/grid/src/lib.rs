//! `occufill-grid` — in-memory workbook model and the fill pass.
//!
//! The model mirrors what the ODS container stores: sheets of rows of
//! text cells, where one stored cell may stand for several identical
//! adjacent columns (`repeat` run-length encoding). Expansion into
//! independently mutable cells happens before any write.

pub mod fill;
pub mod sheet;

pub use fill::{fill_workbook, FillOutcome, FillStats, SkipReason, SkippedYear};
pub use sheet::{Cell, Row, Sheet, Workbook};
