//! `occufill-io` — ODS container read/write.
//!
//! Only the subset the fill workflow needs: sheets of text cells, with
//! the `table:number-columns-repeated` run-length encoding preserved into
//! the grid model so expansion stays an explicit step. Import is one-way;
//! export writes a fresh minimal document (values and repeats, no styles).

pub mod ods;

pub use ods::{read_ods, write_ods, OdsError};
