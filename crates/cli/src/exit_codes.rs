//! CLI exit code registry.
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract — scripts rely on them.
//!
//! | Code | Meaning                                        |
//! |------|------------------------------------------------|
//! | 0    | Success                                        |
//! | 1    | General error (unspecified)                    |
//! | 2    | Usage error (bad arguments)                    |
//! | 3    | I/O error (workbook, output file)              |
//! | 4    | Config parse/validation error                  |
//! | 5    | Extraction error (pdftotext missing, no data)  |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
#[allow(dead_code)]
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// I/O error - cannot read or write a file the command needs.
pub const EXIT_IO: u8 = 3;

/// Config error - TOML parse failure or failed validation.
pub const EXIT_CONFIG: u8 = 4;

/// Extraction error - pdftotext unavailable, or no table extracted at all.
pub const EXIT_EXTRACT: u8 = 5;
