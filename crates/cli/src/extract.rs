//! `occufill extract` — dump one bulletin's period table.

use std::path::PathBuf;

use occufill_core::config::ExtractConfig;
use occufill_extract::{ExtractError, PdftotextExtractor, TableExtractor};

use crate::CliError;

/// Map an extraction failure onto the CLI error surface. A missing
/// `pdftotext` binary gets an actionable hint.
pub(crate) fn extract_err(e: ExtractError) -> CliError {
    let error = CliError::extract(e.to_string());
    match e {
        ExtractError::ToolMissing(_) => {
            error.with_hint("install poppler-utils to get pdftotext")
        }
        _ => error,
    }
}

pub fn cmd_extract(
    file: PathBuf,
    config_path: Option<PathBuf>,
    json_output: bool,
) -> Result<(), CliError> {
    let extract_config = match config_path {
        Some(ref path) => crate::load_job(path)?.config.extract,
        None => ExtractConfig::default(),
    };

    let extractor = PdftotextExtractor::from_config(&extract_config);
    let table = extractor
        .extract_period_table(&file)
        .map_err(extract_err)?;

    if json_output {
        let json_str = serde_json::to_string_pretty(&table)
            .map_err(|e| CliError::io(format!("JSON serialization error: {e}")))?;
        println!("{json_str}");
        return Ok(());
    }

    if table.is_empty() {
        eprintln!("{}: no occupancy table found", file.display());
        return Ok(());
    }
    for (name, value) in table.entries() {
        println!("{name}\t{value}");
    }
    eprintln!("{} establishment(s)", table.len());
    Ok(())
}
