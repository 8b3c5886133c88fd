use std::path::Path;
use std::process::Command;

use occufill_core::config::ExtractConfig;
use occufill_core::dataset::PeriodTable;

use crate::error::ExtractError;
use crate::table::{parse_period_table, TableMarkers};
use crate::TableExtractor;

/// [`TableExtractor`] backed by `pdftotext -layout` (poppler-utils).
pub struct PdftotextExtractor {
    markers: TableMarkers,
}

impl PdftotextExtractor {
    pub fn new(markers: TableMarkers) -> Self {
        Self { markers }
    }

    pub fn from_config(config: &ExtractConfig) -> Self {
        Self::new(TableMarkers::from_config(config))
    }
}

impl TableExtractor for PdftotextExtractor {
    fn extract_period_table(&self, document: &Path) -> Result<PeriodTable, ExtractError> {
        let text = run_pdftotext(document)?;
        Ok(parse_period_table(&text, &self.markers))
    }
}

/// Run `pdftotext -layout <file> -` and capture stdout.
pub fn run_pdftotext(file: &Path) -> Result<String, ExtractError> {
    which::which("pdftotext").map_err(|_| ExtractError::ToolMissing("pdftotext".into()))?;

    let file_str = file.to_str().ok_or_else(|| ExtractError::DocumentRead {
        path: file.to_path_buf(),
        detail: "non-UTF-8 path".into(),
    })?;

    let output = Command::new("pdftotext")
        .args(["-layout", file_str, "-"])
        .output()
        .map_err(|e| ExtractError::DocumentRead {
            path: file.to_path_buf(),
            detail: format!("failed to run pdftotext: {e}"),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ExtractError::DocumentRead {
            path: file.to_path_buf(),
            detail: format!(
                "pdftotext failed (exit {}): {}",
                output.status.code().unwrap_or(-1),
                stderr.trim(),
            ),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}
