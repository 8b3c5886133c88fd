use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;

use occufill_core::dataset::ExtractedDataset;
use occufill_core::month::{Month, MonthNames};

use crate::error::ExtractError;
use crate::TableExtractor;

/// Filename pattern `<prefix>_<month-name>_<year>`, searched anywhere in
/// the name, case-insensitive (e.g. `mensuelle_janvier_2016.pdf`).
pub struct PeriodPattern {
    re: Regex,
}

impl PeriodPattern {
    pub fn new(prefix: &str) -> Result<Self, ExtractError> {
        let re = Regex::new(&format!(r"(?i){}_(\pL+)_(\d{{4}})", regex::escape(prefix)))
            .map_err(|e| ExtractError::Pattern(e.to_string()))?;
        Ok(Self { re })
    }

    pub fn parse(&self, filename: &str, months: &MonthNames) -> Option<(Month, i32)> {
        let caps = self.re.captures(filename)?;
        let month = months.parse(caps.get(1)?.as_str())?;
        let year = caps.get(2)?.as_str().parse().ok()?;
        Some((month, year))
    }
}

#[derive(Debug)]
pub struct LoadedDocument {
    pub path: PathBuf,
    pub year: i32,
    pub month: Month,
    pub entries: usize,
}

#[derive(Debug)]
pub struct DocumentFailure {
    pub path: PathBuf,
    pub error: ExtractError,
}

/// Everything one batch walk produced. Skips and failures are collected,
/// never dropped; the caller decides how to surface them.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub dataset: ExtractedDataset,
    pub loaded: Vec<LoadedDocument>,
    /// Documents that parsed but contained no matching table.
    pub empty: Vec<PathBuf>,
    /// Files not matching the pattern, or whose encoded year disagrees
    /// with their directory.
    pub skipped_files: Vec<PathBuf>,
    pub missing_year_dirs: Vec<i32>,
    pub failures: Vec<DocumentFailure>,
}

/// Walk the directory-per-year bulletin tree and assemble the dataset.
///
/// Files are visited in name order. A document that fails to read is
/// recorded and the walk continues; only a filesystem error on the tree
/// itself aborts.
pub fn collect_dataset(
    root: &Path,
    years: &[i32],
    prefix: &str,
    months: &MonthNames,
    extractor: &dyn TableExtractor,
) -> Result<BatchOutcome, ExtractError> {
    let pattern = PeriodPattern::new(prefix)?;
    let mut outcome = BatchOutcome::default();

    for &year in years {
        let dir = root.join(year.to_string());
        if !dir.is_dir() {
            outcome.missing_year_dirs.push(year);
            continue;
        }

        let mut documents: Vec<PathBuf> = fs::read_dir(&dir)
            .map_err(|e| ExtractError::Io(format!("cannot read {}: {e}", dir.display())))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| {
                p.extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
            })
            .collect();
        documents.sort();

        for path in documents {
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
            let Some((month, file_year)) = pattern.parse(name, months) else {
                outcome.skipped_files.push(path);
                continue;
            };
            if file_year != year {
                outcome.skipped_files.push(path);
                continue;
            }

            match extractor.extract_period_table(&path) {
                Ok(table) if table.is_empty() => outcome.empty.push(path),
                Ok(table) => {
                    outcome.loaded.push(LoadedDocument {
                        path,
                        year,
                        month,
                        entries: table.len(),
                    });
                    outcome.dataset.insert_table(year, month, table);
                }
                Err(error) => outcome.failures.push(DocumentFailure { path, error }),
            }
        }
    }

    Ok(outcome)
}
