//! `occufill report` — reconciliation transcript between the workbook's
//! establishment rows and the names found in one year's bulletins.

use std::path::PathBuf;

use occufill_core::dataset::ExtractedDataset;
use occufill_extract::{collect_dataset, PdftotextExtractor};
use occufill_grid::Sheet;
use occufill_io::read_ods;
use occufill_recon::{build_report, ReconReport};

use crate::extract::extract_err;
use crate::CliError;

pub fn cmd_report(config_path: PathBuf, year: i32, json_output: bool) -> Result<(), CliError> {
    let job = crate::load_job(&config_path)?;
    if !job.config.years.contains(&year) {
        return Err(CliError::args(format!(
            "year {year} is not listed in '{}'",
            job.config.name,
        )));
    }
    let months = job
        .config
        .month_names()
        .map_err(|e| CliError::config(e.to_string()))?;

    let workbook = read_ods(&job.workbook).map_err(|e| CliError::io(e.to_string()))?;
    let sheet = workbook.sheet(&year.to_string()).ok_or_else(|| {
        CliError::args(format!(
            "no sheet named {year} in {}",
            job.workbook.display(),
        ))
    })?;
    let targets = targets_from_sheet(sheet, job.config.fill.entity_column);

    let extractor = PdftotextExtractor::from_config(&job.config.extract);
    let batch = collect_dataset(
        &job.pdf_root,
        &[year],
        &job.config.extract.filename_prefix,
        &months,
        &extractor,
    )
    .map_err(extract_err)?;
    for failure in &batch.failures {
        eprintln!("{}: {}", failure.path.display(), failure.error);
    }
    let candidates = candidate_union(&batch.dataset, year);

    let report = build_report(&targets, &candidates, &job.config.report);

    if json_output {
        let json_str = serde_json::to_string_pretty(&report)
            .map_err(|e| CliError::io(format!("JSON serialization error: {e}")))?;
        println!("{json_str}");
        return Ok(());
    }

    render_transcript(&report, year, job.config.report.max_detailed);
    Ok(())
}

/// Establishment names from the sheet's entity column: header row skipped,
/// blanks and `Total` aggregate rows dropped, document order kept.
pub(crate) fn targets_from_sheet(sheet: &Sheet, entity_column: usize) -> Vec<String> {
    let mut targets = Vec::new();
    for row in sheet.rows.iter().skip(1) {
        let mut row = row.clone();
        row.expand_repeats();
        let Some(cell) = row.cells.get(entity_column) else {
            continue;
        };
        let name = cell.text.trim();
        if name.is_empty() || name.starts_with("Total") {
            continue;
        }
        targets.push(name.to_string());
    }
    targets
}

/// Union of the names seen across one year's tables, deduplicated, in
/// month-then-document encounter order.
pub(crate) fn candidate_union(dataset: &ExtractedDataset, year: i32) -> Vec<String> {
    let mut candidates: Vec<String> = Vec::new();
    for (y, tables) in dataset.years() {
        if y != year {
            continue;
        }
        for table in tables.values() {
            for name in table.names() {
                if !candidates.iter().any(|c| c == name) {
                    candidates.push(name.to_string());
                }
            }
        }
    }
    candidates
}

fn render_transcript(report: &ReconReport, year: i32, max_detailed: usize) {
    let bar = "=".repeat(80);

    println!("workbook rows (sheet {year}): {}", report.targets);
    println!("unique bulletin names: {}", report.candidates);

    println!("\n{bar}");
    println!("WORKBOOK ROWS WITHOUT A BULLETIN MATCH");
    println!("{bar}");
    println!("\n{} row(s) not matched:", report.unmatched.len());
    for unmatched in &report.unmatched {
        println!("  - {}", unmatched.name);
    }

    println!("\n{bar}");
    println!("CLOSEST CANDIDATES");
    println!("{bar}");
    for unmatched in report.unmatched.iter().take(max_detailed) {
        println!("\n{} (normalized: {})", unmatched.name, unmatched.normalized);
        if unmatched.suggestions.is_empty() {
            println!("  no close candidate");
            continue;
        }
        println!("  candidates:");
        for suggestion in &unmatched.suggestions {
            println!("    - {} (shared words: {})", suggestion.name, suggestion.shared_words);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use occufill_core::dataset::PeriodTable;
    use occufill_core::month::Month;
    use occufill_grid::{Cell, Row};

    #[test]
    fn sheet_targets_skip_header_blanks_and_totals() {
        let mut sheet = Sheet::new("2018");
        sheet.rows.push(Row::new(vec![
            Cell::new(""),
            Cell::new("Etablissement"),
        ]));
        sheet.rows.push(Row::new(vec![
            Cell::new("DI Bordeaux"),
            Cell::new("  CP Bordeaux-Gradignan  "),
        ]));
        // Entity column hidden inside a repeated run
        sheet.rows.push(Row::new(vec![Cell::repeated("EPM Orvault", 2)]));
        sheet.rows.push(Row::new(vec![Cell::new(""), Cell::new("Total DI Bordeaux")]));
        sheet.rows.push(Row::new(vec![Cell::new(""), Cell::new("   ")]));
        sheet.rows.push(Row::new(vec![Cell::new("short row")]));

        let targets = targets_from_sheet(&sheet, 1);
        assert_eq!(targets, vec!["CP Bordeaux-Gradignan", "EPM Orvault"]);
    }

    #[test]
    fn candidate_union_dedupes_across_months() {
        let mut dataset = ExtractedDataset::new();
        let mut january = PeriodTable::new();
        january.insert("CP A", "90%");
        january.insert("CP B", "80%");
        let mut february = PeriodTable::new();
        february.insert("CP B", "85%");
        february.insert("CP C", "70%");
        dataset.insert_table(2018, Month::January, january);
        dataset.insert_table(2018, Month::February, february);

        let mut other = PeriodTable::new();
        other.insert("CP D", "60%");
        dataset.insert_table(2019, Month::January, other);

        let candidates = candidate_union(&dataset, 2018);
        assert_eq!(candidates, vec!["CP A", "CP B", "CP C"]);
    }
}
