//! `occufill run` — extract every bulletin, fill the workbook, save it.

use std::path::PathBuf;

use occufill_extract::{collect_dataset, PdftotextExtractor};
use occufill_grid::{fill_workbook, SkipReason};
use occufill_io::{read_ods, write_ods};

use crate::extract::extract_err;
use crate::CliError;

pub fn cmd_run(
    config_path: PathBuf,
    json_output: bool,
    output_file: Option<PathBuf>,
) -> Result<(), CliError> {
    let job = crate::load_job(&config_path)?;
    let months = job
        .config
        .month_names()
        .map_err(|e| CliError::config(e.to_string()))?;

    let extractor = PdftotextExtractor::from_config(&job.config.extract);
    let batch = collect_dataset(
        &job.pdf_root,
        &job.config.years,
        &job.config.extract.filename_prefix,
        &months,
        &extractor,
    )
    .map_err(extract_err)?;

    // Per-document transcript to stderr; nothing is silently dropped.
    for doc in &batch.loaded {
        eprintln!(
            "{}: {} {} — {} establishment(s)",
            doc.path.display(),
            doc.month,
            doc.year,
            doc.entries,
        );
    }
    for path in &batch.empty {
        eprintln!("{}: no occupancy table found", path.display());
    }
    for path in &batch.skipped_files {
        eprintln!("{}: skipped (name does not match the bulletin pattern)", path.display());
    }
    for year in &batch.missing_year_dirs {
        eprintln!("{year}: no bulletin directory under {}", job.pdf_root.display());
    }
    for failure in &batch.failures {
        eprintln!("{}: {}", failure.path.display(), failure.error);
    }

    if batch.dataset.is_empty() {
        // Abort before touching the workbook rather than rewrite it
        // without a single value.
        return Err(CliError::extract("no period table extracted from any bulletin")
            .with_hint("check pdf_root, the years list and filename_prefix in the config"));
    }

    let mut workbook = read_ods(&job.workbook).map_err(|e| CliError::io(e.to_string()))?;
    let fill = fill_workbook(&mut workbook, &batch.dataset, &months, &job.config.fill);
    write_ods(&job.workbook, &workbook).map_err(|e| CliError::io(e.to_string()))?;

    let summary = serde_json::json!({
        "job": job.config.name,
        "documents": {
            "loaded": batch.loaded.len(),
            "empty": batch.empty.len(),
            "skipped": batch.skipped_files.len(),
            "failed": batch.failures.len(),
            "missing_year_dirs": batch.missing_year_dirs,
        },
        "fill": fill,
    });
    let json_str = serde_json::to_string_pretty(&summary)
        .map_err(|e| CliError::io(format!("JSON serialization error: {e}")))?;

    if let Some(ref path) = output_file {
        std::fs::write(path, &json_str)
            .map_err(|e| CliError::io(format!("cannot write output: {e}")))?;
        eprintln!("wrote {}", path.display());
    }
    if json_output {
        println!("{json_str}");
    }

    for skipped in &fill.skipped {
        match &skipped.reason {
            SkipReason::MissingSheet => {
                eprintln!("sheet {}: not found in workbook, year skipped", skipped.year)
            }
            SkipReason::TooFewRows { rows } => eprintln!(
                "sheet {}: only {rows} row(s), no data below the header, year skipped",
                skipped.year,
            ),
        }
    }
    eprintln!(
        "{}: {} cell(s) considered — {} filled, {} marked empty",
        job.workbook.display(),
        fill.stats.considered,
        fill.stats.filled,
        fill.stats.marked_empty,
    );

    Ok(())
}
