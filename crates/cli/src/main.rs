// occufill CLI - fill an ODS occupancy workbook from monthly PDF bulletins

mod exit_codes;
mod extract;
mod report;
mod run;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use occufill_core::JobConfig;

use exit_codes::{EXIT_CONFIG, EXIT_EXTRACT, EXIT_IO, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "occufill")]
#[command(about = "Extract occupancy rates from monthly PDF bulletins into an ODS workbook")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract every bulletin, fill the workbook, save it
    #[command(after_help = "\
Examples:
  occufill run job.toml
  occufill run job.toml --json
  occufill run job.toml --output stats.json")]
    Run {
        /// Path to the job's TOML config file
        config: PathBuf,

        /// Output JSON to stdout instead of human summary
        #[arg(long)]
        json: bool,

        /// Write JSON output to file
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Reconcile workbook rows against bulletin names for one year
    #[command(after_help = "\
Examples:
  occufill report job.toml --year 2018
  occufill report job.toml --year 2018 --json")]
    Report {
        /// Path to the job's TOML config file
        config: PathBuf,

        /// Year whose sheet and bulletins to compare
        #[arg(long)]
        year: i32,

        /// Output JSON to stdout instead of the transcript
        #[arg(long)]
        json: bool,
    },

    /// Dump the period table of a single bulletin
    #[command(after_help = "\
Examples:
  occufill extract bulletins/2016/mensuelle_janvier_2016.pdf
  occufill extract bulletin.pdf --config job.toml --json")]
    Extract {
        /// Path to the PDF bulletin
        file: PathBuf,

        /// Job config supplying the table markers (defaults otherwise)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output JSON to stdout instead of tab-separated pairs
        #[arg(long)]
        json: bool,
    },

    /// Validate a job config without running
    #[command(after_help = "\
Examples:
  occufill validate job.toml")]
    Validate {
        /// Path to the job's TOML config file
        config: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run { config, json, output } => run::cmd_run(config, json, output),
        Commands::Report { config, year, json } => report::cmd_report(config, year, json),
        Commands::Extract { file, config, json } => extract::cmd_extract(file, config, json),
        Commands::Validate { config } => cmd_validate(config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_IO, message: msg.into(), hint: None }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self { code: EXIT_CONFIG, message: msg.into(), hint: None }
    }

    pub fn extract(msg: impl Into<String>) -> Self {
        Self { code: EXIT_EXTRACT, message: msg.into(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// A parsed job config with its paths re-rooted at the config file's
/// directory, so jobs are relocatable alongside their data.
#[derive(Debug)]
pub struct LoadedJob {
    pub config: JobConfig,
    pub workbook: PathBuf,
    pub pdf_root: PathBuf,
}

pub fn load_job(path: &Path) -> Result<LoadedJob, CliError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| CliError::io(format!("cannot read {}: {e}", path.display())))?;
    let config = JobConfig::from_toml(&text).map_err(|e| CliError::config(e.to_string()))?;

    let base = path.parent().unwrap_or_else(|| Path::new("."));
    let workbook = base.join(&config.workbook);
    let pdf_root = base.join(&config.pdf_root);
    Ok(LoadedJob { config, workbook, pdf_root })
}

fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let job = load_job(&config_path)?;
    // month_names() re-checks the vocabulary override.
    job.config
        .month_names()
        .map_err(|e| CliError::config(e.to_string()))?;
    eprintln!(
        "valid: job '{}' — {} year(s), workbook {}, bulletins under {}",
        job.config.name,
        job.config.years.len(),
        job.workbook.display(),
        job.pdf_root.display(),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_job_resolves_paths_against_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("job.toml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        write!(
            file,
            "name = \"t\"\nworkbook = \"wb.ods\"\npdf_root = \"bulletins\"\nyears = [2016]\n"
        )
        .unwrap();

        let job = load_job(&config_path).unwrap();
        assert_eq!(job.workbook, dir.path().join("wb.ods"));
        assert_eq!(job.pdf_root, dir.path().join("bulletins"));
    }

    #[test]
    fn load_job_maps_error_kinds_to_exit_codes() {
        let dir = tempfile::tempdir().unwrap();

        let err = load_job(&dir.path().join("absent.toml")).unwrap_err();
        assert_eq!(err.code, EXIT_IO);

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "name = \"t\"\n").unwrap();
        let err = load_job(&bad).unwrap_err();
        assert_eq!(err.code, EXIT_CONFIG);
    }
}
