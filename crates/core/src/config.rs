use serde::Deserialize;

use crate::error::ConfigError;
use crate::month::MonthNames;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// One batch job: which workbook to fill from which PDF tree. Every path,
/// marker, and vocabulary entry the run needs lives here — nothing is
/// hardcoded in the engine crates.
#[derive(Debug, Deserialize)]
pub struct JobConfig {
    pub name: String,
    /// Target ODS workbook, one sheet per year (sheet name = 4-digit year).
    pub workbook: String,
    /// Root of the directory-per-year PDF layout.
    pub pdf_root: String,
    /// Years to process; each names both a subdirectory and a sheet.
    pub years: Vec<i32>,
    #[serde(default)]
    pub extract: ExtractConfig,
    #[serde(default)]
    pub fill: FillConfig,
    #[serde(default)]
    pub report: ReportConfig,
    /// Optional twelve-entry month vocabulary override, January first.
    #[serde(default)]
    pub months: Option<Vec<String>>,
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Markers locating the occupancy table inside a bulletin, and the
/// filename pattern prefix (`<prefix>_<month>_<year>.pdf`).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    pub filename_prefix: String,
    /// Page must contain this table title...
    pub title_marker: String,
    /// ...and this section caption.
    pub caption_marker: String,
    /// Header label of the column holding the occupancy value.
    pub value_column_marker: String,
    /// Rows whose name starts with one of these (normalized prefix
    /// comparison) are aggregates or header echoes, not establishments.
    pub skip_prefixes: Vec<String>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            filename_prefix: "mensuelle".into(),
            title_marker: "Tableau 29".into(),
            caption_marker: "Répartition des mineurs détenus par établissement".into(),
            value_column_marker: "Taux d'occupation".into(),
            skip_prefixes: vec!["Ensemble".into(), "Etablissement".into()],
        }
    }
}

// ---------------------------------------------------------------------------
// Fill + Report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FillConfig {
    /// Written into empty cells with no match; never overwrites content.
    pub placeholder: String,
    /// Column holding the establishment name (column 0 is the parent
    /// grouping label).
    pub entity_column: usize,
}

impl Default for FillConfig {
    fn default() -> Self {
        Self {
            placeholder: "-".into(),
            entity_column: 1,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// How many unmatched names get suggestion lists.
    pub max_detailed: usize,
    /// Suggestions surfaced per unmatched name.
    pub max_suggestions: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            max_detailed: 10,
            max_suggestions: 3,
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl JobConfig {
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        let config: JobConfig =
            toml::from_str(input).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.years.is_empty() {
            return Err(ConfigError::Validation("at least one year is required".into()));
        }
        for &year in &self.years {
            if !(1000..=9999).contains(&year) {
                return Err(ConfigError::Validation(format!(
                    "year {year} is not a 4-digit year"
                )));
            }
        }
        if let Some(ref months) = self.months {
            if months.len() != 12 {
                return Err(ConfigError::Validation(format!(
                    "months must list exactly 12 names, got {}",
                    months.len()
                )));
            }
        }
        if self.extract.filename_prefix.is_empty() {
            return Err(ConfigError::Validation("filename_prefix must not be empty".into()));
        }
        if self.fill.placeholder.is_empty() {
            return Err(ConfigError::Validation("placeholder must not be empty".into()));
        }
        Ok(())
    }

    /// The month vocabulary for this job (config override or default).
    pub fn month_names(&self) -> Result<MonthNames, ConfigError> {
        match &self.months {
            None => Ok(MonthNames::default()),
            Some(names) => MonthNames::from_names(names.clone()).ok_or_else(|| {
                ConfigError::Validation("months must list exactly 12 names".into())
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
