use serde::Serialize;

use occufill_core::config::ReportConfig;
use occufill_core::dataset::PeriodTable;
use occufill_core::{matcher, normalize};

use crate::suggest::{word_overlap, Suggestion};

/// One workbook name with no counterpart among the extracted names.
/// Suggestions are computed only for a bounded prefix of the unmatched
/// list (the rest carry an empty list) to keep reports readable.
#[derive(Debug, Clone, Serialize)]
pub struct Unmatched {
    pub name: String,
    pub normalized: String,
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconReport {
    pub targets: usize,
    pub candidates: usize,
    pub matched: usize,
    pub unmatched: Vec<Unmatched>,
}

/// Fuzzy-find each target among the candidates and partition. Values are
/// irrelevant here; only match / no-match matters, so the candidate list
/// is wrapped into a synthetic table with placeholder values.
pub fn build_report(targets: &[String], candidates: &[String], options: &ReportConfig) -> ReconReport {
    let candidate_table: PeriodTable = candidates
        .iter()
        .map(|name| (name.clone(), String::from("x")))
        .collect();

    let mut matched = 0usize;
    let mut unmatched: Vec<Unmatched> = Vec::new();

    for target in targets {
        if matcher::find(target, &candidate_table).is_some() {
            matched += 1;
        } else {
            let suggestions = if unmatched.len() < options.max_detailed {
                word_overlap(target, candidates, options.max_suggestions)
            } else {
                Vec::new()
            };
            unmatched.push(Unmatched {
                name: target.clone(),
                normalized: normalize(target),
                suggestions,
            });
        }
    }

    ReconReport {
        targets: targets.len(),
        candidates: candidates.len(),
        matched,
        unmatched,
    }
}
