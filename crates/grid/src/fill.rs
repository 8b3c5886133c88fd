use serde::Serialize;

use occufill_core::config::FillConfig;
use occufill_core::dataset::ExtractedDataset;
use occufill_core::matcher;
use occufill_core::month::{Month, MonthNames};

use crate::sheet::Workbook;

/// Aggregate counters for one fill run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FillStats {
    /// One per (data row, mapped month column) pair, whatever the outcome.
    pub considered: usize,
    /// Cells overwritten with a matched value.
    pub filled: usize,
    /// Empty cells marked with the placeholder.
    pub marked_empty: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "reason")]
pub enum SkipReason {
    /// Dataset year has no sheet of that name in the workbook.
    MissingSheet,
    /// Sheet exists but has no header + data rows.
    TooFewRows { rows: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedYear {
    pub year: i32,
    #[serde(flatten)]
    pub reason: SkipReason,
}

/// What one fill run did. Non-fatal conditions land in `skipped`; nothing
/// is silently dropped.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FillOutcome {
    pub stats: FillStats,
    pub skipped: Vec<SkippedYear>,
}

/// Walk every dataset year's sheet and fill month cells from the dataset.
///
/// Per cell: a matched value always overwrites; no match leaves non-empty
/// cells untouched and marks empty ones with the placeholder; a month with
/// no extracted table skips the cell without writing. Repeated cells are
/// expanded (header row included) before any indexing so writes land on
/// exactly one column.
pub fn fill_workbook(
    workbook: &mut Workbook,
    dataset: &ExtractedDataset,
    months: &MonthNames,
    options: &FillConfig,
) -> FillOutcome {
    let mut outcome = FillOutcome::default();

    for (year, year_tables) in dataset.years() {
        let Some(sheet) = workbook.sheet_mut(&year.to_string()) else {
            outcome.skipped.push(SkippedYear { year, reason: SkipReason::MissingSheet });
            continue;
        };
        if sheet.rows.len() < 2 {
            outcome.skipped.push(SkippedYear {
                year,
                reason: SkipReason::TooFewRows { rows: sheet.rows.len() },
            });
            continue;
        }

        for row in &mut sheet.rows {
            row.expand_repeats();
        }

        // Header row maps column index -> month; unmapped columns are
        // ignored.
        let column_months: Vec<(usize, Month)> = sheet.rows[0]
            .cells
            .iter()
            .enumerate()
            .filter_map(|(idx, cell)| months.parse(&cell.text).map(|m| (idx, m)))
            .collect();

        for row in sheet.rows.iter_mut().skip(1) {
            let entity = match row.cells.get(options.entity_column) {
                Some(cell) => cell.text.trim().to_string(),
                None => continue,
            };
            if entity.is_empty() {
                continue;
            }

            for &(col, month) in &column_months {
                outcome.stats.considered += 1;

                let Some(table) = year_tables.get(&month) else {
                    continue;
                };
                let Some(cell) = row.cells.get_mut(col) else {
                    continue;
                };

                match matcher::find(&entity, table) {
                    Some(value) => {
                        cell.text = value.to_string();
                        outcome.stats.filled += 1;
                    }
                    None if cell.is_blank() => {
                        cell.text = options.placeholder.clone();
                        outcome.stats.marked_empty += 1;
                    }
                    None => {}
                }
            }
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::{Cell, Row, Sheet};
    use occufill_core::dataset::PeriodTable;

    fn dataset_with(year: i32, month: Month, pairs: &[(&str, &str)]) -> ExtractedDataset {
        let mut table = PeriodTable::new();
        for (n, v) in pairs {
            table.insert(*n, *v);
        }
        let mut ds = ExtractedDataset::new();
        ds.insert_table(year, month, table);
        ds
    }

    fn sheet_2020(data_rows: Vec<Row>) -> Workbook {
        let mut sheet = Sheet::new("2020");
        sheet.rows.push(Row::new(vec![
            Cell::new("DI"),
            Cell::new("Etablissement"),
            Cell::new("Janvier"),
            Cell::new("Février"),
        ]));
        sheet.rows.extend(data_rows);
        Workbook { sheets: vec![sheet] }
    }

    fn defaults() -> (MonthNames, FillConfig) {
        (MonthNames::default(), FillConfig::default())
    }

    #[test]
    fn fills_matching_cell() {
        let ds = dataset_with(2020, Month::January, &[("CP Test", "80%")]);
        let mut wb = sheet_2020(vec![Row::new(vec![
            Cell::new("DI Sud"),
            Cell::new("CP Test"),
            Cell::new(""),
            Cell::new(""),
        ])]);
        let (months, opts) = defaults();

        let outcome = fill_workbook(&mut wb, &ds, &months, &opts);
        assert_eq!(wb.sheet("2020").unwrap().rows[1].cells[2].text, "80%");
        assert_eq!(outcome.stats.filled, 1);
        // January and February columns are both mapped; February has no
        // table so only the placeholder-free skip applies.
        assert_eq!(outcome.stats.considered, 2);
        assert_eq!(outcome.stats.marked_empty, 0);
    }

    #[test]
    fn match_overwrites_prior_content() {
        let ds = dataset_with(2020, Month::January, &[("CP Test", "80%")]);
        let mut wb = sheet_2020(vec![Row::new(vec![
            Cell::new(""),
            Cell::new("CP Test"),
            Cell::new("stale"),
            Cell::new(""),
        ])]);
        let (months, opts) = defaults();

        let outcome = fill_workbook(&mut wb, &ds, &months, &opts);
        assert_eq!(wb.sheet("2020").unwrap().rows[1].cells[2].text, "80%");
        assert_eq!(outcome.stats.filled, 1);
    }

    #[test]
    fn no_match_preserves_existing_content() {
        let ds = dataset_with(2020, Month::January, &[("MA Autre", "60%")]);
        let mut wb = sheet_2020(vec![Row::new(vec![
            Cell::new(""),
            Cell::new("CP Test"),
            Cell::new("75%"),
            Cell::new(""),
        ])]);
        let (months, opts) = defaults();

        let outcome = fill_workbook(&mut wb, &ds, &months, &opts);
        assert_eq!(wb.sheet("2020").unwrap().rows[1].cells[2].text, "75%");
        assert_eq!(outcome.stats.filled, 0);
        assert_eq!(outcome.stats.marked_empty, 0);
    }

    #[test]
    fn no_match_marks_empty_cell_with_placeholder() {
        let ds = dataset_with(2020, Month::January, &[("MA Autre", "60%")]);
        let mut wb = sheet_2020(vec![Row::new(vec![
            Cell::new(""),
            Cell::new("CP Test"),
            Cell::new(""),
            Cell::new(""),
        ])]);
        let (months, opts) = defaults();

        let outcome = fill_workbook(&mut wb, &ds, &months, &opts);
        assert_eq!(wb.sheet("2020").unwrap().rows[1].cells[2].text, "-");
        assert_eq!(outcome.stats.marked_empty, 1);
        assert_eq!(outcome.stats.filled, 0);
    }

    #[test]
    fn month_without_table_skips_cell_entirely() {
        // Dataset only covers January; the February cell keeps its content
        // and gets no placeholder.
        let ds = dataset_with(2020, Month::January, &[("CP Test", "80%")]);
        let mut wb = sheet_2020(vec![Row::new(vec![
            Cell::new(""),
            Cell::new("CP Test"),
            Cell::new(""),
            Cell::new("prev"),
        ])]);
        let (months, opts) = defaults();

        let outcome = fill_workbook(&mut wb, &ds, &months, &opts);
        assert_eq!(wb.sheet("2020").unwrap().rows[1].cells[3].text, "prev");
        assert_eq!(outcome.stats.considered, 2);
        assert_eq!(outcome.stats.filled, 1);
    }

    #[test]
    fn year_absent_from_dataset_touches_nothing() {
        let ds = dataset_with(2019, Month::January, &[("CP Test", "80%")]);
        let mut wb = sheet_2020(vec![Row::new(vec![
            Cell::new(""),
            Cell::new("CP Test"),
            Cell::new(""),
            Cell::new(""),
        ])]);
        let before = wb.sheet("2020").unwrap().clone();
        let (months, opts) = defaults();

        let outcome = fill_workbook(&mut wb, &ds, &months, &opts);
        // 2019 has no sheet, 2020 was never visited.
        assert_eq!(outcome.stats, FillStats::default());
        assert_eq!(outcome.skipped, vec![SkippedYear { year: 2019, reason: SkipReason::MissingSheet }]);
        assert_eq!(wb.sheet("2020").unwrap().rows, before.rows);
    }

    #[test]
    fn malformed_sheet_is_reported_and_skipped() {
        let ds = dataset_with(2020, Month::January, &[("CP Test", "80%")]);
        let mut wb = Workbook { sheets: vec![Sheet::new("2020")] };
        let (months, opts) = defaults();

        let outcome = fill_workbook(&mut wb, &ds, &months, &opts);
        assert_eq!(
            outcome.skipped,
            vec![SkippedYear { year: 2020, reason: SkipReason::TooFewRows { rows: 0 } }]
        );
        assert_eq!(outcome.stats, FillStats::default());
    }

    #[test]
    fn repeated_cells_expand_before_writes() {
        // Data row encodes DI + name + three identical empty month cells
        // as one repeated cell. Only January must be written.
        let ds = dataset_with(2020, Month::January, &[("CP Test", "80%")]);
        let mut sheet = Sheet::new("2020");
        sheet.rows.push(Row::new(vec![
            Cell::new("DI"),
            Cell::new("Etablissement"),
            Cell::new("Janvier"),
            Cell::new("Février"),
            Cell::new("Mars"),
        ]));
        sheet.rows.push(Row::new(vec![
            Cell::new(""),
            Cell::new("CP Test"),
            Cell::repeated("", 3),
        ]));
        let mut wb = Workbook { sheets: vec![sheet] };
        let (months, opts) = defaults();

        let outcome = fill_workbook(&mut wb, &ds, &months, &opts);
        let row = &wb.sheet("2020").unwrap().rows[1];
        assert_eq!(row.cells.len(), 5);
        assert_eq!(row.cells[2].text, "80%");
        // February and March stayed independent of the January write.
        assert_eq!(row.cells[3].text, "");
        assert_eq!(row.cells[4].text, "");
        assert_eq!(outcome.stats.filled, 1);
    }

    #[test]
    fn repeated_header_cells_keep_mapping_column_accurate() {
        // Two empty header cells before the months are stored as one
        // repeated cell; January is addressable column 3.
        let ds = dataset_with(2020, Month::January, &[("CP Test", "80%")]);
        let mut sheet = Sheet::new("2020");
        sheet.rows.push(Row::new(vec![
            Cell::new("DI"),
            Cell::repeated("", 2),
            Cell::new("Janvier"),
        ]));
        sheet.rows.push(Row::new(vec![
            Cell::new(""),
            Cell::new("CP Test"),
            Cell::new(""),
            Cell::new(""),
        ]));
        let mut wb = Workbook { sheets: vec![sheet] };
        let (months, opts) = defaults();

        fill_workbook(&mut wb, &ds, &months, &opts);
        assert_eq!(wb.sheet("2020").unwrap().rows[1].cells[3].text, "80%");
    }

    #[test]
    fn rows_with_empty_entity_name_are_skipped() {
        let ds = dataset_with(2020, Month::January, &[("CP Test", "80%")]);
        let mut wb = sheet_2020(vec![Row::new(vec![
            Cell::new("DI Sud"),
            Cell::new("   "),
            Cell::new(""),
            Cell::new(""),
        ])]);
        let (months, opts) = defaults();

        let outcome = fill_workbook(&mut wb, &ds, &months, &opts);
        assert_eq!(outcome.stats, FillStats::default());
        assert_eq!(wb.sheet("2020").unwrap().rows[1].cells[2].text, "");
    }
}
