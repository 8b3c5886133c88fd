use std::collections::BTreeMap;

use serde::Serialize;

use crate::month::Month;
use crate::normalize::normalize;

/// Ordered `(name, value)` pairs extracted from one document's table.
///
/// Order is the fuzzy matcher's tie-break: the first qualifying candidate
/// wins, so tables are assembled in document order and kept as a `Vec`,
/// never a hash map. The first occurrence of a normalized duplicate name
/// wins on insert.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct PeriodTable {
    entries: Vec<(String, String)>,
}

impl PeriodTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a pair unless a normalized duplicate of `name` is already
    /// present. Returns whether the pair was kept.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> bool {
        let name = name.into();
        let key = normalize(&name);
        if self.entries.iter().any(|(n, _)| normalize(n) == key) {
            return false;
        }
        self.entries.push((name, value.into()));
        true
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, String)> for PeriodTable {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (name, value) in iter {
            table.insert(name, value);
        }
        table
    }
}

/// Everything extracted from one batch run: `year -> month -> table`.
/// Built incrementally while scanning documents, read-only once the fill
/// pass starts.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ExtractedDataset {
    years: BTreeMap<i32, BTreeMap<Month, PeriodTable>>,
}

impl ExtractedDataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a table for (year, month). A later table for the same slot
    /// replaces the earlier one.
    pub fn insert_table(&mut self, year: i32, month: Month, table: PeriodTable) {
        self.years.entry(year).or_default().insert(month, table);
    }

    pub fn table(&self, year: i32, month: Month) -> Option<&PeriodTable> {
        self.years.get(&year)?.get(&month)
    }

    pub fn years(&self) -> impl Iterator<Item = (i32, &BTreeMap<Month, PeriodTable>)> {
        self.years.iter().map(|(y, m)| (*y, m))
    }

    pub fn has_year(&self, year: i32) -> bool {
        self.years.contains_key(&year)
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_occurrence_wins() {
        let mut table = PeriodTable::new();
        assert!(table.insert("CP Bordeaux-Gradignan", "96%"));
        // Same name after normalization
        assert!(!table.insert("cp bordeaux gradignan", "12%"));
        assert_eq!(table.len(), 1);
        assert_eq!(table.entries()[0].1, "96%");
    }

    #[test]
    fn preserves_insertion_order() {
        let table: PeriodTable = [
            ("b".to_string(), "2".to_string()),
            ("a".to_string(), "1".to_string()),
            ("c".to_string(), "3".to_string()),
        ]
        .into_iter()
        .collect();
        let names: Vec<&str> = table.names().collect();
        assert_eq!(names, ["b", "a", "c"]);
    }

    #[test]
    fn later_table_replaces_slot() {
        let mut ds = ExtractedDataset::new();
        let mut t1 = PeriodTable::new();
        t1.insert("CP Test", "80%");
        let mut t2 = PeriodTable::new();
        t2.insert("CP Test", "85%");
        ds.insert_table(2020, Month::January, t1);
        ds.insert_table(2020, Month::January, t2);
        let table = ds.table(2020, Month::January).unwrap();
        assert_eq!(table.entries()[0].1, "85%");
    }
}
