use serde::{Deserialize, Serialize};

/// One grid cell: a single text value, possibly standing for `repeat`
/// identical adjacent columns (the ODS run-length encoding). A repeated
/// cell must be expanded before any positional write, otherwise the write
/// would silently hit its siblings too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub text: String,
    pub repeat: usize,
}

impl Cell {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), repeat: 1 }
    }

    pub fn repeated(text: impl Into<String>, repeat: usize) -> Self {
        Self { text: text.into(), repeat: repeat.max(1) }
    }

    /// Empty after trimming, the emptiness test the fill policy uses.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub cells: Vec<Cell>,
}

impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    /// Addressable column count, counting repeats.
    pub fn width(&self) -> usize {
        self.cells.iter().map(|c| c.repeat).sum()
    }

    /// Decompress the run-length encoding: every cell with `repeat == n`
    /// becomes `n` independently owned cells with `repeat == 1`, inserted
    /// in place so later indexing is column-accurate.
    pub fn expand_repeats(&mut self) {
        if self.cells.iter().all(|c| c.repeat == 1) {
            return;
        }
        let mut expanded = Vec::with_capacity(self.width());
        for cell in self.cells.drain(..) {
            let n = cell.repeat;
            for _ in 1..n {
                expanded.push(Cell::new(cell.text.clone()));
            }
            expanded.push(Cell { repeat: 1, ..cell });
        }
        self.cells = expanded;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Row>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), rows: Vec::new() }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn sheet_mut(&mut self, name: &str) -> Option<&mut Sheet> {
        self.sheets.iter_mut().find(|s| s.name == name)
    }
}
