use serde::{Serialize, Serializer};

use crate::normalize::normalize;

/// One calendar month. The year dimension lives on the containing sheet
/// or dataset level, never here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// 1-based month number.
    pub fn number(self) -> u32 {
        self as u32 + 1
    }

    /// Canonical (French, accent-free) name used in output.
    pub fn canonical_name(self) -> &'static str {
        match self {
            Month::January => "janvier",
            Month::February => "fevrier",
            Month::March => "mars",
            Month::April => "avril",
            Month::May => "mai",
            Month::June => "juin",
            Month::July => "juillet",
            Month::August => "aout",
            Month::September => "septembre",
            Month::October => "octobre",
            Month::November => "novembre",
            Month::December => "decembre",
        }
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.canonical_name())
    }
}

impl Serialize for Month {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.canonical_name())
    }
}

/// The twelve-entry month vocabulary used to recognize sheet headers and
/// filename segments. Defaults to the canonical French names; callers may
/// supply their own twelve names via config.
#[derive(Debug, Clone)]
pub struct MonthNames {
    names: [String; 12],
}

impl Default for MonthNames {
    fn default() -> Self {
        let names = Month::ALL.map(|m| m.canonical_name().to_string());
        Self { names }
    }
}

impl MonthNames {
    /// Build from exactly twelve names, January first.
    pub fn from_names(names: Vec<String>) -> Option<Self> {
        let names: [String; 12] = names.try_into().ok()?;
        Some(Self { names })
    }

    pub fn name(&self, month: Month) -> &str {
        &self.names[month as usize]
    }

    /// Match a raw header or filename segment against the vocabulary.
    /// Case- and diacritic-insensitive exact match ("Août" parses with the
    /// accent-free default vocabulary).
    pub fn parse(&self, raw: &str) -> Option<Month> {
        let key = normalize(raw);
        if key.is_empty() {
            return None;
        }
        Month::ALL
            .into_iter()
            .find(|&m| normalize(self.name(m)) == key)
    }
}
