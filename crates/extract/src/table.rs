use occufill_core::config::ExtractConfig;
use occufill_core::dataset::PeriodTable;
use occufill_core::normalize;

/// Markers locating the occupancy table in a bulletin's layout text.
#[derive(Debug, Clone)]
pub struct TableMarkers {
    pub title: String,
    pub caption: String,
    pub value_column: String,
    /// Normalized prefixes for aggregate rows and header echoes.
    skip_keys: Vec<String>,
}

impl TableMarkers {
    pub fn from_config(config: &ExtractConfig) -> Self {
        Self {
            title: config.title_marker.clone(),
            caption: config.caption_marker.clone(),
            value_column: config.value_column_marker.clone(),
            skip_keys: config.skip_prefixes.iter().map(|p| normalize(p)).collect(),
        }
    }

    fn is_skipped(&self, name: &str) -> bool {
        let key = normalize(name);
        key.is_empty() || self.skip_keys.iter().any(|p| key.starts_with(p.as_str()))
    }
}

/// Scan `pdftotext -layout` output for the marked table and pair
/// establishment names with the value column, line by line.
///
/// Pages are form-feed separated. The first page containing both the
/// title and the caption is parsed; the value column's character offset
/// comes from the header line containing the column marker. Stacked
/// multi-line table cells arrive as separate physical lines, so per-line
/// pairing keeps names and values aligned. No matching page or
/// table yields an empty table.
pub fn parse_period_table(text: &str, markers: &TableMarkers) -> PeriodTable {
    for page in text.split('\u{000C}') {
        // Typographic apostrophes would defeat exact marker search
        // ("Taux d'occupation"); folding them is count-preserving so
        // column offsets stay valid.
        let page = page.replace('\u{2019}', "'");
        if !(page.contains(&markers.title) && page.contains(&markers.caption)) {
            continue;
        }
        let table = parse_page(&page, markers);
        if !table.is_empty() {
            return table;
        }
    }
    PeriodTable::new()
}

fn parse_page(page: &str, markers: &TableMarkers) -> PeriodTable {
    let mut table = PeriodTable::new();

    let mut lines = page.lines();
    let mut column: Option<(usize, usize)> = None;
    for line in lines.by_ref() {
        if let Some(byte_idx) = line.find(&markers.value_column) {
            let start = line[..byte_idx].chars().count();
            column = Some((start, start + markers.value_column.chars().count()));
            break;
        }
    }
    let Some((col_start, col_end)) = column else {
        return table;
    };

    for line in lines {
        let segments = segment_line(line);
        if segments.len() < 2 {
            continue;
        }
        let (name_start, name) = &segments[0];
        if *name_start >= col_start {
            // No left-column name on this line.
            continue;
        }
        let Some(value) = value_in_column(&segments, col_start, col_end) else {
            continue;
        };
        if markers.is_skipped(name) {
            continue;
        }
        table.insert(name.clone(), value.to_string());
    }

    table
}

/// Split a layout line into `(char_start, text)` segments separated by
/// runs of two or more spaces. Single spaces stay inside a segment.
fn segment_line(line: &str) -> Vec<(usize, String)> {
    let chars: Vec<char> = line.chars().collect();
    let n = chars.len();
    let mut segments = Vec::new();
    let mut i = 0;
    while i < n {
        if chars[i].is_whitespace() {
            i += 1;
            continue;
        }
        let start = i;
        let mut last = i;
        let mut j = i + 1;
        while j < n {
            if chars[j].is_whitespace() {
                let mut k = j;
                while k < n && chars[k].is_whitespace() {
                    k += 1;
                }
                if k - j >= 2 || k >= n {
                    break;
                }
                j = k;
            } else {
                last = j;
                j += 1;
            }
        }
        segments.push((start, chars[start..=last].iter().collect()));
        i = j;
    }
    segments
}

/// The segment (name column excluded) whose span best overlaps the value
/// column's header region, with a small slack for ragged alignment.
fn value_in_column(segments: &[(usize, String)], col_start: usize, col_end: usize) -> Option<&str> {
    const SLACK: usize = 3;
    let lo = col_start.saturating_sub(SLACK);
    let hi = col_end + SLACK;

    let mut best: Option<(usize, &str)> = None;
    for (start, text) in segments.iter().skip(1) {
        let end = start + text.chars().count();
        if *start >= hi || end <= lo {
            continue;
        }
        let overlap = end.min(hi) - (*start).max(lo);
        if best.map_or(true, |(b, _)| overlap > b) {
            best = Some((overlap, text.as_str()));
        }
    }
    best.map(|(_, t)| t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn markers() -> TableMarkers {
        TableMarkers::from_config(&ExtractConfig::default())
    }

    const PAGE: &str = "\
Statistique mensuelle des personnes écrouées

Tableau 29 - Répartition des mineurs détenus par établissement

Etablissement                        Places    Détenus   Taux d'occupation
CP Bordeaux-Gradignan                    20         19               96,0%
EPM Orvault                              60         38               64,0%
MA Lyon Corbas                           25         19               77,0%
Ensemble de la DI Sud                   105         76               72,4%
";

    #[test]
    fn parses_marked_page() {
        let table = parse_period_table(PAGE, &markers());
        let entries = table.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0], ("CP Bordeaux-Gradignan".to_string(), "96,0%".to_string()));
        assert_eq!(entries[1].0, "EPM Orvault");
        assert_eq!(entries[2], ("MA Lyon Corbas".to_string(), "77,0%".to_string()));
    }

    #[test]
    fn aggregate_rows_are_dropped() {
        let table = parse_period_table(PAGE, &markers());
        assert!(table.names().all(|n| !n.starts_with("Ensemble")));
    }

    #[test]
    fn page_without_markers_yields_empty_table() {
        let text = "Tableau 12 - Autre chose\nCP Test   10   5   50%\n";
        assert!(parse_period_table(text, &markers()).is_empty());
    }

    #[test]
    fn title_without_caption_is_not_enough() {
        let text = "Tableau 29 - autre répartition\nCP Test   10   5   50%\n";
        assert!(parse_period_table(text, &markers()).is_empty());
    }

    #[test]
    fn scans_past_unrelated_pages() {
        let text = format!("Page de garde\nSommaire\n\u{000C}{PAGE}");
        let table = parse_period_table(&text, &markers());
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn typographic_apostrophe_in_header_is_folded() {
        let page = PAGE.replace("Taux d'occupation", "Taux d\u{2019}occupation");
        let table = parse_period_table(&page, &markers());
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn first_occurrence_wins_on_duplicate_names() {
        let page = format!("{PAGE}CP Bordeaux-Gradignan                    20         19               10,0%\n");
        let table = parse_period_table(&page, &markers());
        assert_eq!(table.entries()[0].1, "96,0%");
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn lines_without_value_segment_are_skipped() {
        let page = format!("{PAGE}Quartier mineurs (suite)\n");
        let table = parse_period_table(&page, &markers());
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn segment_line_offsets_and_inner_spaces() {
        let segs = segment_line("CP Lyon Corbas        25   19    77,0%");
        assert_eq!(segs[0], (0, "CP Lyon Corbas".to_string()));
        assert_eq!(segs.len(), 4);
        assert_eq!(segs[3].1, "77,0%");
    }

    #[test]
    fn segment_line_empty_and_blank() {
        assert!(segment_line("").is_empty());
        assert!(segment_line("      ").is_empty());
    }
}
