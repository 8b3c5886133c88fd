use std::collections::HashSet;

use serde::Serialize;

use occufill_core::normalize;

/// One near-match candidate for an unmatched name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub name: String,
    pub shared_words: usize,
}

/// Rank candidates by how many normalized words they share with the
/// target. Candidates are considered in encounter order and the sort is
/// stable, so ties keep that order. Zero-overlap candidates are dropped.
pub fn word_overlap(target: &str, candidates: &[String], limit: usize) -> Vec<Suggestion> {
    let target_words: HashSet<String> = normalize(target).split_whitespace().map(str::to_string).collect();
    if target_words.is_empty() {
        return Vec::new();
    }

    let mut out: Vec<Suggestion> = Vec::new();
    for candidate in candidates {
        let shared = normalize(candidate)
            .split_whitespace()
            .filter(|w| target_words.contains(*w))
            .collect::<HashSet<_>>()
            .len();
        if shared > 0 {
            out.push(Suggestion { name: candidate.clone(), shared_words: shared });
        }
    }
    out.sort_by(|a, b| b.shared_words.cmp(&a.shared_words));
    out.truncate(limit);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn ranks_by_shared_word_count() {
        let candidates = names(&[
            "MA Lyon",
            "CP Lyon-Corbas",
            "CP Marseille",
        ]);
        let got = word_overlap("CP Lyon Corbas", &candidates, 3);
        assert_eq!(got[0].name, "CP Lyon-Corbas");
        assert_eq!(got[0].shared_words, 3);
        assert_eq!(got[1].name, "MA Lyon");
        assert_eq!(got[1].shared_words, 1);
        assert_eq!(got[2].name, "CP Marseille");
        assert_eq!(got[2].shared_words, 1);
    }

    #[test]
    fn ties_keep_encounter_order() {
        let candidates = names(&["MA Lyon", "CP Paris", "EPM Lyon"]);
        let got = word_overlap("quartier Lyon Paris", &candidates, 3);
        // All share exactly one word; encounter order is preserved.
        let got_names: Vec<&str> = got.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(got_names, ["MA Lyon", "CP Paris", "EPM Lyon"]);
    }

    #[test]
    fn zero_overlap_dropped_and_limit_applied() {
        let candidates = names(&["MA Brest", "MA Lyon", "CP Lyon-Corbas", "EPM Lyon"]);
        let got = word_overlap("Lyon", &candidates, 2);
        assert_eq!(got.len(), 2);
        assert!(got.iter().all(|s| s.name.contains("Lyon")));
    }

    #[test]
    fn duplicate_words_count_once() {
        let candidates = names(&["Lyon Lyon Lyon"]);
        let got = word_overlap("Lyon", &candidates, 3);
        assert_eq!(got[0].shared_words, 1);
    }

    #[test]
    fn empty_target_has_no_suggestions() {
        let candidates = names(&["MA Lyon"]);
        assert!(word_overlap("  ", &candidates, 3).is_empty());
    }
}
