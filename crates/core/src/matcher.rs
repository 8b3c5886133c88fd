use crate::dataset::PeriodTable;
use crate::normalize::normalize;

/// Whether two already-normalized keys qualify as a fuzzy match: equal, or
/// one contains the other. Empty keys match only each other (an empty
/// string is a substring of everything, which is never what a caller
/// means).
pub fn keys_match(a: &str, b: &str) -> bool {
    if a.is_empty() || b.is_empty() {
        return a == b;
    }
    a == b || a.contains(b) || b.contains(a)
}

/// Find the value for `target` among ordered candidates.
///
/// The target is normalized once; candidates are walked in their given
/// order and the first qualifying one wins. Candidate order is therefore
/// the tie-break between multiple plausible matches, which is why
/// [`PeriodTable`] preserves document order.
pub fn find<'a>(target: &str, candidates: &'a PeriodTable) -> Option<&'a str> {
    let target_key = normalize(target);
    candidates
        .entries()
        .iter()
        .find(|(name, _)| keys_match(&target_key, &normalize(name)))
        .map(|(_, value)| value.as_str())
}
