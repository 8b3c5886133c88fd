use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Canonicalize an establishment name into a comparable key.
///
/// NFD-decompose and drop combining marks, lowercase, turn hyphens and
/// underscores into spaces, collapse whitespace runs, and drop every
/// character that is not a letter, digit, or space. Punctuation is dropped
/// without leaving a gap, so the result is a fixed point:
/// `normalize(normalize(s)) == normalize(s)`.
pub fn normalize(name: &str) -> String {
    let stripped: String = name.nfd().filter(|c| !is_combining_mark(*c)).collect();
    let lowered = stripped.to_lowercase();

    let mut out = String::with_capacity(lowered.len());
    let mut pending_space = false;
    for c in lowered.chars() {
        let c = if c == '-' || c == '_' { ' ' } else { c };
        if c.is_whitespace() {
            if !out.is_empty() {
                pending_space = true;
            }
        } else if c.is_alphanumeric() {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(c);
        }
        // Anything else (punctuation, symbols) is dropped.
    }
    out
}
