//! Text helpers for ids, summaries, and prompt snippets.

use crate::constants::ELLIPSIS;

/// Collapse runs of whitespace and truncate to `limit` characters.
///
/// Truncated text keeps `limit - 3` characters followed by `"..."`, so the
/// result never exceeds `limit` characters.
pub fn summarize_text(text: &str, limit: usize) -> String {
    let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if normalized.chars().count() <= limit {
        return normalized;
    }
    let keep = limit.saturating_sub(ELLIPSIS.chars().count());
    let mut out: String = normalized.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}

/// Lowercase slug: alphanumeric runs (any script) joined by single dashes.
/// Returns `"node"` when nothing alphanumeric remains.
pub fn slugify(value: &str) -> String {
    let lowered = value.to_lowercase();
    let slug = lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    if slug.is_empty() {
        "node".to_string()
    } else {
        slug
    }
}

/// Trimmed length in characters.
pub fn trimmed_len(text: &str) -> usize {
    text.trim().chars().count()
}
