//! Canonicalization of arXiv paper identifiers.
//!
//! Raw spellings arrive in three forms: bare numeric IDs ("2309.00071"),
//! prefixed IDs ("ARXIV:2309.00071" / "arXiv:2309.00071"), and full URLs
//! ("https://arxiv.org/abs/2309.00071"). All of them normalize to the single
//! canonical form "ARXIV:<id>" used everywhere else in the pipeline.

use regex::Regex;

/// Fixed source prefix of the canonical form.
pub const ARXIV_PREFIX: &str = "ARXIV:";

/// Normalize any accepted raw spelling into the canonical "ARXIV:<id>" form.
///
/// Pure and idempotent: canonical input comes back unchanged, and every
/// spelling of the same paper yields the identical output. Returns `None`
/// when no recognized pattern matches. Only whole-token numeric IDs are
/// accepted; an ID embedded in a longer digit run does not match.
pub fn canonicalize(input: &str) -> Option<String> {
    let input = input.trim();

    let patterns = [
        // Prefixed: ARXIV:2309.00071, arXiv:2309.00071
        r"^(?:ARXIV|arXiv):(\d{4}\.\d{4,5})$",
        // URL: arxiv.org/abs/2309.00071, arxiv.org/pdf/2309.00071
        r"arxiv\.org/(?:abs|pdf)/(\d{4}\.\d{4,5})(?:[^0-9]|$)",
        // Bare numeric ID
        r"^(\d{4}\.\d{4,5})$",
    ];

    for pattern in patterns {
        if let Ok(re) = Regex::new(pattern) {
            if let Some(caps) = re.captures(input) {
                if let Some(m) = caps.get(1) {
                    return Some(format!("{}{}", ARXIV_PREFIX, m.as_str()));
                }
            }
        }
    }
    None
}

/// The numeric portion of a canonical identifier: "ARXIV:2309.00071" ->
/// "2309.00071". Association matching and URL reconstruction both work on
/// this portion.
pub fn numeric_portion(canonical: &str) -> &str {
    canonical.strip_prefix(ARXIV_PREFIX).unwrap_or(canonical)
}

/// Reconstruct the abstract-page URL for a canonical identifier.
pub fn arxiv_abs_url(canonical: &str) -> String {
    format!("https://arxiv.org/abs/{}", numeric_portion(canonical))
}
