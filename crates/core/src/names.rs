//! Author list normalization to `firstname(s) lastname` order.
//!
//! This is a heuristic tuned for BibTeX `author`/`editor` fields, not a
//! general name parser. The rule order below is fixed: output for a given
//! input must not change between runs.

use crate::text::clean_str;

const SEPARATOR: &str = " and ";
const SUFFIXES: [&str; 3] = ["jnr", "jr", "junior"];
const PARTICLES: [&str; 6] = ["ben", "van", "der", "de", "la", "le"];

/// Splits a raw author list and reorders every name.
///
/// # Examples
///
/// ```
/// use bibmark_core::names::normalize_authors;
///
/// assert_eq!(
///     normalize_authors("Doe, Jane and Smith, John"),
///     vec!["Jane Doe", "John Smith"]
/// );
/// ```
pub fn normalize_authors(raw: &str) -> Vec<String> {
    raw.replace(['\n', '\r'], " ")
        .split(SEPARATOR)
        .filter_map(normalize_name)
        .collect()
}

/// [`normalize_authors`] followed by [`clean_str`] on every name.
pub fn normalize_author_field(raw: &str) -> Vec<String> {
    normalize_authors(raw)
        .iter()
        .map(|name| clean_str(name))
        .collect()
}

/// Reorders a single name. Returns `None` for blank entries.
pub fn normalize_name(entry: &str) -> Option<String> {
    let entry = entry.trim();
    if entry.is_empty() {
        return None;
    }

    let (mut last_name, mut first_names) = match entry.split_once(',') {
        Some((last, rest)) => (
            last.trim().to_string(),
            rest.split_whitespace().map(str::to_string).collect::<Vec<_>>(),
        ),
        None => {
            let mut tokens: Vec<&str> = entry.split_whitespace().collect();
            let last = tokens.pop().unwrap_or_default().to_string();
            (last, tokens.into_iter().map(space_initials).collect())
        }
    };

    if is_suffix(&last_name)
        && let Some(previous) = first_names.pop()
    {
        last_name = previous;
    }

    let (particles, rest): (Vec<String>, Vec<String>) = first_names
        .into_iter()
        .partition(|token| PARTICLES.contains(&token.as_str()));
    first_names = rest;
    if !particles.is_empty() {
        last_name = format!("{} {}", particles.join(" "), last_name);
    }

    let name = format!("{} {}", first_names.join(" "), last_name);
    Some(name.trim().to_string())
}

/// `J.R.` becomes `J. R.`.
fn space_initials(token: &str) -> String {
    token.replace('.', ". ").trim().to_string()
}

fn is_suffix(token: &str) -> bool {
    let token = token.trim_end_matches('.').to_lowercase();
    SUFFIXES.contains(&token.as_str())
}
