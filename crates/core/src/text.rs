//! String cleanup shared by every front-matter field.

/// Case policy for keyword normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagCase {
    /// Lowercase everything, then uppercase the first character (ASCII only).
    Ascii,
    /// Same rule with full Unicode case mapping.
    #[default]
    Unicode,
}

impl TagCase {
    /// Applies the policy to a single tag.
    pub fn apply(self, tag: &str) -> String {
        match self {
            TagCase::Ascii => {
                let mut out = tag.to_ascii_lowercase();
                if let Some(first) = out.get_mut(0..1) {
                    first.make_ascii_uppercase();
                }
                out
            }
            TagCase::Unicode => {
                let mut chars = tag.chars();
                match chars.next() {
                    Some(first) => first
                        .to_uppercase()
                        .chain(chars.as_str().to_lowercase().chars())
                        .collect(),
                    None => String::new(),
                }
            }
        }
    }
}

/// Cleans a raw BibTeX value so it fits on one line of a quoted scalar.
///
/// Backslashes are removed, double quotes escaped, braces dropped, tabs and
/// newlines turned into spaces and carriage returns removed.
pub fn clean_str(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '\\' | '{' | '}' | '\r' => {}
            '"' => out.push_str("\\\""),
            '\t' | '\n' => out.push(' '),
            _ => out.push(ch),
        }
    }
    out
}

/// Splits a `keywords` field into tags.
///
/// The field is cleaned, split on commas and each tag trimmed; empty tags are
/// dropped. With a case policy every tag is normalized to
/// `Capitalized-first lowercase-rest`.
pub fn split_tags(raw: &str, case: Option<TagCase>) -> Vec<String> {
    clean_str(raw)
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(|tag| match case {
            Some(policy) => policy.apply(tag),
            None => tag.to_string(),
        })
        .collect()
}
