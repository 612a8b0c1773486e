/// Characters that always become the hyphen delimiter.
const BAD_SYMBOLS: [char; 3] = ['.', '_', ':'];
const DELIMITER: char = '-';

/// Knobs for [`slugify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlugOptions {
    /// Also turn spaces into hyphens (otherwise they are dropped).
    pub replace_spaces: bool,
    /// Remove a single trailing hyphen left after collapsing.
    pub strip_trailing: bool,
    /// Lowercase the result.
    pub lowercase: bool,
}

impl Default for SlugOptions {
    fn default() -> Self {
        Self {
            replace_spaces: false,
            strip_trailing: false,
            lowercase: true,
        }
    }
}

/// Turns a citation key or title into a directory-safe slug.
///
/// Steps, in order:
/// 1. `.`, `_`, `:` (and spaces when configured) become `-`
/// 2. a `-` is inserted at every digit/non-digit transition
/// 3. a `-` is inserted before an uppercase letter that follows a lowercase
///    one, or that starts a capitalized word after an acronym (`XMLParser`)
/// 4. everything that is not alphanumeric or `-` is dropped
/// 5. runs of `-` collapse into one (optionally a trailing `-` is removed)
/// 6. the result is lowercased (optional)
///
/// The function is total: an empty input, or an input made only of
/// punctuation, yields an empty slug. Callers decide whether that is an error.
///
/// # Examples
///
/// ```
/// use bibmark_core::slug::{SlugOptions, slugify};
///
/// let options = SlugOptions::default();
/// assert_eq!(slugify("Smith2020", &options), "smith-2020");
/// assert_eq!(slugify("CamelCase.Name", &options), "camel-case-name");
/// ```
pub fn slugify(text: &str, options: &SlugOptions) -> String {
    let mut delimited = String::with_capacity(text.len() + 8);
    let mut prev: Option<char> = None;

    let mut chars = text
        .chars()
        .map(|ch| {
            if BAD_SYMBOLS.contains(&ch) || (options.replace_spaces && ch == ' ') {
                DELIMITER
            } else {
                ch
            }
        })
        .peekable();

    while let Some(ch) = chars.next() {
        if let Some(p) = prev {
            let digit_boundary = p.is_ascii_digit() != ch.is_ascii_digit();
            let camel_boundary = p.is_lowercase() && ch.is_uppercase();
            let acronym_boundary =
                ch.is_uppercase() && chars.peek().is_some_and(|next| next.is_lowercase());
            if digit_boundary || camel_boundary || acronym_boundary {
                delimited.push(DELIMITER);
            }
        }
        delimited.push(ch);
        prev = Some(ch);
    }

    let mut slug = String::with_capacity(delimited.len());
    for ch in delimited.chars() {
        if ch == DELIMITER {
            if !slug.ends_with(DELIMITER) {
                slug.push(DELIMITER);
            }
        } else if ch.is_alphanumeric() {
            slug.push(ch);
        }
        // All other characters (punctuation, whitespace, symbols) are silently dropped
    }

    if options.strip_trailing && slug.ends_with(DELIMITER) {
        slug.pop();
    }

    if options.lowercase {
        slug = slug.to_lowercase();
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slug(text: &str) -> String {
        slugify(text, &SlugOptions::default())
    }

    #[test]
    fn key_with_year() {
        assert_eq!(slug("Smith2020"), "smith-2020");
    }

    #[test]
    fn camel_case_and_dot() {
        assert_eq!(slug("CamelCase.Name"), "camel-case-name");
    }

    #[test]
    fn consecutive_separators_collapse() {
        assert_eq!(slug("a..b"), "a-b");
        assert_eq!(slug("a_:_b"), "a-b");
    }

    #[test]
    fn empty_input_gives_empty_slug() {
        assert_eq!(slug(""), "");
        assert_eq!(slug("{}!?"), "");
    }

    #[test]
    fn spaces_dropped_unless_configured() {
        assert_eq!(slug("deep learning"), "deeplearning");
        let options = SlugOptions {
            replace_spaces: true,
            ..SlugOptions::default()
        };
        assert_eq!(slugify("deep learning", &options), "deep-learning");
    }

    #[test]
    fn trailing_hyphen_kept_by_default() {
        assert_eq!(slug("doe2019:"), "doe-2019-");
        let options = SlugOptions {
            strip_trailing: true,
            ..SlugOptions::default()
        };
        assert_eq!(slugify("doe2019:", &options), "doe-2019");
    }

    #[test]
    fn case_preserved_when_not_lowercasing() {
        let options = SlugOptions {
            lowercase: false,
            ..SlugOptions::default()
        };
        assert_eq!(slugify("vanDerBerg2001a", &options), "van-Der-Berg-2001-a");
    }

    #[test]
    fn deterministic() {
        let first = slug("Knuth:1984:LP");
        assert_eq!(first, slug("Knuth:1984:LP"));
        assert_eq!(first, "knuth-1984-lp");
    }

    #[test]
    fn citation_key_cases() {
        let cases: Vec<(&str, &str)> = vec![
            ("Doe2019", "doe-2019"),
            ("doe_2019_deep", "doe-2019-deep"),
            ("doe2019deep", "doe-2019-deep"),
            ("DOE2019", "doe-2019"),
            ("arXiv:2101.00001", "ar-xiv-2101-00001"),
            ("10.1145/3292500.3330701", "10-1145-3292500-3330701"),
            ("Müller2018", "müller-2018"),
            ("van-der-Berg", "van-der-berg"),
            ("--lead", "-lead"),
            ("Smith 2020a", "smith-2020-a"),
            ("IEEEAccess2020", "ieee-access-2020"),
            ("XMLParser", "xml-parser"),
            ("ACMTrans", "acm-trans"),
            ("Xu2021", "xu-2021"),
        ];

        for (input, expected) in &cases {
            let actual = slug(input);
            assert_eq!(
                &actual, expected,
                "Mismatch for {:?}: got {:?}, expected {:?}",
                input, actual, expected
            );
        }
    }
}
