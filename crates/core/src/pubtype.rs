//! Publication-type taxonomy for BibTeX entry types.

/// Publication types understood by the site theme.
///
/// The discriminants are the codes written to `publication_types`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PublicationType {
    /// Anything without a dedicated type (`misc`, `proceedings`, unknown tags).
    Uncategorized = 0,
    /// `inproceedings`
    ConferencePaper = 1,
    /// `article`
    JournalArticle = 2,
    /// `unpublished`
    Preprint = 3,
    /// `techreport`, `manual`
    Report = 4,
    /// `book`
    Book = 5,
    /// `inbook`, `incollection`
    BookSection = 6,
    /// `phdthesis`, `mastersthesis`
    Thesis = 7,
    /// `patent`
    Patent = 8,
}

impl PublicationType {
    /// Maps an entry-type tag (case-insensitive) to its publication type.
    ///
    /// # Examples
    ///
    /// ```
    /// use bibmark_core::pubtype::PublicationType;
    ///
    /// assert_eq!(PublicationType::classify("article").code(), 2);
    /// assert_eq!(PublicationType::classify("dataset"), PublicationType::Uncategorized);
    /// ```
    pub fn classify(entry_type: &str) -> Self {
        match entry_type.trim().to_lowercase().as_str() {
            "article" => Self::JournalArticle,
            "book" => Self::Book,
            "inbook" | "incollection" => Self::BookSection,
            "inproceedings" => Self::ConferencePaper,
            "manual" | "techreport" => Self::Report,
            "mastersthesis" | "phdthesis" => Self::Thesis,
            "unpublished" => Self::Preprint,
            "patent" => Self::Patent,
            "misc" | "proceedings" => Self::Uncategorized,
            _ => Self::Uncategorized,
        }
    }

    /// Numeric code written to the front matter.
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl std::fmt::Display for PublicationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Maps an entry-type tag to a CSL item type.
///
/// Unknown tags fall back to the generic `article` CSL type.
pub fn csl_type(entry_type: &str) -> &'static str {
    match entry_type.trim().to_lowercase().as_str() {
        "article" => "article-journal",
        "book" | "manual" | "proceedings" => "book",
        "conference" | "inproceedings" => "paper-conference",
        "inbook" | "incollection" => "chapter",
        "mastersthesis" | "phdthesis" | "thesis" => "thesis",
        "patent" => "patent",
        "report" | "techreport" => "report",
        "unpublished" => "manuscript",
        _ => "article",
    }
}

/// Which taxonomy is written to `publication_types`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PubTypeScheme {
    /// Numeric codes from [`PublicationType`].
    #[default]
    Numeric,
    /// CSL item types from [`csl_type`].
    Csl,
}

impl PubTypeScheme {
    /// Renders the publication type of an entry-type tag under this scheme.
    pub fn render(self, entry_type: &str) -> String {
        match self {
            PubTypeScheme::Numeric => PublicationType::classify(entry_type).to_string(),
            PubTypeScheme::Csl => csl_type(entry_type).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_complete() {
        let cases: Vec<(&str, u8)> = vec![
            ("article", 2),
            ("book", 5),
            ("inbook", 6),
            ("incollection", 6),
            ("inproceedings", 1),
            ("manual", 4),
            ("mastersthesis", 7),
            ("misc", 0),
            ("proceedings", 0),
            ("phdthesis", 7),
            ("techreport", 4),
            ("unpublished", 3),
            ("patent", 8),
        ];

        for (tag, expected) in &cases {
            let actual = PublicationType::classify(tag).code();
            assert_eq!(
                actual, *expected,
                "Mismatch for {:?}: got {}, expected {}",
                tag, actual, expected
            );
        }
    }

    #[test]
    fn unknown_tags_are_uncategorized() {
        for tag in ["dataset", "online", "", "conference", "software"] {
            assert_eq!(
                PublicationType::classify(tag),
                PublicationType::Uncategorized
            );
        }
    }

    #[test]
    fn classification_ignores_case() {
        assert_eq!(
            PublicationType::classify("PhdThesis"),
            PublicationType::Thesis
        );
    }

    #[test]
    fn display_is_numeric_code() {
        assert_eq!(PublicationType::JournalArticle.to_string(), "2");
        assert_eq!(PublicationType::Patent.to_string(), "8");
    }

    #[test]
    fn schemes_render_codes_or_csl_types() {
        assert_eq!(PubTypeScheme::Numeric.render("article"), "2");
        assert_eq!(PubTypeScheme::Csl.render("article"), "article-journal");
        assert_eq!(PubTypeScheme::Csl.render("conference"), "paper-conference");
        assert_eq!(PubTypeScheme::Csl.render("dataset"), "article");
    }
}
