//! Publication date resolution from `date`, `month` and `year` fields.

use crate::error::{RecordDiagnostics, RecordWarning};
use crate::record::BibliographicRecord;
use thiserror::Error;

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const DEFAULT_PART: &str = "01";

/// Errors emitted while converting month values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateError {
    /// The value is neither a 1-2 digit number nor a month name.
    #[error("unrecognized month '{0}'")]
    InvalidMonth(String),
}

/// Year, month and day of a publication.
///
/// `month` and `day` are always two digits; `year` is copied as found and may
/// be empty when the record carries no usable date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDate {
    /// Year as written in the record (may be empty).
    pub year: String,
    /// Two-digit month, `01` when unknown.
    pub month: String,
    /// Two-digit day, `01` when unknown.
    pub day: String,
}

impl Default for ResolvedDate {
    fn default() -> Self {
        Self {
            year: String::new(),
            month: DEFAULT_PART.to_string(),
            day: DEFAULT_PART.to_string(),
        }
    }
}

impl std::fmt::Display for ResolvedDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}-{}", self.year, self.month, self.day)
    }
}

/// Resolves the publication date of a record.
///
/// Priority:
/// 1. the `date` field (`YYYY`, `YYYY-MM` or `YYYY-MM-DD`, range end ignored)
/// 2. the `month` field, while the month is still the default `01`
/// 3. the `year` field, when no year was found so far
///
/// Problems are recorded in `diagnostics`; resolution always completes.
pub fn resolve_date(
    record: &BibliographicRecord,
    diagnostics: &mut RecordDiagnostics,
) -> ResolvedDate {
    let mut resolved = ResolvedDate::default();

    if let Some(date) = record.get("date") {
        let start = date.split('/').next().unwrap_or_default().trim();
        let parts: Vec<&str> = start.split('-').collect();
        match parts.as_slice() {
            [year, month, day] => {
                resolved.year = year.to_string();
                resolved.month = pad_two(month);
                resolved.day = pad_two(day);
            }
            [year, month] => {
                resolved.year = year.to_string();
                resolved.month = pad_two(month);
            }
            [year] => resolved.year = year.to_string(),
            _ => log::debug!(
                "Entry `{}`: ignoring unsupported date '{}'",
                record.id(),
                date
            ),
        }
    }

    if resolved.month == DEFAULT_PART
        && let Some(month) = record.get("month")
    {
        match month_to_number(month) {
            Ok(number) => resolved.month = number,
            Err(_) => diagnostics.add(RecordWarning::InvalidMonth {
                value: month.to_string(),
            }),
        }
    }

    if resolved.year.is_empty()
        && let Some(year) = record.get("year")
    {
        resolved.year = year.trim().to_string();
    }

    if resolved.year.is_empty() {
        diagnostics.add(RecordWarning::MissingYear);
    }

    resolved
}

/// Converts a BibTeX/BibLaTeX month value to a two-digit month number.
///
/// Values of one or two characters are taken as numbers and zero-padded
/// as-is (`"x"` becomes `"0x"`);
/// longer values are matched on their first three letters (`jan`,
/// `January`, `SEPT.` all work).
///
/// # Examples
///
/// ```
/// use bibmark_core::date::month_to_number;
///
/// assert_eq!(month_to_number("6").unwrap(), "06");
/// assert_eq!(month_to_number("September").unwrap(), "09");
/// assert!(month_to_number("Smarch").is_err());
/// ```
pub fn month_to_number(value: &str) -> Result<String, DateError> {
    let trimmed = value.trim();
    let invalid = || DateError::InvalidMonth(value.to_string());

    if trimmed.is_empty() {
        return Err(invalid());
    }
    if trimmed.chars().count() <= 2 {
        return Ok(format!("{:0>2}", trimmed));
    }

    let abbr = title_case(&trimmed.chars().take(3).collect::<String>());
    MONTH_ABBREVIATIONS
        .iter()
        .position(|m| *m == abbr)
        .map(|index| format!("{:02}", index + 1))
        .ok_or_else(invalid)
}

fn pad_two(part: &str) -> String {
    let part = part.trim();
    if part.len() == 1 && part.chars().all(|c| c.is_ascii_digit()) {
        format!("0{}", part)
    } else {
        part.to_string()
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.as_str().to_lowercase().chars())
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(record: &BibliographicRecord) -> (ResolvedDate, RecordDiagnostics) {
        let mut diagnostics = RecordDiagnostics::new(record.id());
        let date = resolve_date(record, &mut diagnostics);
        (date, diagnostics)
    }

    #[test]
    fn year_only() {
        let record = BibliographicRecord::new("a", "article").with_field("year", "2020");
        let (date, diagnostics) = resolve(&record);
        assert_eq!(date.to_string(), "2020-01-01");
        assert!(!diagnostics.has_warnings());
    }

    #[test]
    fn date_with_year_and_month() {
        let record = BibliographicRecord::new("a", "article").with_field("date", "2021-06");
        assert_eq!(resolve(&record).0.to_string(), "2021-06-01");
    }

    #[test]
    fn full_date_passes_through() {
        let record = BibliographicRecord::new("a", "article").with_field("date", "2021-06-15");
        assert_eq!(resolve(&record).0.to_string(), "2021-06-15");
    }

    #[test]
    fn date_year_only_then_month_field() {
        let record = BibliographicRecord::new("a", "article")
            .with_field("date", "2018")
            .with_field("month", "mar");
        assert_eq!(resolve(&record).0.to_string(), "2018-03-01");
    }

    #[test]
    fn month_field_overrides_default_month_from_date() {
        let record = BibliographicRecord::new("a", "article")
            .with_field("date", "2018-01")
            .with_field("month", "dec");
        assert_eq!(resolve(&record).0.to_string(), "2018-12-01");
    }

    #[test]
    fn date_month_wins_when_not_january() {
        let record = BibliographicRecord::new("a", "article")
            .with_field("date", "2018-04")
            .with_field("month", "dec");
        assert_eq!(resolve(&record).0.to_string(), "2018-04-01");
    }

    #[test]
    fn date_wins_over_year_field() {
        let record = BibliographicRecord::new("a", "article")
            .with_field("date", "2017-2-3")
            .with_field("year", "1999");
        assert_eq!(resolve(&record).0.to_string(), "2017-02-03");
    }

    #[test]
    fn date_range_uses_start() {
        let record =
            BibliographicRecord::new("a", "inproceedings").with_field("date", "2019-07-01/2019-07-05");
        assert_eq!(resolve(&record).0.to_string(), "2019-07-01");
    }

    #[test]
    fn month_field_with_year() {
        let record = BibliographicRecord::new("a", "article")
            .with_field("year", "2020")
            .with_field("month", "11");
        assert_eq!(resolve(&record).0.to_string(), "2020-11-01");
    }

    #[test]
    fn missing_year_is_reported_not_fatal() {
        let record = BibliographicRecord::new("thesis", "phdthesis").with_field("month", "May");
        let (date, diagnostics) = resolve(&record);
        assert_eq!(date.to_string(), "-05-01");
        assert_eq!(diagnostics.warnings(), &[RecordWarning::MissingYear]);
    }

    #[test]
    fn invalid_month_keeps_default() {
        let record = BibliographicRecord::new("a", "article")
            .with_field("year", "2020")
            .with_field("month", "Smarch");
        let (date, diagnostics) = resolve(&record);
        assert_eq!(date.to_string(), "2020-01-01");
        assert!(diagnostics.contains(&RecordWarning::InvalidMonth {
            value: "Smarch".into()
        }));
    }

    #[test]
    fn month_names_and_numbers() {
        let cases: Vec<(&str, &str)> = vec![
            ("1", "01"),
            ("12", "12"),
            ("jan", "01"),
            ("Feb", "02"),
            ("MARCH", "03"),
            ("sept.", "09"),
            ("December", "12"),
            (" 7 ", "07"),
        ];

        for (input, expected) in &cases {
            let actual = month_to_number(input).unwrap();
            assert_eq!(
                &actual, expected,
                "Mismatch for {:?}: got {:?}, expected {:?}",
                input, actual, expected
            );
        }
    }

    #[test]
    fn short_values_are_padded_without_validation() {
        assert_eq!(month_to_number("xx").unwrap(), "xx");
        assert_eq!(month_to_number("x").unwrap(), "0x");
        assert_eq!(month_to_number("03").unwrap(), "03");
    }

    #[test]
    fn month_rejects_garbage() {
        assert_eq!(
            month_to_number("Smarch"),
            Err(DateError::InvalidMonth("Smarch".into()))
        );
        assert!(month_to_number("").is_err());
        assert!(month_to_number("Summer").is_err());
    }
}
