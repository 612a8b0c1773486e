//! BibTeX output for `cite.bib`.

use bibmark_core::BibliographicRecord;

/// Writes a record back out as a single BibTeX entry.
///
/// Fields keep their record order and are written as brace-delimited
/// literals.
///
/// # Examples
///
/// ```
/// use bibmark_core::BibliographicRecord;
/// use bibmark_import::citation::to_bibtex;
///
/// let record = BibliographicRecord::new("Smith2020", "article")
///     .with_field("title", "Deep Learning")
///     .with_field("year", "2020");
/// assert_eq!(
///     to_bibtex(&record),
///     "@article{Smith2020,\n  title = {Deep Learning},\n  year = {2020}\n}\n"
/// );
/// ```
pub fn to_bibtex(record: &BibliographicRecord) -> String {
    let fields: Vec<String> = record
        .fields()
        .map(|(name, value)| format!("  {name} = {{{value}}}"))
        .collect();

    let mut out = format!("@{}{{{},\n", record.entry_type(), record.id());
    if !fields.is_empty() {
        out.push_str(&fields.join(",\n"));
        out.push('\n');
    }
    out.push_str("}\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_without_fields() {
        let record = BibliographicRecord::new("key", "misc");
        assert_eq!(to_bibtex(&record), "@misc{key,\n}\n");
    }

    #[test]
    fn output_reparses_to_the_same_fields() {
        let record = BibliographicRecord::new("Doe2019", "inproceedings")
            .with_field("author", "Doe, Jane and Roe, Richard")
            .with_field("booktitle", "Proc. of {ACM} Things")
            .with_field("year", "2019");

        let parsed = crate::source::records_from_str(&to_bibtex(&record)).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].id(), "Doe2019");
        assert_eq!(parsed[0].entry_type(), "inproceedings");
        assert_eq!(parsed[0].get("author"), record.get("author"));
        assert_eq!(parsed[0].get("booktitle"), record.get("booktitle"));
    }
}
