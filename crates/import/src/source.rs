//! Reading `.bib` files into [`BibliographicRecord`]s.

use crate::error::ImportError;
use biblatex::{Bibliography, Chunk, Entry, Spanned};
use bibmark_core::BibliographicRecord;
use std::fs;
use std::path::Path;

/// Loads every entry of a BibTeX/BibLaTeX file, in source order.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<BibliographicRecord>, ImportError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(ImportError::SourceNotFound(path.to_path_buf()));
    }
    let source = fs::read_to_string(path).map_err(|err| ImportError::io(path, err))?;
    let records = records_from_str(&source)?;
    log::debug!("Read {} entries from {}", records.len(), path.display());
    Ok(records)
}

/// Parses BibTeX/BibLaTeX text into records.
///
/// # Examples
///
/// ```
/// use bibmark_import::source::records_from_str;
///
/// let records = records_from_str("@article{Smith2020, title = {A {GPU} Study}, year = 2020}").unwrap();
/// assert_eq!(records[0].id(), "Smith2020");
/// assert_eq!(records[0].get("title"), Some("A {GPU} Study"));
/// ```
pub fn records_from_str(source: &str) -> Result<Vec<BibliographicRecord>, ImportError> {
    let bibliography =
        Bibliography::parse(source).map_err(|err| ImportError::Parse(err.to_string()))?;
    Ok(bibliography.iter().map(entry_to_record).collect())
}

fn entry_to_record(entry: &Entry) -> BibliographicRecord {
    let entry_type = entry.entry_type.to_string().to_lowercase();
    let mut record = BibliographicRecord::new(entry.key.clone(), entry_type);
    for (name, chunks) in &entry.fields {
        record.insert(name, flatten_chunks(chunks));
    }
    record
}

/// Joins a field's chunks back into one string.
///
/// Brace-protected text is re-braced when it is only part of the value so the
/// protection survives into `cite.bib`; math is re-wrapped in `$`.
fn flatten_chunks(chunks: &[Spanned<Chunk>]) -> String {
    let partial = chunks.len() > 1;
    chunks
        .iter()
        .map(|chunk| match &chunk.v {
            Chunk::Normal(s) => s.clone(),
            Chunk::Verbatim(s) if partial => format!("{{{s}}}"),
            Chunk::Verbatim(s) => s.clone(),
            Chunk::Math(s) => format!("${s}$"),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
@article{Smith2020,
  author = {Smith, John and Doe, Jane},
  title = {Deep Learning},
  journal = {Nature},
  year = {2020},
  month = {jan},
}

@phdthesis{ThesisOnly,
  author = {Roe, Richard},
  title = {On $x^2$ Things},
}
"#;

    #[test]
    fn entries_become_records_in_order() {
        let records = records_from_str(SAMPLE).unwrap();
        let ids: Vec<_> = records.iter().map(|r| r.id()).collect();
        assert_eq!(ids, ["Smith2020", "ThesisOnly"]);
        assert_eq!(records[0].entry_type(), "article");
        assert_eq!(records[1].entry_type(), "phdthesis");
    }

    #[test]
    fn fields_are_flattened() {
        let records = records_from_str(SAMPLE).unwrap();
        assert_eq!(records[0].get("author"), Some("Smith, John and Doe, Jane"));
        assert_eq!(records[0].get("journal"), Some("Nature"));
        assert_eq!(records[0].get("year"), Some("2020"));
        assert_eq!(records[1].get("title"), Some("On $x^2$ Things"));
        assert!(!records[1].has("year"));
    }

    #[test]
    fn malformed_source_is_a_parse_error() {
        let err = records_from_str("@article{broken, title = {unclosed").unwrap_err();
        assert!(matches!(err, ImportError::Parse(_)), "{err:?}");
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_records(dir.path().join("missing.bib")).unwrap_err();
        assert!(matches!(err, ImportError::SourceNotFound(_)), "{err:?}");
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("refs.bib");
        fs::write(&path, SAMPLE).unwrap();
        assert_eq!(load_records(&path).unwrap().len(), 2);
    }
}
