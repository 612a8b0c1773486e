//! Flattened bibliographic records.

use indexmap::IndexMap;
use thiserror::Error;

/// Errors raised when building a record from a raw field mapping.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    /// The mapping has no `id` (citation key).
    #[error("record has no identifier")]
    MissingId,
    /// The mapping has no `entrytype` tag.
    #[error("record `{0}` has no entry type")]
    MissingEntryType(String),
}

/// A single bibliographic entry as a validated field mapping.
///
/// Only the identifier and entry-type tag are guaranteed; every other field
/// must be checked with [`has`](Self::has) or read through
/// [`get`](Self::get). Field names are stored lowercase and keep their
/// insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BibliographicRecord {
    id: String,
    entry_type: String,
    fields: IndexMap<String, String>,
}

impl BibliographicRecord {
    /// Pseudo-field answering with the record identifier.
    pub const ID: &'static str = "id";
    /// Pseudo-field answering with the entry-type tag.
    pub const ENTRY_TYPE: &'static str = "entrytype";

    /// Creates a record with no fields besides its identifier and type tag.
    pub fn new(id: impl Into<String>, entry_type: impl AsRef<str>) -> Self {
        Self {
            id: id.into(),
            entry_type: entry_type.as_ref().to_lowercase(),
            fields: IndexMap::new(),
        }
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with_field(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Sets a field, returning the previous value.
    ///
    /// `id` and `entrytype` update the identifier and type tag instead of
    /// adding a regular field.
    pub fn insert(&mut self, name: impl AsRef<str>, value: impl Into<String>) -> Option<String> {
        let name = name.as_ref().to_lowercase();
        let value = value.into();
        match name.as_str() {
            Self::ID => Some(std::mem::replace(&mut self.id, value)),
            Self::ENTRY_TYPE => Some(std::mem::replace(
                &mut self.entry_type,
                value.to_lowercase(),
            )),
            _ => self.fields.insert(name, value),
        }
    }

    /// Citation key of the record.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Lowercase entry-type tag (`article`, `phdthesis`, ...).
    pub fn entry_type(&self) -> &str {
        &self.entry_type
    }

    /// Returns the raw value of a field, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        let name = name.to_lowercase();
        match name.as_str() {
            Self::ID => Some(&self.id),
            Self::ENTRY_TYPE => Some(&self.entry_type),
            _ => self.fields.get(&name).map(String::as_str),
        }
    }

    /// Returns true when the field is present.
    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Regular fields in insertion order (without `id` and `entrytype`).
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of regular fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the record has no regular fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl TryFrom<IndexMap<String, String>> for BibliographicRecord {
    type Error = RecordError;

    /// Builds a record from a raw mapping that carries `id` and `entrytype`
    /// among its (case-insensitive) keys.
    fn try_from(raw: IndexMap<String, String>) -> Result<Self, Self::Error> {
        let mut id = None;
        let mut entry_type = None;
        let mut fields = IndexMap::with_capacity(raw.len());
        for (name, value) in raw {
            let name = name.to_lowercase();
            match name.as_str() {
                Self::ID => id = Some(value),
                Self::ENTRY_TYPE => entry_type = Some(value.to_lowercase()),
                _ => {
                    fields.insert(name, value);
                }
            }
        }

        let id = id.ok_or(RecordError::MissingId)?;
        let entry_type = entry_type.ok_or_else(|| RecordError::MissingEntryType(id.clone()))?;
        Ok(Self {
            id,
            entry_type,
            fields,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_are_case_insensitive() {
        let record = BibliographicRecord::new("Smith2020", "Article").with_field("Title", "A");
        assert_eq!(record.entry_type(), "article");
        assert_eq!(record.get("TITLE"), Some("A"));
        assert!(record.has("title"));
        assert!(!record.has("year"));
    }

    #[test]
    fn pseudo_fields_answer_presence_checks() {
        let record = BibliographicRecord::new("Smith2020", "misc");
        assert_eq!(record.get("id"), Some("Smith2020"));
        assert_eq!(record.get("ENTRYTYPE"), Some("misc"));
        assert!(record.is_empty());
    }

    #[test]
    fn keeps_insertion_order() {
        let record = BibliographicRecord::new("k", "misc")
            .with_field("year", "2020")
            .with_field("author", "Doe, Jane")
            .with_field("title", "T");
        let names: Vec<_> = record.fields().map(|(name, _)| name).collect();
        assert_eq!(names, ["year", "author", "title"]);
    }

    #[test]
    fn builds_from_raw_mapping() {
        let raw: IndexMap<String, String> = [
            ("ID", "doe2019"),
            ("ENTRYTYPE", "Article"),
            ("Year", "2019"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let record = BibliographicRecord::try_from(raw).unwrap();
        assert_eq!(record.id(), "doe2019");
        assert_eq!(record.entry_type(), "article");
        assert_eq!(record.get("year"), Some("2019"));
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn rejects_mapping_without_identifier() {
        let raw: IndexMap<String, String> =
            [("entrytype".to_string(), "article".to_string())].into_iter().collect();
        assert_eq!(
            BibliographicRecord::try_from(raw),
            Err(RecordError::MissingId)
        );
    }

    #[test]
    fn rejects_mapping_without_entry_type() {
        let raw: IndexMap<String, String> =
            [("id".to_string(), "x".to_string())].into_iter().collect();
        assert_eq!(
            BibliographicRecord::try_from(raw),
            Err(RecordError::MissingEntryType("x".into()))
        );
    }
}
