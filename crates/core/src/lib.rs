#![deny(missing_docs)]
//! bibmark core: bibliographic field normalization and the front-matter document model.

/// Publication date resolution.
pub mod date;
/// Core error and diagnostic types.
pub mod error;
/// Editable YAML front matter.
pub mod frontmatter;
/// Author name normalization.
pub mod names;
/// Entry-type classification.
pub mod pubtype;
/// Bibliographic records as produced by the source reader.
pub mod record;
/// Slug generation utilities.
pub mod slug;
/// String cleanup and keyword splitting.
pub mod text;

pub use date::{DateError, ResolvedDate, month_to_number, resolve_date};
pub use error::{ErrorSeverity, RecordDiagnostics, RecordWarning};
pub use frontmatter::{FrontMatter, FrontmatterError};
pub use names::{normalize_author_field, normalize_authors, normalize_name};
pub use pubtype::{PubTypeScheme, PublicationType, csl_type};
pub use record::{BibliographicRecord, RecordError};
pub use slug::{SlugOptions, slugify};
pub use text::{TagCase, clean_str, split_tags};
