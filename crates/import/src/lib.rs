#![deny(missing_docs)]
//! bibmark import: turns BibTeX entries into publication bundles.
//!
//! Each entry becomes `<output>/<slug>/` holding `cite.bib` and an `index.md`
//! whose front matter is filled from the entry.

/// Whole-bibliography imports.
pub mod batch;
/// Per-record bundle creation.
pub mod bundle;
/// `cite.bib` serialization.
pub mod citation;
/// Import configuration.
pub mod config;
/// Import error types.
pub mod error;
/// BibTeX source loading.
pub mod source;

pub use batch::{ImportSummary, RecordReport, RecordStatus};
pub use bundle::{BundleOutcome, BundleResult, DEFAULT_TEMPLATE, Importer, Link};
pub use citation::to_bibtex;
pub use config::ImportConfig;
pub use error::ImportError;
pub use source::{load_records, records_from_str};
