//! Whole-bibliography imports, sequential or on a rayon pool.

use crate::bundle::{BundleOutcome, Importer};
use crate::error::ImportError;
use crate::source::load_records;
use bibmark_core::{BibliographicRecord, RecordWarning, slugify};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// What happened to one record of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    /// The bundle was written (or would have been, in a dry run).
    Written,
    /// The bundle already existed.
    Skipped,
    /// The record could not be imported.
    Failed,
}

/// Result for a single record in a batch.
#[derive(Debug, Clone, Serialize)]
pub struct RecordReport {
    /// Record identifier.
    pub id: String,
    /// Outcome.
    pub status: RecordStatus,
    /// Bundle directory, when one could be derived.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Data problems found while populating the front matter.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<RecordWarning>,
    /// Error message (present on failure).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Statistics and per-record results of a batch.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportSummary {
    /// Number of records in the batch.
    pub total: usize,
    /// Bundles written.
    pub written: usize,
    /// Bundles skipped because they already existed.
    pub skipped: usize,
    /// Records that failed.
    pub failed: usize,
    /// Warnings across all written bundles.
    pub warnings: usize,
    /// Total processing time in milliseconds.
    pub elapsed_ms: f64,
    /// Individual results, in input order.
    pub records: Vec<RecordReport>,
}

impl ImportSummary {
    fn from_reports(records: Vec<RecordReport>, elapsed_ms: f64) -> Self {
        let count = |status| records.iter().filter(|r| r.status == status).count();
        Self {
            total: records.len(),
            written: count(RecordStatus::Written),
            skipped: count(RecordStatus::Skipped),
            failed: count(RecordStatus::Failed),
            warnings: records.iter().map(|r| r.warnings.len()).sum(),
            elapsed_ms,
            records,
        }
    }
}

impl Importer {
    /// Imports every entry of a `.bib` file.
    pub fn import_file(&self, path: impl AsRef<Path>) -> Result<ImportSummary, ImportError> {
        let records = load_records(path)?;
        self.import_records(records)
    }

    /// Imports records in order.
    ///
    /// Record failures are logged and counted; only a pool that cannot be
    /// built fails the batch. With `jobs > 1` records run in parallel as long
    /// as no two of them share a bundle directory.
    pub fn import_records(
        &self,
        records: impl IntoIterator<Item = BibliographicRecord>,
    ) -> Result<ImportSummary, ImportError> {
        let start = Instant::now();
        let records: Vec<BibliographicRecord> = records.into_iter().collect();

        let reports: Vec<RecordReport> = match self.config().parallelism() {
            Some(jobs) if self.slugs_are_unique(&records) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(jobs)
                    .build()
                    .map_err(|err| ImportError::ThreadPool(err.to_string()))?;
                log::debug!("Importing {} records on {} threads", records.len(), jobs);
                pool.install(|| records.par_iter().map(|r| self.report(r)).collect())
            }
            Some(_) => {
                log::warn!("Several entries map to the same bundle; importing sequentially");
                records.iter().map(|r| self.report(r)).collect()
            }
            None => records.iter().map(|r| self.report(r)).collect(),
        };

        let elapsed = start.elapsed();
        Ok(ImportSummary::from_reports(
            reports,
            elapsed.as_secs_f64() * 1000.0,
        ))
    }

    fn report(&self, record: &BibliographicRecord) -> RecordReport {
        match self.process(record) {
            Ok(BundleOutcome::Written(result)) => RecordReport {
                id: result.id,
                status: RecordStatus::Written,
                path: Some(result.path),
                warnings: result.warnings,
                error: None,
            },
            Ok(BundleOutcome::Skipped { path }) => RecordReport {
                id: record.id().to_string(),
                status: RecordStatus::Skipped,
                path: Some(path),
                warnings: Vec::new(),
                error: None,
            },
            Err(err) => {
                log::error!("Failed to import entry `{}`: {}", record.id(), err);
                RecordReport {
                    id: record.id().to_string(),
                    status: RecordStatus::Failed,
                    path: self.bundle_path(record).ok(),
                    warnings: Vec::new(),
                    error: Some(err.to_string()),
                }
            }
        }
    }

    fn slugs_are_unique(&self, records: &[BibliographicRecord]) -> bool {
        let mut seen = HashSet::with_capacity(records.len());
        records
            .iter()
            .all(|record| seen.insert(slugify(record.id(), &self.config().slug)))
    }
}
