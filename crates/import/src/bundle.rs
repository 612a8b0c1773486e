//! Per-record bundle creation.

use crate::citation::to_bibtex;
use crate::config::ImportConfig;
use crate::error::ImportError;
use bibmark_core::{
    BibliographicRecord, FrontMatter, RecordDiagnostics, RecordWarning, clean_str,
    normalize_author_field, resolve_date, slugify, split_tags,
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Template used for `index.md` when no custom template is configured.
pub const DEFAULT_TEMPLATE: &str = include_str!("../templates/publication.md");
/// Markdown file of a bundle.
pub const INDEX_FILE: &str = "index.md";
/// Citation file of a bundle.
pub const CITE_FILE: &str = "cite.bib";

const ARXIV_ABS_URL: &str = "https://arxiv.org/abs/";

/// Entry of the `links` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    /// Label shown on the page.
    pub name: String,
    /// Target URL.
    pub url: String,
}

impl Link {
    fn new(name: &str, url: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            url: url.into(),
        }
    }
}

/// A bundle that was (or, in a dry run, would have been) written.
#[derive(Debug, Clone)]
pub struct BundleResult {
    /// Record identifier.
    pub id: String,
    /// Bundle directory.
    pub path: PathBuf,
    /// Front matter as populated for this record.
    pub front_matter: FrontMatter,
    /// Data problems found while populating the front matter.
    pub warnings: Vec<RecordWarning>,
}

/// What [`Importer::process`] did with a record.
#[derive(Debug, Clone)]
pub enum BundleOutcome {
    /// The bundle directory already existed and `overwrite` was off.
    Skipped {
        /// Existing bundle directory
        path: PathBuf,
    },
    /// The bundle was written.
    Written(BundleResult),
}

/// Turns records into bundles under a single output root.
#[derive(Debug, Clone)]
pub struct Importer {
    config: ImportConfig,
    template: String,
    timestamp: String,
}

impl Importer {
    /// Validates `config` and loads the configured template.
    pub fn new(config: ImportConfig) -> Result<Self, ImportError> {
        config.validate()?;
        let template = match &config.template {
            Some(path) => fs::read_to_string(path).map_err(|err| ImportError::io(path, err))?,
            None => DEFAULT_TEMPLATE.to_string(),
        };
        Ok(Self {
            config,
            template,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        })
    }

    /// Overrides the `publishDate` stamp written to every bundle.
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = timestamp.into();
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Directory name of the record's bundle.
    pub fn slug(&self, record: &BibliographicRecord) -> Result<String, ImportError> {
        let slug = slugify(record.id(), &self.config.slug);
        if slug.is_empty() {
            return Err(ImportError::EmptySlug(record.id().to_string()));
        }
        Ok(slug)
    }

    /// Bundle directory of a record.
    pub fn bundle_path(&self, record: &BibliographicRecord) -> Result<PathBuf, ImportError> {
        Ok(self.config.output_dir.join(self.slug(record)?))
    }

    /// Builds the bundle of one record.
    ///
    /// Existing bundles are skipped unless `overwrite` is set. In a dry run
    /// every step runs but nothing is created or written.
    pub fn process(&self, record: &BibliographicRecord) -> Result<BundleOutcome, ImportError> {
        log::info!("Parsing entry {}", record.id());

        let bundle = self.bundle_path(record)?;
        if !self.config.overwrite && bundle.is_dir() {
            log::warn!(
                "Skipping creation of {} as it already exists. To overwrite, add the `--overwrite` argument.",
                bundle.display()
            );
            return Ok(BundleOutcome::Skipped { path: bundle });
        }

        let dry_run = self.config.dry_run;
        let markdown_path = bundle.join(INDEX_FILE);
        let cite_path = bundle.join(CITE_FILE);

        log::info!("Creating folder {}", bundle.display());
        if !dry_run {
            fs::create_dir_all(&bundle).map_err(|err| ImportError::io(&bundle, err))?;
        }

        log::info!("Saving citation to {}", cite_path.display());
        if !dry_run {
            write_file(&cite_path, &to_bibtex(record))?;
            write_file(&markdown_path, &self.template)?;
        }

        let mut page = FrontMatter::load(&markdown_path, dry_run)?;
        let mut diagnostics = RecordDiagnostics::new(record.id());
        self.populate(&mut page, record, &mut diagnostics)?;

        log::info!("Saving Markdown to {}", markdown_path.display());
        page.dump(self.config.compact)?;

        Ok(BundleOutcome::Written(BundleResult {
            id: record.id().to_string(),
            path: bundle,
            front_matter: page,
            warnings: diagnostics.into_warnings(),
        }))
    }

    /// Writes the record's metadata into `page`.
    pub fn populate(
        &self,
        page: &mut FrontMatter,
        record: &BibliographicRecord,
        diagnostics: &mut RecordDiagnostics,
    ) -> Result<(), ImportError> {
        let title = match record.get("title") {
            Some(title) => clean_str(title),
            None => {
                diagnostics.add(RecordWarning::MissingTitle);
                String::new()
            }
        };
        page.set("title", title);

        if let Some(subtitle) = record.get("subtitle") {
            page.set("subtitle", clean_str(subtitle));
        }

        page.set("date", resolve_date(record, diagnostics).to_string());
        page.set("publishDate", self.timestamp.as_str());

        if let Some(authors) = record.get("author").or_else(|| record.get("editor"))
            && !authors.trim().is_empty()
        {
            page.set("authors", normalize_author_field(authors));
        }

        page.set(
            "publication_types",
            vec![self.config.pub_type_scheme.render(record.entry_type())],
        );
        page.set(
            "abstract",
            record.get("abstract").map(clean_str).unwrap_or_default(),
        );
        page.set("featured", self.config.featured);
        page.set("publication", publication_name(record));

        if let Some(keywords) = record.get("keywords") {
            let case = self.config.normalize.then_some(self.config.tag_case);
            page.set("tags", split_tags(keywords, case));
        }

        if let Some(doi) = record.get("doi") {
            page.set("doi", clean_str(doi));
        }

        let mut links = Vec::new();
        if let Some(prefix) = record.get("archiveprefix")
            && prefix.eq_ignore_ascii_case("arxiv")
            && let Some(eprint) = record.get("eprint")
        {
            links.push(Link::new(
                "arXiv",
                format!("{ARXIV_ABS_URL}{}", clean_str(eprint)),
            ));
        }

        if let Some(url) = record.get("url") {
            let url = clean_str(url);
            if url.to_lowercase().ends_with(".pdf") {
                page.set("url_pdf", url);
            } else {
                links.push(Link::new("URL", url));
            }
        }

        if !links.is_empty() {
            page.set_serialized("links", &links)?;
        }
        Ok(())
    }
}

/// `*booktitle*`, `*journal*` or `*publisher*`, whichever comes first.
fn publication_name(record: &BibliographicRecord) -> String {
    ["booktitle", "journal", "publisher"]
        .iter()
        .find_map(|field| record.get(field))
        .map(|name| format!("*{}*", clean_str(name)))
        .unwrap_or_default()
}

fn write_file(path: &Path, contents: &str) -> Result<(), ImportError> {
    fs::write(path, contents).map_err(|err| ImportError::io(path, err))
}
