//! Import configuration.

use crate::error::ImportError;
use bibmark_core::{PubTypeScheme, SlugOptions, TagCase};
use std::path::PathBuf;

/// Options controlling how records become bundles.
#[derive(Debug, Clone)]
pub struct ImportConfig {
    /// Root directory that receives one bundle per record.
    pub output_dir: PathBuf,
    /// Rewrite bundles that already exist instead of skipping them.
    pub overwrite: bool,
    /// Normalize keyword capitalization with `tag_case`.
    pub normalize: bool,
    /// Write compact front matter (no comments, no empty fields).
    pub compact: bool,
    /// Run the whole pipeline without touching the filesystem.
    pub dry_run: bool,
    /// Value of the `featured` flag on every imported publication.
    pub featured: bool,
    /// Case policy used when `normalize` is set.
    pub tag_case: TagCase,
    /// Taxonomy written to `publication_types`.
    pub pub_type_scheme: PubTypeScheme,
    /// Custom `index.md` template; the embedded one is used when `None`.
    pub template: Option<PathBuf>,
    /// Slug options for bundle directory names.
    pub slug: SlugOptions,
    /// Worker threads for batch imports; sequential when `None` or 1.
    pub jobs: Option<usize>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("publication"),
            overwrite: false,
            normalize: false,
            compact: false,
            dry_run: false,
            featured: false,
            tag_case: TagCase::default(),
            pub_type_scheme: PubTypeScheme::default(),
            template: None,
            slug: SlugOptions::default(),
            jobs: None,
        }
    }
}

impl ImportConfig {
    /// Default configuration writing into `output_dir`.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    /// Sets [`overwrite`](Self::overwrite).
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Sets [`normalize`](Self::normalize).
    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Sets [`compact`](Self::compact).
    pub fn with_compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    /// Sets [`dry_run`](Self::dry_run).
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Sets [`featured`](Self::featured).
    pub fn with_featured(mut self, featured: bool) -> Self {
        self.featured = featured;
        self
    }

    /// Sets [`tag_case`](Self::tag_case).
    pub fn with_tag_case(mut self, tag_case: TagCase) -> Self {
        self.tag_case = tag_case;
        self
    }

    /// Sets [`pub_type_scheme`](Self::pub_type_scheme).
    pub fn with_pub_type_scheme(mut self, scheme: PubTypeScheme) -> Self {
        self.pub_type_scheme = scheme;
        self
    }

    /// Sets [`template`](Self::template).
    pub fn with_template(mut self, template: impl Into<PathBuf>) -> Self {
        self.template = Some(template.into());
        self
    }

    /// Sets [`jobs`](Self::jobs).
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = Some(jobs);
        self
    }

    /// Checks the configuration before any record is processed.
    pub fn validate(&self) -> Result<(), ImportError> {
        if self.output_dir.as_os_str().is_empty() {
            return Err(ImportError::Config(
                "output directory must not be empty".to_string(),
            ));
        }
        if let Some(template) = &self.template
            && !template.is_file()
        {
            return Err(ImportError::Config(format!(
                "template {} does not exist",
                template.display()
            )));
        }
        if self.jobs == Some(0) {
            return Err(ImportError::Config("jobs must be at least 1".to_string()));
        }
        Ok(())
    }

    pub(crate) fn parallelism(&self) -> Option<usize> {
        self.jobs.filter(|jobs| *jobs > 1)
    }
}
