use bibmark_core::{PubTypeScheme, TagCase};
use bibmark_import::ImportConfig;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bibmark")]
#[command(version, about = "Turn BibTeX entries into publication page bundles", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Show debug output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only show errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

impl Cli {
    /// Log filter used when `RUST_LOG` is not set.
    pub fn default_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Import publications from a BibTeX file
    Import(ImportArgs),
}

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// BibTeX file to import
    pub input: PathBuf,

    /// Directory that receives one bundle per entry
    #[arg(default_value = "content/publication")]
    pub output: PathBuf,

    /// Flag publications as featured
    #[arg(long)]
    pub featured: bool,

    /// Overwrite existing publications
    #[arg(long)]
    pub overwrite: bool,

    /// Strip comments and empty fields from the front matter
    #[arg(long)]
    pub compact: bool,

    /// Normalize each keyword to lowercase with uppercase first letter
    #[arg(long)]
    pub normalize: bool,

    /// Use ASCII-only case rules when normalizing keywords
    #[arg(long, requires = "normalize")]
    pub ascii_tags: bool,

    /// Perform a trial run with no changes made
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Markdown template for new bundles
    #[arg(long, value_name = "PATH")]
    pub template: Option<PathBuf>,

    /// Write CSL item types instead of numeric publication types
    #[arg(long)]
    pub csl_types: bool,

    /// Number of worker threads
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Print the import summary as JSON
    #[arg(long)]
    pub json: bool,
}

impl ImportArgs {
    pub fn to_config(&self) -> ImportConfig {
        let tag_case = if self.ascii_tags {
            TagCase::Ascii
        } else {
            TagCase::Unicode
        };
        let scheme = if self.csl_types {
            PubTypeScheme::Csl
        } else {
            PubTypeScheme::Numeric
        };

        let mut config = ImportConfig::new(&self.output)
            .with_featured(self.featured)
            .with_overwrite(self.overwrite)
            .with_compact(self.compact)
            .with_normalize(self.normalize)
            .with_dry_run(self.dry_run)
            .with_tag_case(tag_case)
            .with_pub_type_scheme(scheme);
        if let Some(template) = &self.template {
            config = config.with_template(template);
        }
        if let Some(jobs) = self.jobs {
            config = config.with_jobs(jobs);
        }
        config
    }
}
