use bibmark_core::FrontmatterError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors emitted while importing a bibliography.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The bibliography file does not exist.
    #[error("Bibliography not found: {}", .0.display())]
    SourceNotFound(PathBuf),
    /// The bibliography could not be parsed.
    #[error("Failed to parse bibliography: {0}")]
    Parse(String),
    /// Reading or writing a file failed.
    #[error("IO error on {}: {source}", path.display())]
    Io {
        /// File or directory involved
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },
    /// The bundle's front matter could not be loaded or written.
    #[error(transparent)]
    Frontmatter(#[from] FrontmatterError),
    /// The entry identifier produced an empty slug.
    #[error("Entry `{0}` has no usable identifier for a bundle directory")]
    EmptySlug(String),
    /// The import configuration is unusable.
    #[error("Invalid configuration: {0}")]
    Config(String),
    /// The worker pool could not be created.
    #[error("Failed to build thread pool: {0}")]
    ThreadPool(String),
}

impl ImportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
