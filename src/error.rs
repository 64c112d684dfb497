use std::path::PathBuf;

/// Errors raised by the feed pipeline.
///
/// Configuration errors are fatal: the scheduler refuses to run a cycle
/// without a good configuration and propagates them out of its run loop.
/// Everything else is recoverable and handled at the feed or cycle level.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read configuration {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("feed fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("response is neither valid Atom nor valid RSS")]
    UnrecognizedFeed,

    #[error("entry store error: {0}")]
    Store(#[from] sqlx::Error),

    #[error("template rendering failed: {0}")]
    Render(#[from] askama::Error),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Whether the scheduler must halt rather than continue the cycle.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::ConfigIo { .. } | Error::ConfigParse(_))
    }
}
