//! Error type shared by the toolkit-free modules and the GTK shell.
//!
//! Nothing in the recent-documents pipeline is fatal: callers log these and
//! fall back to a placeholder icon or a cache miss.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("window has no action named `{0}`")]
    MissingAction(&'static str),

    #[error("{0}")]
    Args(#[from] lexopt::Error),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
