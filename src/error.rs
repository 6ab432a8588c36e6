use std::path::PathBuf;

/// Errors surfaced by the core engine and by its external collaborators.
///
/// The core (construction and query time) only ever produces
/// [`Error::InvalidInput`], [`Error::IndexOutOfRange`] and [`Error::Internal`];
/// the remaining variants belong to the crawler, loader, config and server
/// modules and never cross into the `esa`/`search` modules.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Empty pattern, empty data, negative context length, or document
    /// offsets that are missing, out of range, or not strictly increasing.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A hit or document index fell outside the bounds of the result it was
    /// requested from.
    #[error("index {index} out of range (size {size})")]
    IndexOutOfRange { index: usize, size: usize },

    /// The suffix array builder reported a failure that a correct
    /// implementation should never produce.
    #[error("internal error: {0}")]
    Internal(String),

    /// Config file could not be parsed or did not pass validation.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A configured root directory could not be crawled.
    #[error("failed to crawl {path}: {source}")]
    Crawl {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A discovered file could not be loaded into the document buffer.
    #[error("failed to load {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The HTTP listener failed to bind or accept.
    #[error("server error: {0}")]
    Server(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
