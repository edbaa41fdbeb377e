//! Error types for metadata fetching and materialization.

use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while fetching metadata and writing it to disk.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// The configuration root could not be created or entered.
    #[error("unable to prepare config dir {}: {source}", path.display())]
    Setup {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The HTTP client could not be built.
    #[error("unable to create http client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request could not be sent, or timed out.
    #[error("request failed: {0}")]
    Network(#[source] reqwest::Error),

    /// The metadata service answered with something other than 200.
    #[error("unexpected status code: {0}")]
    UnexpectedStatus(u16),

    /// The response body could not be read.
    #[error("unable to read response: {0}")]
    Read(#[source] reqwest::Error),

    /// A parent directory for an output file could not be created.
    #[error("unable to create directory {}: {source}", path.display())]
    Directory {
        path: PathBuf,
        source: std::io::Error,
    },

    /// An output file could not be written.
    #[error("unable to write file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// An environment entry matched the attribute pattern but its mode is not octal.
    #[error("unable to parse mode for env {entry}: {source}")]
    ModeParse {
        entry: String,
        source: ParseIntError,
    },

    /// An environment entry names a file outside the configuration root.
    #[error("refusing file path outside config dir for env {entry}")]
    InvalidPath { entry: String },
}
