//! Error types for mf2 operations.
//!
//! Extraction itself never fails; these cover the edges where caller input
//! is rejected outright.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid base URL {url:?}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Invalid datetime: {0:?}")]
    InvalidDateTime(String),
}

pub type Result<T> = std::result::Result<T, Error>;
