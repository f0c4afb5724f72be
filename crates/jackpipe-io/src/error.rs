//! Error types for jackpipe-io

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Codec error type
#[derive(Error, Debug)]
pub enum Error {
    /// The source file could not be opened
    #[error("Cannot open {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The source file is not mono
    #[error("Invalid number of channels {channels} in {}: only one is supported", .path.display())]
    UnsupportedFormat { path: PathBuf, channels: u16 },

    /// Open, decode, or encode failure reported by the WAV codec
    #[error("WAV error on {}: {source}", .path.display())]
    Codec {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },
}

impl Error {
    pub(crate) fn codec(path: impl Into<PathBuf>, source: hound::Error) -> Self {
        Error::Codec {
            path: path.into(),
            source,
        }
    }
}

/// Result type for codec operations
pub type Result<T> = std::result::Result<T, Error>;
