//! Centralized error type for the jackpipe umbrella crate.
//!
//! Wraps all subsystem errors so `?` propagates naturally across crate boundaries.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid arguments: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] jackpipe_core::Error),

    #[error("{0}")]
    Codec(#[from] jackpipe_io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
